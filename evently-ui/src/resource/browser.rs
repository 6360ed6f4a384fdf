//! Browser implementations of the loader seams

use async_trait::async_trait;
use futures::future::{select, Either};
use gloo_storage::{LocalStorage, Storage};
use gloo_timers::future::TimeoutFuture;
use reqwasm::http::{Request, RequestCredentials};
use std::cell::Cell;
use std::rc::Rc;
use web_sys::{Blob, BlobPropertyBag, Url};

use super::loader::{
    CredentialProvider, Diagnostics, FetchRequest, FetchResponse, ObjectUrlRegistry,
    ResourceFetcher, SecureResourceLoader,
};
use super::state::{LoadError, LocalHandle};
use crate::config::ApiConfig;

/// Reads the bearer token from `localStorage`
#[derive(Debug, Clone)]
pub struct LocalStorageCredentials {
    key: String,
}

impl LocalStorageCredentials {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

impl CredentialProvider for LocalStorageCredentials {
    fn bearer_token(&self) -> Option<String> {
        LocalStorage::raw()
            .get_item(&self.key)
            .ok()
            .flatten()
            .filter(|token| !token.trim().is_empty())
    }
}

/// `fetch` based GET with a hard timeout
#[derive(Debug, Clone, Copy)]
pub struct BrowserFetcher {
    timeout_ms: u32,
}

impl BrowserFetcher {
    pub fn new(timeout_ms: u32) -> Self {
        Self { timeout_ms }
    }
}

#[async_trait(?Send)]
impl ResourceFetcher for BrowserFetcher {
    async fn fetch(&self, request: FetchRequest) -> Result<FetchResponse, LoadError> {
        let mut builder = Request::get(&request.url);
        if request.include_credentials {
            builder = builder.credentials(RequestCredentials::Include);
        }
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        let send = async move {
            let response = builder
                .send()
                .await
                .map_err(|e| LoadError::Transport(e.to_string()))?;

            let status = response.status();
            if !response.ok() {
                return Ok(FetchResponse {
                    status,
                    content_type: None,
                    body: Vec::new(),
                });
            }

            let content_type = response.headers().get("content-type");
            let body = response
                .binary()
                .await
                .map_err(|e| LoadError::Transport(e.to_string()))?;

            Ok(FetchResponse {
                status,
                content_type,
                body,
            })
        };

        match select(Box::pin(send), Box::pin(TimeoutFuture::new(self.timeout_ms))).await {
            Either::Left((result, _)) => result,
            Either::Right(_) => Err(LoadError::Timeout {
                millis: self.timeout_ms,
            }),
        }
    }
}

/// Allocates `Blob`s and hands out their object URLs
#[derive(Debug, Default)]
pub struct BlobObjectUrls {
    next_seq: Cell<u64>,
}

impl ObjectUrlRegistry for BlobObjectUrls {
    fn create(&self, bytes: &[u8], content_type: Option<&str>) -> Result<LocalHandle, LoadError> {
        let parts = js_sys::Array::of1(&js_sys::Uint8Array::from(bytes));
        let options = BlobPropertyBag::new();
        if let Some(content_type) = content_type {
            options.set_type(content_type);
        }

        let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options)
            .map_err(|e| LoadError::Allocation(format!("{:?}", e)))?;
        let url = Url::create_object_url_with_blob(&blob)
            .map_err(|e| LoadError::Allocation(format!("{:?}", e)))?;

        let seq = self.next_seq.get() + 1;
        self.next_seq.set(seq);
        Ok(LocalHandle::new(seq, url))
    }

    fn revoke(&self, handle: &LocalHandle) {
        if let Err(e) = Url::revoke_object_url(handle.url()) {
            leptos::logging::warn!("Failed to revoke {}: {:?}", handle.url(), e);
        }
    }
}

/// Writes failures to the browser console
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleDiagnostics;

impl Diagnostics for ConsoleDiagnostics {
    fn report(&self, url: &str, error: &LoadError) {
        match error.status() {
            Some(status) => leptos::logging::error!("Failed to fetch image {}: {}", url, status),
            None => leptos::logging::error!("Error fetching image {}: {}", url, error),
        }
    }
}

/// Loader wired to `localStorage`, `fetch` and `Blob` object URLs
pub fn browser_loader(config: &ApiConfig) -> SecureResourceLoader {
    SecureResourceLoader::new(
        Rc::new(LocalStorageCredentials::new(config.token_key.clone())),
        Rc::new(BrowserFetcher::new(config.fetch_timeout_ms)),
        Rc::new(BlobObjectUrls::default()),
        Rc::new(ConsoleDiagnostics),
    )
}
