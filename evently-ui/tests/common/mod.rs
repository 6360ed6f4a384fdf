//! In-memory stand-ins for the browser seams

#![allow(dead_code)]

use async_trait::async_trait;
use evently_ui::resource::{
    Diagnostics, FetchRequest, FetchResponse, LoadError, LocalHandle, ObjectUrlRegistry,
    ResourceFetcher, SecureResourceLoader, StaticCredentials,
};
use std::cell::{Cell, RefCell};
use std::collections::{HashSet, VecDeque};
use std::rc::Rc;

pub const PNG_BYTES: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

/// Replays queued responses and records every request
#[derive(Default)]
pub struct FakeFetcher {
    responses: RefCell<VecDeque<Result<FetchResponse, LoadError>>>,
    pub requests: RefCell<Vec<FetchRequest>>,
}

impl FakeFetcher {
    pub fn respond_ok(&self, body: &[u8], content_type: &str) {
        self.responses.borrow_mut().push_back(Ok(FetchResponse {
            status: 200,
            content_type: Some(content_type.to_string()),
            body: body.to_vec(),
        }));
    }

    pub fn respond_status(&self, status: u16) {
        self.responses.borrow_mut().push_back(Ok(FetchResponse {
            status,
            content_type: None,
            body: Vec::new(),
        }));
    }

    pub fn respond_err(&self, error: LoadError) {
        self.responses.borrow_mut().push_back(Err(error));
    }

    pub fn calls(&self) -> usize {
        self.requests.borrow().len()
    }

    pub fn last_request(&self) -> FetchRequest {
        self.requests.borrow().last().cloned().expect("no request was made")
    }
}

#[async_trait(?Send)]
impl ResourceFetcher for FakeFetcher {
    async fn fetch(&self, request: FetchRequest) -> Result<FetchResponse, LoadError> {
        self.requests.borrow_mut().push(request);
        self.responses.borrow_mut().pop_front().unwrap_or_else(|| {
            Ok(FetchResponse {
                status: 200,
                content_type: Some("image/png".to_string()),
                body: PNG_BYTES.to_vec(),
            })
        })
    }
}

/// Hands out `blob:fake/N` URLs and tracks which are still live
#[derive(Default)]
pub struct FakeUrls {
    next: Cell<u64>,
    pub live: RefCell<HashSet<String>>,
    pub created: RefCell<Vec<String>>,
    pub revoked: RefCell<Vec<String>>,
    pub fail: Cell<bool>,
}

impl FakeUrls {
    pub fn revoked_count(&self, url: &str) -> usize {
        self.revoked.borrow().iter().filter(|u| u.as_str() == url).count()
    }
}

impl ObjectUrlRegistry for FakeUrls {
    fn create(&self, bytes: &[u8], content_type: Option<&str>) -> Result<LocalHandle, LoadError> {
        if self.fail.get() {
            return Err(LoadError::Allocation("quota exceeded".to_string()));
        }
        assert!(!bytes.is_empty(), "empty body allocated");
        assert!(content_type.is_some(), "content type dropped");

        let seq = self.next.get() + 1;
        self.next.set(seq);
        let url = format!("blob:fake/{}", seq);
        self.live.borrow_mut().insert(url.clone());
        self.created.borrow_mut().push(url.clone());
        Ok(LocalHandle::new(seq, url))
    }

    fn revoke(&self, handle: &LocalHandle) {
        self.live.borrow_mut().remove(handle.url());
        self.revoked.borrow_mut().push(handle.url().to_string());
    }
}

#[derive(Default)]
pub struct RecordingDiagnostics {
    pub reports: RefCell<Vec<(String, LoadError)>>,
}

impl Diagnostics for RecordingDiagnostics {
    fn report(&self, url: &str, error: &LoadError) {
        self.reports.borrow_mut().push((url.to_string(), error.clone()));
    }
}

pub struct Harness {
    pub fetcher: Rc<FakeFetcher>,
    pub urls: Rc<FakeUrls>,
    pub diagnostics: Rc<RecordingDiagnostics>,
    pub loader: Rc<SecureResourceLoader>,
}

pub fn harness(token: Option<&str>) -> Harness {
    let fetcher = Rc::new(FakeFetcher::default());
    let urls = Rc::new(FakeUrls::default());
    let diagnostics = Rc::new(RecordingDiagnostics::default());
    let loader = Rc::new(SecureResourceLoader::new(
        Rc::new(StaticCredentials(token.map(str::to_string))),
        fetcher.clone(),
        urls.clone(),
        diagnostics.clone(),
    ));

    Harness {
        fetcher,
        urls,
        diagnostics,
        loader,
    }
}
