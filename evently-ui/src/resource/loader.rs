//! Secure resource loader
//!
//! Resolves a [`ResourceReference`] into something an `<img>` can render.
//! Protected files are fetched with the stored bearer token and exposed
//! through a freshly allocated object URL; every other reference is passed
//! through untouched. Failures are reported to the diagnostic channel and
//! surface as [`LoadState::Failed`], never as an error to the caller.

use async_trait::async_trait;
use std::rc::Rc;
use tracing::debug;

use super::reference::ResourceReference;
use super::state::{DisplaySource, LoadError, LoadState, LocalHandle};

/// Outgoing GET request for a protected file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
    /// Send same-origin cookies along with the request
    pub include_credentials: bool,
}

impl FetchRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: Vec::new(),
            include_credentials: true,
        }
    }

    pub fn bearer(mut self, token: &str) -> Self {
        self.headers
            .push(("Authorization".to_string(), format!("Bearer {}", token)));
        self
    }

    /// Case-insensitive header lookup
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Response to a [`FetchRequest`]. `body` is only read for OK statuses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl FetchResponse {
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Source of the bearer token
pub trait CredentialProvider {
    fn bearer_token(&self) -> Option<String>;
}

/// Fixed token, or none at all
#[derive(Debug, Clone, Default)]
pub struct StaticCredentials(pub Option<String>);

impl CredentialProvider for StaticCredentials {
    fn bearer_token(&self) -> Option<String> {
        self.0.clone()
    }
}

#[async_trait(?Send)]
pub trait ResourceFetcher {
    /// Perform the request. Non-OK statuses are returned, not mapped to errors.
    async fn fetch(&self, request: FetchRequest) -> Result<FetchResponse, LoadError>;
}

/// Runtime facility that turns bytes into revocable object URLs
pub trait ObjectUrlRegistry {
    fn create(&self, bytes: &[u8], content_type: Option<&str>) -> Result<LocalHandle, LoadError>;
    fn revoke(&self, handle: &LocalHandle);
}

/// Diagnostic channel for failed loads
pub trait Diagnostics {
    fn report(&self, url: &str, error: &LoadError);
}

/// Reports failures through `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn report(&self, url: &str, error: &LoadError) {
        match error.status() {
            Some(status) => tracing::warn!(url, status, "protected resource request rejected"),
            None => tracing::warn!(url, error = %error, "protected resource request failed"),
        }
    }
}

pub struct SecureResourceLoader {
    credentials: Rc<dyn CredentialProvider>,
    fetcher: Rc<dyn ResourceFetcher>,
    urls: Rc<dyn ObjectUrlRegistry>,
    diagnostics: Rc<dyn Diagnostics>,
}

impl SecureResourceLoader {
    pub fn new(
        credentials: Rc<dyn CredentialProvider>,
        fetcher: Rc<dyn ResourceFetcher>,
        urls: Rc<dyn ObjectUrlRegistry>,
        diagnostics: Rc<dyn Diagnostics>,
    ) -> Self {
        Self {
            credentials,
            fetcher,
            urls,
            diagnostics,
        }
    }

    /// Registry that allocated this loader's handles; slots release through it
    pub fn object_urls(&self) -> Rc<dyn ObjectUrlRegistry> {
        Rc::clone(&self.urls)
    }

    pub async fn load(&self, reference: Option<&ResourceReference>) -> LoadState {
        let Some(reference) = reference else {
            return LoadState::Idle;
        };

        match reference {
            ResourceReference::Protected(url) => match self.fetch_protected(url).await {
                Ok(handle) => {
                    debug!(url = %url, handle = handle.seq(), "protected resource loaded");
                    LoadState::Loaded(DisplaySource::Handle(handle))
                }
                Err(error) => {
                    self.diagnostics.report(url, &error);
                    LoadState::Failed(error)
                }
            },
            other => LoadState::Loaded(DisplaySource::Passthrough(other.as_str().to_string())),
        }
    }

    async fn fetch_protected(&self, url: &str) -> Result<LocalHandle, LoadError> {
        let mut request = FetchRequest::get(url);
        match self.credentials.bearer_token() {
            Some(token) if !token.trim().is_empty() => request = request.bearer(&token),
            _ => debug!(url, "no auth token stored, fetching without Authorization"),
        }

        let response = self.fetcher.fetch(request).await?;
        if !response.ok() {
            return Err(LoadError::Http {
                status: response.status,
            });
        }

        self.urls
            .create(&response.body, response.content_type.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_request_headers() {
        let request = FetchRequest::get("http://localhost:5000/api/secure-file/a.png").bearer("t0k");
        assert!(request.include_credentials);
        assert_eq!(request.header("AUTHORIZATION"), Some("Bearer t0k"));
        assert_eq!(request.header("Cookie"), None);
        assert_eq!(FetchRequest::get("x").header("Authorization"), None);
    }

    #[test]
    fn test_fetch_response_ok_range() {
        let response = |status| FetchResponse {
            status,
            content_type: None,
            body: Vec::new(),
        };
        assert!(response(200).ok());
        assert!(response(204).ok());
        assert!(!response(304).ok());
        assert!(!response(403).ok());
    }

    #[test]
    fn test_tracing_diagnostics_accepts_all_errors() {
        let diagnostics = TracingDiagnostics;
        diagnostics.report("a.png", &LoadError::Http { status: 403 });
        diagnostics.report("a.png", &LoadError::Timeout { millis: 10 });
        assert_eq!(StaticCredentials(Some("x".to_string())).bearer_token().as_deref(), Some("x"));
        assert_eq!(StaticCredentials::default().bearer_token(), None);
    }
}
