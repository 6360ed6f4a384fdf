//! Client configuration
//!
//! Values are resolved once per process:
//! 1. Build-time environment (`API_BASE_URL`)
//! 2. Default values

use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

const DEFAULT_API_BASE_URL: &str = "http://localhost:5000";

/// Path segment marking resources that need an authorized fetch
pub const SECURE_SEGMENT: &str = "secure-file";

/// Local storage key holding the bearer token
pub const TOKEN_KEY: &str = "token";

/// API client configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiConfig {
    /// Base URL of the registration API, without trailing slash
    pub base_url: String,
    /// Path segment that marks protected files
    pub secure_segment: String,
    /// Local storage key of the auth token
    pub token_key: String,
    /// Timeout applied to protected file fetches
    pub fetch_timeout_ms: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            secure_segment: SECURE_SEGMENT.to_string(),
            token_key: TOKEN_KEY.to_string(),
            fetch_timeout_ms: 30_000,
        }
    }
}

/// ASCII case-insensitive prefix test
pub(crate) fn has_prefix(value: &str, prefix: &str) -> bool {
    value
        .get(..prefix.len())
        .map(|head| head.eq_ignore_ascii_case(prefix))
        .unwrap_or(false)
}

/// Absolute `http(s)://` URL, whatever the scheme's case
pub(crate) fn has_scheme(value: &str) -> bool {
    has_prefix(value, "http://") || has_prefix(value, "https://")
}

impl ApiConfig {
    /// Build configuration from the build-time environment
    pub fn from_env() -> Self {
        Self::with_base_url(option_env!("API_BASE_URL"))
    }

    fn with_base_url(base_url: Option<&str>) -> Self {
        let base_url = base_url
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .unwrap_or(DEFAULT_API_BASE_URL)
            .trim_end_matches('/')
            .to_string();

        Self {
            base_url,
            ..Default::default()
        }
    }

    /// Absolute URL for an API path such as `/api/admin/registrations`
    pub fn endpoint(&self, path: &str) -> String {
        if has_scheme(path) {
            path.to_string()
        } else if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// URL of a protected file stored by the API
    pub fn secure_file_url(&self, filename: &str) -> String {
        format!(
            "{}/api/{}/{}",
            self.base_url,
            self.secure_segment,
            urlencoding::encode(filename.trim_start_matches('/'))
        )
    }

    /// Whether a URL points at a protected file
    pub fn is_protected(&self, url: &str) -> bool {
        url.contains(&format!("/{}/", self.secure_segment))
    }
}

/// Process-wide configuration
pub fn config() -> &'static ApiConfig {
    static CONFIG: OnceLock<ApiConfig> = OnceLock::new();
    CONFIG.get_or_init(ApiConfig::from_env)
}
