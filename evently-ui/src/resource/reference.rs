//! Classification of image/file references

use crate::config::{has_prefix, has_scheme, ApiConfig};

/// A reference to something a display surface can render
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ResourceReference {
    /// `blob:` URL already owned by the runtime
    Ephemeral(String),
    /// `data:` URL carrying its own bytes
    Inline(String),
    /// API file that must be fetched with the bearer token
    Protected(String),
    /// Publicly renderable URL
    Public(String),
}

impl ResourceReference {
    /// Classify a raw reference. Bare filenames become protected API paths.
    pub fn parse(raw: &str, config: &ApiConfig) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }

        if has_prefix(raw, "blob:") {
            return Some(Self::Ephemeral(raw.to_string()));
        }
        if has_prefix(raw, "data:") {
            return Some(Self::Inline(raw.to_string()));
        }

        let is_url = has_scheme(raw) || raw.starts_with('/');
        if !is_url {
            return Some(Self::secure_file(raw, config));
        }

        let url = config.endpoint(raw);
        if config.is_protected(&url) {
            Some(Self::Protected(url))
        } else {
            Some(Self::Public(url))
        }
    }

    /// Protected reference for a file stored by the API
    pub fn secure_file(filename: &str, config: &ApiConfig) -> Self {
        Self::Protected(config.secure_file_url(filename))
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Ephemeral(url) | Self::Inline(url) | Self::Protected(url) | Self::Public(url) => url,
        }
    }

    pub fn requires_auth(&self) -> bool {
        matches!(self, Self::Protected(_))
    }
}

impl std::fmt::Display for ResourceReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // Inline payloads can be megabytes long
            Self::Inline(url) => write!(f, "{}...", url.chars().take(32).collect::<String>()),
            other => write!(f, "{}", other.as_str()),
        }
    }
}
