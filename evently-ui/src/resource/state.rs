//! Load states observed by display surfaces

use thiserror::Error;

/// Why a protected resource could not be shown
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error("server responded with HTTP {status}")]
    Http { status: u16 },

    #[error("request failed: {0}")]
    Transport(String),

    #[error("request timed out after {millis} ms")]
    Timeout { millis: u32 },

    #[error("could not create object URL: {0}")]
    Allocation(String),
}

impl LoadError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status } => Some(*status),
            _ => None,
        }
    }
}

/// Object URL allocated over fetched bytes. Must be revoked exactly once.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LocalHandle {
    seq: u64,
    url: String,
}

impl LocalHandle {
    pub fn new(seq: u64, url: impl Into<String>) -> Self {
        Self { seq, url: url.into() }
    }

    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

/// What a loaded surface renders
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplaySource {
    /// Freshly allocated object URL owned by the surface
    Handle(LocalHandle),
    /// Reference rendered as-is, nothing to release
    Passthrough(String),
}

impl DisplaySource {
    pub fn src(&self) -> &str {
        match self {
            Self::Handle(handle) => handle.url(),
            Self::Passthrough(url) => url,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Loaded(DisplaySource),
    Failed(LoadError),
}

impl LoadState {
    pub fn src(&self) -> Option<&str> {
        match self {
            Self::Loaded(source) => Some(source.src()),
            _ => None,
        }
    }

    pub fn handle(&self) -> Option<&LocalHandle> {
        match self {
            Self::Loaded(DisplaySource::Handle(handle)) => Some(handle),
            _ => None,
        }
    }

    pub fn into_handle(self) -> Option<LocalHandle> {
        match self {
            Self::Loaded(DisplaySource::Handle(handle)) => Some(handle),
            _ => None,
        }
    }

    /// Placeholder should be shown instead of an image
    pub fn is_placeholder(&self) -> bool {
        !matches!(self, Self::Loaded(_))
    }
}
