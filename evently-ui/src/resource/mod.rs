//! Access-controlled image loading
//!
//! [`loader`] turns references into renderable sources, [`slot`] owns the
//! object URLs it allocates, and [`browser`] provides the `web-sys` backed
//! seams used at runtime.

pub mod browser;
pub mod loader;
pub mod reference;
pub mod slot;
pub mod state;

pub use browser::browser_loader;
pub use loader::{
    CredentialProvider, Diagnostics, FetchRequest, FetchResponse, ObjectUrlRegistry,
    ResourceFetcher, SecureResourceLoader, StaticCredentials, TracingDiagnostics,
};
pub use reference::ResourceReference;
pub use slot::{request, RequestTicket, ResourceSlot};
pub use state::{DisplaySource, LoadError, LoadState, LocalHandle};
