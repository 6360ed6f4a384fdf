pub mod auth_modal;
pub mod button;
pub mod dialog;
pub mod secure_image;
pub mod tabs;
pub mod user_details_modal;

pub use auth_modal::AuthModal;
pub use button::{Button, ButtonVariant};
pub use dialog::Dialog;
pub use secure_image::SecureImage;
pub use tabs::{Tab, Tabs};
pub use user_details_modal::UserDetailsModal;
