mod admin;
mod home;

pub use admin::AdminPanel;
pub use home::Home;
