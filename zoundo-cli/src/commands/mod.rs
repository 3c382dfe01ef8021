// zoundo-cli/src/commands/mod.rs
pub mod notifications;
pub mod request;
pub mod session;
pub mod tracks;
pub mod upload;

pub use notifications::{handle_notifications, NotificationsCommands};
pub use request::{handle_request, RequestArgs};
pub use session::{handle_login, handle_logout, handle_me};
pub use tracks::{handle_tracks, TracksCommands};
pub use upload::handle_upload;
