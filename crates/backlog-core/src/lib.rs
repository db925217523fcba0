pub mod config;
pub mod error;
pub mod notification;
pub mod result;
pub mod selection;

pub use config::AppConfig;
pub use error::BacklogError;
pub use notification::{Notification, NotificationLevel};
pub use result::BacklogResult;
pub use selection::SelectionSet;
