pub mod config;
pub mod error;
pub mod file_system;
pub mod legacy;
pub mod notification;
pub mod notification_list;

pub use config::CliConfig;
pub use error::NotificationError;
pub use file_system::{FileSystem, FileSystemError};
pub use legacy::{parse_notification, LegacyNotification, ParsedNotification};
pub use notification::{Notification, DEFAULT_NOTIFICATION_NAME};
pub use notification_list::{
    load_notification_list, next_pending, parse_notification_list, sort_notifications,
};
