use std::fmt;

use crate::file_system::FileSystemError;

/// Errors that can occur while reading notification data
#[derive(Debug)]
pub enum NotificationError {
    /// Payload is not valid JSON or does not match any notification format
    Parse(serde_json::Error),
    /// A notification list was expected but the top-level value is not an array
    NotAList,
    /// One entry of a notification list could not be parsed
    InvalidEntry {
        index: usize,
        source: serde_json::Error,
    },
    /// Reading the schedule file failed
    FileSystem(FileSystemError),
}

impl fmt::Display for NotificationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotificationError::Parse(e) => write!(f, "Notification parsing failed: {}", e),
            NotificationError::NotAList => {
                write!(f, "Expected a JSON array of notifications")
            }
            NotificationError::InvalidEntry { index, source } => {
                write!(f, "Invalid notification at index {}: {}", index, source)
            }
            NotificationError::FileSystem(e) => {
                write!(f, "Failed to read notifications: {}", e)
            }
        }
    }
}

impl std::error::Error for NotificationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            NotificationError::Parse(e) => Some(e),
            NotificationError::InvalidEntry { source, .. } => Some(source),
            NotificationError::FileSystem(e) => Some(e),
            NotificationError::NotAList => None,
        }
    }
}

impl From<serde_json::Error> for NotificationError {
    fn from(error: serde_json::Error) -> Self {
        NotificationError::Parse(error)
    }
}

impl From<FileSystemError> for NotificationError {
    fn from(error: FileSystemError) -> Self {
        NotificationError::FileSystem(error)
    }
}
