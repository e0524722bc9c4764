use std::fmt;
use std::fs;
use std::io;
use std::path::Path;
use std::time::{Duration, Instant};

/// Custom error types for file operations
#[derive(Debug)]
pub enum FileSystemError {
    Io(io::Error),
    Timeout,
    PermissionDenied,
    ConcurrentAccess,
}

impl From<io::Error> for FileSystemError {
    fn from(error: io::Error) -> Self {
        match error.kind() {
            io::ErrorKind::PermissionDenied => FileSystemError::PermissionDenied,
            io::ErrorKind::WouldBlock => FileSystemError::ConcurrentAccess,
            _ => FileSystemError::Io(error),
        }
    }
}

impl fmt::Display for FileSystemError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileSystemError::Io(e) => write!(f, "I/O error: {}", e),
            FileSystemError::Timeout => write!(f, "File operation timed out"),
            FileSystemError::PermissionDenied => write!(f, "Permission denied"),
            FileSystemError::ConcurrentAccess => {
                write!(f, "File is locked by another process")
            }
        }
    }
}

impl std::error::Error for FileSystemError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FileSystemError::Io(e) => Some(e),
            _ => None,
        }
    }
}

/// Reads schedule files that may be rewritten by another process
pub struct FileSystem;

impl FileSystem {
    /// Maximum number of retry attempts for file operations
    const MAX_RETRIES: u32 = 3;

    /// Delay between retry attempts
    const RETRY_DELAY: Duration = Duration::from_millis(50);

    /// Timeout for file operations
    const OPERATION_TIMEOUT: Duration = Duration::from_secs(5);

    /// Safely reads file content with retry logic for concurrent access
    pub fn read_file_safe<P: AsRef<Path>>(path: P) -> Result<String, FileSystemError> {
        let path = path.as_ref();

        Self::with_retry(|| fs::read_to_string(path).map_err(FileSystemError::from))
    }

    /// Checks if a path exists and is a regular file
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        let path = path.as_ref();
        path.exists() && path.is_file()
    }

    /// Retry wrapper for file operations with linear backoff
    fn with_retry<F, T>(mut operation: F) -> Result<T, FileSystemError>
    where
        F: FnMut() -> Result<T, FileSystemError>,
    {
        let start_time = Instant::now();
        let mut attempt = 0;

        loop {
            if start_time.elapsed() > Self::OPERATION_TIMEOUT {
                return Err(FileSystemError::Timeout);
            }

            match operation() {
                Ok(result) => return Ok(result),
                Err(FileSystemError::ConcurrentAccess) if attempt < Self::MAX_RETRIES => {
                    attempt += 1;
                    log::debug!("file busy, retry {} of {}", attempt, Self::MAX_RETRIES);
                    std::thread::sleep(Self::RETRY_DELAY * attempt);
                    continue;
                }
                Err(FileSystemError::Io(ref io_err))
                    if io_err.kind() == io::ErrorKind::Interrupted
                        && attempt < Self::MAX_RETRIES =>
                {
                    attempt += 1;
                    log::debug!("read interrupted, retry {} of {}", attempt, Self::MAX_RETRIES);
                    std::thread::sleep(Self::RETRY_DELAY * attempt);
                    continue;
                }
                Err(err) => return Err(err),
            }
        }
    }
}
