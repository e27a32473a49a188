//! Scanner Error Types

use thiserror::Error;

/// Scanner error types
#[derive(Debug, Error)]
pub enum ScanError {
    /// Reading from the underlying device or file failed
    #[error("IO error while reading scans: {0}")]
    Io(#[from] std::io::Error),

    /// A replay file could not be used
    #[error("Replay file {path}: {message}")]
    Replay { path: String, message: String },
}

impl crate::core::error_handling::ContextualError for ScanError {
    fn is_user_actionable(&self) -> bool {
        matches!(self, ScanError::Replay { .. })
    }

    fn user_message(&self) -> Option<&str> {
        match self {
            ScanError::Replay { message, .. } => Some(message),
            ScanError::Io(_) => None,
        }
    }
}

pub type ScanResult<T> = Result<T, ScanError>;
