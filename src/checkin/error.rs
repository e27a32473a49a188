//! Check-in session error types

use crate::core::error_handling::ContextualError;
use thiserror::Error;

/// Errors surfaced by a check-in session handle
///
/// Scan and remote failures never appear here: they end as feedback on the
/// overlay. These cover the session itself going away.
#[derive(Debug, Error)]
pub enum CheckinError {
    #[error("Check-in session is already closed")]
    SessionClosed,

    #[error("Check-in session task ended abnormally: {reason}")]
    SessionAborted { reason: String },

    #[error("Scan source failed: {0}")]
    Source(#[from] crate::scanner::ScanError),
}

impl ContextualError for CheckinError {
    fn is_user_actionable(&self) -> bool {
        match self {
            CheckinError::Source(e) => e.is_user_actionable(),
            _ => false,
        }
    }

    fn user_message(&self) -> Option<&str> {
        match self {
            CheckinError::Source(e) => e.user_message(),
            _ => None,
        }
    }
}

pub type CheckinResult<T> = Result<T, CheckinError>;
