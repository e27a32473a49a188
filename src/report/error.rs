//! Report Error Types

use crate::core::error_handling::ContextualError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    /// The event has not been drawn yet
    #[error("No winners to export for '{event}'")]
    NoWinners { event: String },

    #[error("Unknown report format '{0}' (expected text, csv, json or markdown)")]
    UnknownFormat(String),

    #[error("Failed to encode report: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Failed to write report to {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl ContextualError for ReportError {
    fn is_user_actionable(&self) -> bool {
        matches!(
            self,
            ReportError::NoWinners { .. } | ReportError::UnknownFormat(_)
        )
    }

    fn user_message(&self) -> Option<&str> {
        match self {
            ReportError::NoWinners { .. } => Some("No winners to export. Draw the raffle first."),
            ReportError::UnknownFormat(_) => {
                Some("Unknown report format (expected text, csv, json or markdown)")
            }
            _ => None,
        }
    }
}

pub type ReportResult<T> = Result<T, ReportError>;
