//! Command Error Types
//!
//! Wraps the module errors a command can hit so the binary has one fatal
//! error path.

use crate::app::cli::config::ConfigError;
use crate::checkin::CheckinError;
use crate::core::error_handling::ContextualError;
use crate::core::validation::ValidationError;
use crate::remote::api::ApiError;
use crate::report::ReportError;
use crate::scanner::ScanError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Checkin(#[from] CheckinError),

    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error(transparent)]
    Report(#[from] ReportError),

    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error("Terminal IO failed: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    fn inner(&self) -> Option<&dyn ContextualError> {
        match self {
            AppError::Api(e) => Some(e),
            AppError::Config(e) => Some(e),
            AppError::Checkin(e) => Some(e),
            AppError::Scan(e) => Some(e),
            AppError::Report(e) => Some(e),
            AppError::Invalid(e) => Some(e),
            AppError::Io(_) => None,
        }
    }
}

impl ContextualError for AppError {
    fn is_user_actionable(&self) -> bool {
        self.inner().is_some_and(|e| e.is_user_actionable())
    }

    fn user_message(&self) -> Option<&str> {
        self.inner().and_then(|e| e.user_message())
    }
}

pub type AppResult<T> = Result<T, AppError>;
