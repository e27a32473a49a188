//! Validation utilities for arguments and configuration values

use thiserror::Error;

/// A value supplied on the command line or in the config file was rejected
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct ValidationError {
    pub message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl crate::core::error_handling::ContextualError for ValidationError {
    fn is_user_actionable(&self) -> bool {
        true
    }

    fn user_message(&self) -> Option<&str> {
        Some(&self.message)
    }
}

/// Validate a strictly positive integer (prize ranks, delays)
pub fn validate_positive_int(value: &str) -> Result<u64, String> {
    match value.trim().parse::<u64>() {
        Ok(0) => Err("Value must be greater than 0".to_string()),
        Ok(n) => Ok(n),
        Err(_) => Err(format!("'{}' is not a valid positive integer", value)),
    }
}

/// Validate an API base URL and strip any trailing slash
pub fn validate_api_url(value: &str) -> Result<String, String> {
    let trimmed = value.trim().trim_end_matches('/');
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(format!("API URL '{}' must start with http:// or https://", value));
    }
    if trimmed.split("://").nth(1).map_or(true, str::is_empty) {
        return Err(format!("API URL '{}' has no host", value));
    }
    Ok(trimmed.to_string())
}

/// Validate an event date: `YYYY-MM-DD` or a full RFC 3339 timestamp
pub fn validate_event_date(value: &str) -> Result<String, String> {
    let trimmed = value.trim();
    let is_date = chrono::NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").is_ok();
    let is_timestamp = chrono::DateTime::parse_from_rfc3339(trimmed).is_ok();
    if is_date || is_timestamp {
        Ok(trimmed.to_string())
    } else {
        Err(format!(
            "'{}' is not a valid date (expected YYYY-MM-DD or RFC 3339)",
            value
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_positive_int() {
        assert_eq!(validate_positive_int("3"), Ok(3));
        assert!(validate_positive_int("0").is_err());
        assert!(validate_positive_int("-1").is_err());
        assert!(validate_positive_int("abc").is_err());
    }

    #[test]
    fn test_validate_api_url_strips_trailing_slash() {
        assert_eq!(
            validate_api_url("https://api.example.com/"),
            Ok("https://api.example.com".to_string())
        );
        assert_eq!(
            validate_api_url("http://localhost:4000"),
            Ok("http://localhost:4000".to_string())
        );
    }

    #[test]
    fn test_validate_api_url_rejects_missing_scheme() {
        assert!(validate_api_url("api.example.com").is_err());
        assert!(validate_api_url("ftp://api.example.com").is_err());
    }

    #[test]
    fn test_validate_event_date() {
        assert!(validate_event_date("2025-12-24").is_ok());
        assert!(validate_event_date("2025-12-24T18:00:00Z").is_ok());
        assert!(validate_event_date("24/12/2025").is_err());
        assert!(validate_event_date("2025-13-01").is_err());
    }
}
