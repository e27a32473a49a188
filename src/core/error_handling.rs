//! Generic error handling utilities
//!
//! Provides unified error reporting that works across the error types of
//! each module while keeping their domain-specific messages.

/// Trait for errors that can distinguish between user-actionable and system errors
///
/// When `is_user_actionable()` returns `true`, `user_message()` should return
/// `Some(message)` with a helpful, actionable message. When it returns `false`,
/// `user_message()` should return `None`.
pub trait ContextualError: std::error::Error {
    /// Returns true if this error carries a message that should be shown to the
    /// operator as-is (bad arguments, missing token, invalid config values)
    fn is_user_actionable(&self) -> bool;

    /// The message to show for user-actionable errors
    fn user_message(&self) -> Option<&str>;
}

/// Log a fatal error with a level of detail matching its kind
///
/// User-actionable errors print their own message; system errors print the
/// operation context, with the underlying error available at debug level.
pub fn log_error_with_context<E: ContextualError + std::fmt::Debug>(
    error: &E,
    operation_context: &str,
) {
    match error.user_message().filter(|_| error.is_user_actionable()) {
        Some(user_msg) => log::error!("FATAL: {}", user_msg),
        None => log::error!("FATAL: {}: {}", operation_context, error),
    }
    log::debug!("DEBUG_DETAILS: {:?}", error);
}

/// Render an error for the terminal, preferring the user message when present
pub fn describe_error<E: ContextualError>(error: &E, operation_context: &str) -> String {
    match error.user_message().filter(|_| error.is_user_actionable()) {
        Some(user_msg) => user_msg.to_string(),
        None => format!("{operation_context}: {error}"),
    }
}
