//! Attendance check-in
//!
//! Converts a stream of scanned QR payloads into attendance marks, with the
//! debounce and feedback lifecycle a scanner overlay needs.

pub mod controller;
pub mod directory;
pub mod error;
pub mod feedback;
pub mod session;

pub use controller::{
    parse_user_id, CheckinController, CheckinTimings, IgnoreReason, MarkOutcome, ScanOutcome,
};
pub use directory::ParticipantDirectory;
pub use error::{CheckinError, CheckinResult};
pub use feedback::{CheckinPhase, ControllerState, FeedbackState};
pub use session::{CheckinSession, FeedbackRenderer, SessionConfig, SessionHandle, SessionSummary};

#[cfg(test)]
mod tests;
