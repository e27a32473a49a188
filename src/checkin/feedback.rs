//! Feedback and controller state shown to the operator

pub const PROCESSING_MESSAGE: &str = "Processing...";
pub const INVALID_CODE_MESSAGE: &str = "Invalid QR Code";
pub const MARK_FAILED_MESSAGE: &str = "Failed to mark attendance";
/// Used in the success banner when the scanned user is not in the directory
pub const FALLBACK_DISPLAY_NAME: &str = "User";

/// What the scanner overlay currently shows
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FeedbackState {
    /// Ready for the next scan
    #[default]
    None,
    /// A mark request is in flight
    Info(String),
    /// The last mark succeeded
    Success(String),
    /// The last mark failed or the code was unreadable
    Error(String),
}

impl FeedbackState {
    pub fn success_for(display_name: &str) -> Self {
        FeedbackState::Success(format!("{display_name} marked Present!"))
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            FeedbackState::None => None,
            FeedbackState::Info(m) | FeedbackState::Success(m) | FeedbackState::Error(m) => {
                Some(m)
            }
        }
    }

    pub fn phase(&self) -> CheckinPhase {
        match self {
            FeedbackState::None => CheckinPhase::Idle,
            FeedbackState::Info(_) => CheckinPhase::InFlight,
            FeedbackState::Success(_) => CheckinPhase::Success,
            FeedbackState::Error(_) => CheckinPhase::Error,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, FeedbackState::None)
    }

    pub fn is_in_flight(&self) -> bool {
        matches!(self, FeedbackState::Info(_))
    }
}

/// States of the check-in cycle; there is no terminal state
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum CheckinPhase {
    Idle,
    InFlight,
    Success,
    Error,
}

/// State owned by one open scanning session
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ControllerState {
    /// Most recently accepted raw code; cleared on reset
    pub last_scanned_code: Option<String>,
    pub feedback: FeedbackState,
}

impl ControllerState {
    pub fn phase(&self) -> CheckinPhase {
        self.feedback.phase()
    }
}
