//! Check-in state machine
//!
//! Turns a noisy stream of scanned payloads into at most one mark request per
//! physical scan. The controller itself never waits: it tells its driver what
//! to do (dispatch a request, arm a reset timer) and is told when remote work
//! finishes.
//!
//! ```text
//! Idle --accept--> InFlight --ok--> Success --1200ms--> Idle
//!   |                  \--fail--> Error ----2000ms--> Idle
//!   \--unreadable code------------^
//! ```

use crate::checkin::feedback::{
    CheckinPhase, ControllerState, FeedbackState, FALLBACK_DISPLAY_NAME, INVALID_CODE_MESSAGE,
    MARK_FAILED_MESSAGE, PROCESSING_MESSAGE,
};
use crate::remote::api::{AttendanceMarkRequest, EventId, UserId};
use std::time::Duration;

/// How long each terminal banner stays up before the controller re-arms
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckinTimings {
    pub success_reset: Duration,
    pub error_reset: Duration,
    pub invalid_reset: Duration,
}

impl Default for CheckinTimings {
    fn default() -> Self {
        Self {
            success_reset: Duration::from_millis(1200),
            error_reset: Duration::from_millis(2000),
            invalid_reset: Duration::from_millis(2000),
        }
    }
}

/// Why a scan was dropped without any effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum IgnoreReason {
    /// Absent or empty payload
    Empty,
    /// A mark request is outstanding
    InFlight,
    /// Same code as the one already claimed
    Duplicate,
}

/// Result of feeding one payload to the controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    Ignored(IgnoreReason),
    /// Unreadable code; the driver arms a reset after `reset_after`
    Rejected { reset_after: Duration },
    /// The driver must issue exactly this request
    Dispatch(AttendanceMarkRequest),
}

/// How the remote side answered a dispatched request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkOutcome {
    Marked { display_name: Option<String> },
    Failed { reason: String },
}

pub struct CheckinController {
    event_id: EventId,
    timings: CheckinTimings,
    state: ControllerState,
}

impl CheckinController {
    pub fn new(event_id: EventId, timings: CheckinTimings) -> Self {
        Self {
            event_id,
            timings,
            state: ControllerState::default(),
        }
    }

    pub fn event_id(&self) -> EventId {
        self.event_id
    }

    pub fn timings(&self) -> CheckinTimings {
        self.timings
    }

    pub fn state(&self) -> &ControllerState {
        &self.state
    }

    pub fn phase(&self) -> CheckinPhase {
        self.state.phase()
    }

    /// Feed one decoded payload.
    ///
    /// Guards run in order: absent or empty payload, request in flight, same
    /// code as the last accepted one. An accepted code is claimed before
    /// anything else happens so a repeat frame can never slip through. A
    /// whitespace-only payload passes the guards and is rejected as invalid.
    pub fn handle_scan(&mut self, raw: Option<&str>) -> ScanOutcome {
        let code = match raw {
            Some(code) if !code.is_empty() => code,
            _ => return ScanOutcome::Ignored(IgnoreReason::Empty),
        };
        if self.state.feedback.is_in_flight() {
            return ScanOutcome::Ignored(IgnoreReason::InFlight);
        }
        if self.state.last_scanned_code.as_deref() == Some(code) {
            return ScanOutcome::Ignored(IgnoreReason::Duplicate);
        }

        self.state.last_scanned_code = Some(code.to_string());

        match parse_user_id(code) {
            Some(user_id) => {
                log::debug!("Check-in: accepted user {user_id}, marking present");
                self.state.feedback = FeedbackState::Info(PROCESSING_MESSAGE.to_string());
                ScanOutcome::Dispatch(AttendanceMarkRequest {
                    event_id: self.event_id,
                    user_id,
                })
            }
            None => {
                log::debug!("Check-in: unreadable code {code:?}");
                self.state.feedback = FeedbackState::Error(INVALID_CODE_MESSAGE.to_string());
                ScanOutcome::Rejected {
                    reset_after: self.timings.invalid_reset,
                }
            }
        }
    }

    /// Apply the answer to the outstanding request and return the reset delay.
    ///
    /// Returns `None` (and changes nothing) when no request is outstanding.
    pub fn complete_mark(&mut self, outcome: MarkOutcome) -> Option<Duration> {
        if !self.state.feedback.is_in_flight() {
            log::debug!("Check-in: dropping mark result with no request in flight");
            return None;
        }

        match outcome {
            MarkOutcome::Marked { display_name } => {
                let name = display_name.as_deref().unwrap_or(FALLBACK_DISPLAY_NAME);
                self.state.feedback = FeedbackState::success_for(name);
                Some(self.timings.success_reset)
            }
            MarkOutcome::Failed { reason } => {
                log::warn!("Check-in: failed to mark attendance: {reason}");
                self.state.feedback = FeedbackState::Error(MARK_FAILED_MESSAGE.to_string());
                Some(self.timings.error_reset)
            }
        }
    }

    /// Back to idle; the next scan is accepted even if it repeats the last code
    pub fn reset(&mut self) {
        self.state = ControllerState::default();
    }
}

/// Read the user id a QR payload starts with.
///
/// Leading whitespace and a sign are allowed and anything after the first
/// run of digits is ignored, so `"42abc"` and `"42.7"` both name user 42.
/// Fails when no digit follows, or the id does not fit an `i64`.
pub fn parse_user_id(code: &str) -> Option<UserId> {
    let rest = code.trim_start();
    let (negative, rest) = match rest.as_bytes().first() {
        Some(b'-') => (true, &rest[1..]),
        Some(b'+') => (false, &rest[1..]),
        _ => (false, rest),
    };
    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let digits = &rest[..digits_end];
    if digits.is_empty() {
        return None;
    }
    let id = digits.parse::<UserId>().ok()?;
    Some(if negative { -id } else { id })
}
