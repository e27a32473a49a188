//! Terminal rendering of check-in feedback

use crate::checkin::{ControllerState, FeedbackRenderer, FeedbackState, SessionSummary};
use crate::core::styles::StyleRole;
use std::io::Write;

/// Writes one banner line per state change
pub struct TerminalRenderer<W: Write + Send> {
    out: W,
    color: bool,
}

impl TerminalRenderer<std::io::Stdout> {
    pub fn stdout(color: bool) -> Self {
        Self::new(std::io::stdout(), color)
    }
}

impl<W: Write + Send> TerminalRenderer<W> {
    pub fn new(out: W, color: bool) -> Self {
        Self { out, color }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, text: &str) {
        if let Err(e) = writeln!(self.out, "{text}").and_then(|_| self.out.flush()) {
            log::warn!("Check-in: could not write to terminal: {e}");
        }
    }
}

/// The banner text and its style for a feedback state
pub fn banner(feedback: &FeedbackState) -> (StyleRole, String) {
    match feedback {
        FeedbackState::None => (StyleRole::Dim, "Ready to scan".to_string()),
        FeedbackState::Info(message) => (StyleRole::Pending, format!("... {message}")),
        FeedbackState::Success(message) => (StyleRole::Present, format!("OK  {message}")),
        FeedbackState::Error(message) => (StyleRole::Error, format!("ERR {message}")),
    }
}

impl<W: Write + Send> FeedbackRenderer for TerminalRenderer<W> {
    fn render(&mut self, state: &ControllerState) {
        let (role, text) = banner(&state.feedback);
        let painted = role.paint(&text, self.color);
        self.line(&painted);
    }

    fn session_closed(&mut self, summary: &SessionSummary) {
        let mut text = format!(
            "Check-in closed: {} marked, {} failed, {} invalid",
            summary.marked, summary.failed, summary.invalid
        );
        if let Some(present) = summary.present_count {
            text.push_str(&format!(", {present} present in total"));
        }
        let painted = StyleRole::Header.paint(&text, self.color);
        self.line(&painted);
    }
}
