//! Shared helpers for integration tests
//!
//! An in-memory attendance service and a renderer that records every
//! overlay frame with the (paused) tokio time it was drawn at.

#![allow(dead_code)]

use async_trait::async_trait;
use raffle_admin::checkin::{ControllerState, FeedbackRenderer, FeedbackState, SessionSummary};
use raffle_admin::remote::api::{
    ApiError, ApiResult, Attendance, AttendanceMarkRequest, AttendanceService, AttendanceStatus,
    Event, EventId, EventStatus, User, UserId,
};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::Instant;

pub const EVENT_ID: EventId = 7;
pub const MARK_LATENCY: Duration = Duration::from_millis(100);

pub fn user(id: UserId, name: &str) -> User {
    User {
        id,
        name: name.to_string(),
        location: Some("Lagos".to_string()),
        photo_url: None,
        created_at: None,
    }
}

/// Attendance service backed by a list of users; marks are remembered so
/// refreshed events report them as present
#[derive(Clone)]
pub struct MemoryService {
    users: Vec<User>,
    marks: Arc<Mutex<Vec<AttendanceMarkRequest>>>,
    rejected: HashSet<UserId>,
}

impl MemoryService {
    pub fn new(users: Vec<User>) -> Self {
        Self {
            users,
            marks: Arc::new(Mutex::new(Vec::new())),
            rejected: HashSet::new(),
        }
    }

    /// The API refuses to mark this user
    pub fn rejecting(mut self, user_id: UserId) -> Self {
        self.rejected.insert(user_id);
        self
    }

    pub fn marks(&self) -> Vec<AttendanceMarkRequest> {
        self.marks.lock().unwrap().clone()
    }
}

#[async_trait]
impl AttendanceService for MemoryService {
    async fn mark_attendance(&self, request: &AttendanceMarkRequest) -> ApiResult<()> {
        self.marks.lock().unwrap().push(*request);
        tokio::time::sleep(MARK_LATENCY).await;
        if self.rejected.contains(&request.user_id) {
            return Err(ApiError::Status {
                status: 400,
                message: "User is not a participant of this event".to_string(),
            });
        }
        Ok(())
    }

    async fn fetch_event(&self, event_id: EventId) -> ApiResult<Event> {
        let present: HashSet<UserId> = self
            .marks
            .lock()
            .unwrap()
            .iter()
            .filter(|m| !self.rejected.contains(&m.user_id))
            .map(|m| m.user_id)
            .collect();
        Ok(Event {
            id: event_id,
            title: "Year End Party".to_string(),
            date: "2025-12-20".to_string(),
            enrollment_key: None,
            status: EventStatus::Active,
            gifts: vec![],
            winners: vec![],
            attendances: self
                .users
                .iter()
                .map(|u| Attendance {
                    user: u.clone(),
                    status: if present.contains(&u.id) {
                        AttendanceStatus::Present
                    } else {
                        AttendanceStatus::Invited
                    },
                })
                .collect(),
        })
    }

    async fn list_users(&self) -> ApiResult<Vec<User>> {
        Ok(self.users.clone())
    }
}

/// Renderer that keeps every frame it is asked to draw
#[derive(Clone, Default)]
pub struct FrameRecorder {
    frames: Arc<Mutex<Vec<(Instant, FeedbackState)>>>,
    summary: Arc<Mutex<Option<SessionSummary>>>,
}

impl FrameRecorder {
    pub fn feedback(&self) -> Vec<FeedbackState> {
        self.frames
            .lock()
            .unwrap()
            .iter()
            .map(|(_, f)| f.clone())
            .collect()
    }

    /// When `state` was first drawn, relative to `origin`
    pub fn first_shown(&self, state: &FeedbackState, origin: Instant) -> Option<Duration> {
        self.frames
            .lock()
            .unwrap()
            .iter()
            .find(|(_, f)| f == state)
            .map(|(at, _)| *at - origin)
    }

    pub fn closed_with(&self) -> Option<SessionSummary> {
        self.summary.lock().unwrap().clone()
    }
}

impl FeedbackRenderer for FrameRecorder {
    fn render(&mut self, state: &ControllerState) {
        self.frames
            .lock()
            .unwrap()
            .push((Instant::now(), state.feedback.clone()));
    }

    fn session_closed(&mut self, summary: &SessionSummary) {
        *self.summary.lock().unwrap() = Some(summary.clone());
    }
}

pub fn processing() -> FeedbackState {
    FeedbackState::Info("Processing...".to_string())
}

pub fn marked(name: &str) -> FeedbackState {
    FeedbackState::Success(format!("{name} marked Present!"))
}

pub fn failed(message: &str) -> FeedbackState {
    FeedbackState::Error(message.to_string())
}
