//! Collaborator seams between the check-in core and the API

use crate::remote::error::ApiResult;
use crate::remote::types::{AttendanceMarkRequest, Event, EventId, User};
use async_trait::async_trait;

/// The remote operations a check-in session depends on
#[async_trait]
pub trait AttendanceService: Send + Sync {
    /// Record a participant as present; a single attempt, no retry
    async fn mark_attendance(&self, request: &AttendanceMarkRequest) -> ApiResult<()>;

    /// Load an event with its attendances
    async fn fetch_event(&self, event_id: EventId) -> ApiResult<Event>;

    /// Load the user directory
    async fn list_users(&self) -> ApiResult<Vec<User>>;
}
