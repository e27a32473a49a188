//! Remote API
//!
//! Public surface of the remote module; other modules import from here.

pub use crate::remote::client::{resolve_image_url, ApiClient};
pub use crate::remote::error::{ApiError, ApiResult};
pub use crate::remote::traits::AttendanceService;
pub use crate::remote::types::{
    display_date, display_time, Attendance, AttendanceMarkRequest, AttendanceStatus, Event,
    EventDetails, EventId, EventStatus, Gift, NewEvent, NewGift, User, UserId, Winner,
};
