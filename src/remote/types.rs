//! Data types exchanged with the raffle API
//!
//! Field names follow the API's camelCase JSON. Timestamps stay as strings
//! and are parsed only for display, since the API mixes plain dates and
//! full timestamps.

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Event identifier
pub type EventId = i64;
/// User identifier (also the payload of a participant's QR code)
pub type UserId = i64;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub name: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum EventStatus {
    Upcoming,
    Active,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Gift {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub image_url: String,
    pub rank: u32,
    #[serde(default)]
    pub event_id: Option<EventId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Winner {
    pub id: i64,
    pub user: User,
    pub gift: Gift,
    pub won_at: String,
    #[serde(default)]
    pub event_id: Option<EventId>,
    #[serde(default)]
    pub user_id: Option<UserId>,
    #[serde(default)]
    pub gift_id: Option<i64>,
}

/// Attendance status as reported by the API; unknown values are kept verbatim
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AttendanceStatus {
    Present,
    Invited,
    Other(String),
}

impl From<String> for AttendanceStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "PRESENT" => AttendanceStatus::Present,
            "INVITED" => AttendanceStatus::Invited,
            _ => AttendanceStatus::Other(value),
        }
    }
}

impl From<AttendanceStatus> for String {
    fn from(value: AttendanceStatus) -> Self {
        value.to_string()
    }
}

impl std::fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttendanceStatus::Present => write!(f, "PRESENT"),
            AttendanceStatus::Invited => write!(f, "INVITED"),
            AttendanceStatus::Other(raw) => write!(f, "{raw}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attendance {
    pub user: User,
    pub status: AttendanceStatus,
}

/// An event as returned by `GET /events/{id}`, with its nested collections
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: EventId,
    pub title: String,
    pub date: String,
    #[serde(default)]
    pub enrollment_key: Option<String>,
    pub status: EventStatus,
    #[serde(default)]
    pub gifts: Vec<Gift>,
    #[serde(default)]
    pub winners: Vec<Winner>,
    #[serde(default)]
    pub attendances: Vec<Attendance>,
}

/// The detail view of an event; `GET /events/{id}` returns the nested collections
pub type EventDetails = Event;

impl Event {
    /// Prizes ordered by rank, first prize first
    pub fn gifts_by_rank(&self) -> Vec<&Gift> {
        let mut gifts: Vec<&Gift> = self.gifts.iter().collect();
        gifts.sort_by_key(|g| g.rank);
        gifts
    }

    /// Winners ordered by the rank of the prize they won
    pub fn winners_by_rank(&self) -> Vec<&Winner> {
        let mut winners: Vec<&Winner> = self.winners.iter().collect();
        winners.sort_by_key(|w| w.gift.rank);
        winners
    }

    pub fn is_participant(&self, user_id: UserId) -> bool {
        self.attendances.iter().any(|a| a.user.id == user_id)
    }

    pub fn present_count(&self) -> usize {
        self.attendances
            .iter()
            .filter(|a| a.status == AttendanceStatus::Present)
            .count()
    }
}

/// Body of `POST /attendance/mark`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceMarkRequest {
    pub event_id: EventId,
    pub user_id: UserId,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewEvent {
    pub title: String,
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewGift {
    pub name: String,
    pub image_url: String,
    pub rank: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewParticipants {
    pub user_ids: Vec<UserId>,
}

/// Render an API date or timestamp as a local calendar date
pub fn display_date(raw: &str) -> String {
    if let Ok(ts) = chrono::DateTime::parse_from_rfc3339(raw) {
        return ts.with_timezone(&chrono::Local).format("%Y-%m-%d").to_string();
    }
    if let Ok(date) = chrono::NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.format("%Y-%m-%d").to_string();
    }
    raw.to_string()
}

/// Render an API timestamp as a local wall-clock time
pub fn display_time(raw: &str) -> String {
    match chrono::DateTime::parse_from_rfc3339(raw) {
        Ok(ts) => ts.with_timezone(&chrono::Local).format("%H:%M:%S").to_string(),
        Err(_) => raw.to_string(),
    }
}
