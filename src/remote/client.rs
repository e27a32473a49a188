//! HTTP client for the raffle API

use crate::remote::error::{ApiError, ApiResult};
use crate::remote::traits::AttendanceService;
use crate::remote::types::{
    AttendanceMarkRequest, Event, EventId, NewEvent, NewGift, NewParticipants, User, UserId,
};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Client for the raffle administration API.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// Creates a client for `base_url` (no trailing slash) authenticating with `token`.
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> ApiResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.filter(|t| !t.trim().is_empty()),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fails early when no token is configured; the API rejects anonymous calls.
    pub fn ensure_authenticated(&self) -> ApiResult<&str> {
        self.token.as_deref().ok_or(ApiError::NotAuthenticated)
    }

    fn url(&self, path: &str) -> ApiResult<String> {
        if self.base_url.is_empty() {
            return Err(ApiError::InvalidUrl(
                "No API URL configured (set `api_url` in the config file or RAFFLE_API_URL)"
                    .to_string(),
            ));
        }
        Ok(format!("{}{}", self.base_url, path))
    }

    fn request(&self, method: reqwest::Method, path: &str) -> ApiResult<reqwest::RequestBuilder> {
        let token = self.ensure_authenticated()?;
        let url = self.url(path)?;
        log::debug!("{} {}", method, url);
        Ok(self.http.request(method, url).bearer_auth(token))
    }

    async fn send(builder: reqwest::RequestBuilder, endpoint: &str) -> ApiResult<reqwest::Response> {
        let response = builder.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        // Error bodies are usually {"message": ".."} or {"error": ".."}
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| {
                v.get("message")
                    .or_else(|| v.get("error"))
                    .and_then(|m| m.as_str())
                    .map(str::to_string)
            })
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("Unknown error")
                    .to_string()
            });
        log::warn!("{} failed with {}: {}", endpoint, status.as_u16(), message);
        Err(ApiError::Status {
            status: status.as_u16(),
            message,
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let response = Self::send(self.request(reqwest::Method::GET, path)?, path).await?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| ApiError::Decode {
            endpoint: path.to_string(),
            reason: e.to_string(),
        })
    }

    async fn post_json<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> ApiResult<()> {
        Self::send(self.request(reqwest::Method::POST, path)?.json(body), path).await?;
        Ok(())
    }

    async fn delete(&self, path: &str) -> ApiResult<()> {
        Self::send(self.request(reqwest::Method::DELETE, path)?, path).await?;
        Ok(())
    }

    /// `GET /events`
    pub async fn list_events(&self) -> ApiResult<Vec<Event>> {
        self.get_json("/events").await
    }

    /// `POST /events`
    pub async fn create_event(&self, event: &NewEvent) -> ApiResult<()> {
        self.post_json("/events", event).await
    }

    /// `DELETE /events/{id}`
    pub async fn delete_event(&self, event_id: EventId) -> ApiResult<()> {
        self.delete(&format!("/events/{event_id}")).await
    }

    /// `POST /events/{id}/gifts`
    pub async fn add_gift(&self, event_id: EventId, gift: &NewGift) -> ApiResult<()> {
        self.post_json(&format!("/events/{event_id}/gifts"), gift).await
    }

    /// `DELETE /events/{id}/gifts/{giftId}`
    pub async fn delete_gift(&self, event_id: EventId, gift_id: i64) -> ApiResult<()> {
        self.delete(&format!("/events/{event_id}/gifts/{gift_id}"))
            .await
    }

    /// `POST /events/{id}/participants`
    pub async fn add_participants(&self, event_id: EventId, user_ids: &[UserId]) -> ApiResult<()> {
        let body = NewParticipants {
            user_ids: user_ids.to_vec(),
        };
        self.post_json(&format!("/events/{event_id}/participants"), &body)
            .await
    }
}

#[async_trait]
impl AttendanceService for ApiClient {
    async fn mark_attendance(&self, request: &AttendanceMarkRequest) -> ApiResult<()> {
        self.post_json("/attendance/mark", request).await
    }

    async fn fetch_event(&self, event_id: EventId) -> ApiResult<Event> {
        self.get_json(&format!("/events/{event_id}")).await
    }

    async fn list_users(&self) -> ApiResult<Vec<User>> {
        self.get_json("/users").await
    }
}

/// Resolve an image path from the API into a fetchable URL
///
/// Absolute URLs are returned unchanged. Relative paths (which may use
/// Windows separators when uploaded from the server's disk) are normalised
/// and prefixed with the API base URL.
pub fn resolve_image_url(base_url: &str, url: Option<&str>) -> Option<String> {
    let url = url.filter(|u| !u.is_empty())?;
    if url.starts_with("http://") || url.starts_with("https://") {
        return Some(url.to_string());
    }

    let mut normalized = url.replace('\\', "/");
    if !normalized.starts_with('/') {
        normalized.insert(0, '/');
    }
    Some(format!("{}{}", base_url.trim_end_matches('/'), normalized))
}
