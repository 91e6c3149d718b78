//! Resource client
//!
//! One method per (resource, operation) pair on the site's REST surface.
//! Each method validates required fields, builds the request, and either
//! returns the parsed JSON body or raises a single failure kind
//! ([`Error::Api`]) carrying a human-readable message. Response bodies
//! are returned unnormalized; normalization happens in the content store.

use async_trait::async_trait;
use serde_json::Value;

use marquee_common::api::{
    AboutPayload, AlbumPayload, AlbumsEnvelope, CredentialsUpdate, ErrorBody, HeroPayload,
    LoginRequest, LoginResponse, ToursEnvelope, TourPayload, VideoPayload, VideosEnvelope,
};
use marquee_common::{Error, Result};

use crate::video_id;

/// Typed CRUD contract for every content resource.
///
/// The content store and editor sessions depend on this trait rather than
/// on the concrete [`ResourceClient`], which keeps the synchronization
/// logic testable without a live backend.
#[async_trait]
pub trait ContentApi: Send + Sync {
    async fn fetch_hero(&self) -> Result<Value>;
    async fn save_hero(&self, payload: &HeroPayload) -> Result<Value>;

    async fn fetch_albums(&self) -> Result<Vec<Value>>;
    async fn create_album(&self, payload: &AlbumPayload) -> Result<Value>;
    async fn update_album(&self, id: &str, payload: &AlbumPayload) -> Result<Value>;
    async fn delete_album(&self, id: &str) -> Result<()>;

    async fn fetch_videos(&self) -> Result<Vec<Value>>;
    async fn create_video(&self, payload: &VideoPayload) -> Result<Value>;
    async fn update_video(&self, id: &str, payload: &VideoPayload) -> Result<Value>;
    async fn delete_video(&self, id: &str) -> Result<()>;

    async fn fetch_tours(&self) -> Result<Vec<Value>>;
    async fn create_tour(&self, payload: &TourPayload) -> Result<Value>;
    async fn update_tour(&self, id: &str, payload: &TourPayload) -> Result<Value>;
    async fn delete_tour(&self, id: &str) -> Result<()>;

    async fn fetch_about(&self) -> Result<Value>;
    async fn save_about(&self, payload: &AboutPayload) -> Result<Value>;

    async fn login(&self, request: &LoginRequest) -> Result<bool>;
    async fn update_credentials(&self, update: &CredentialsUpdate) -> Result<()>;
}

/// Extract the failure message from an error response: the JSON
/// `{ "message": ... }` body when it parses, otherwise the status line.
fn failure_message(status: reqwest::StatusCode, body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .map(|b| b.message)
        .unwrap_or_else(|_| {
            format!(
                "{} {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("request failed")
            )
        })
}

/// HTTP implementation of [`ContentApi`] over the site's REST endpoints
pub struct ResourceClient {
    http: reqwest::Client,
    base_url: String,
}

impl ResourceClient {
    /// Create a client for the given API base URL.
    ///
    /// No request timeout is configured; a hung request leaves the
    /// affected resource stale rather than surfacing a spurious failure.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| Error::Config(format!("failed to construct HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send a request and return the parsed JSON body.
    ///
    /// Transport failures and non-2xx statuses both surface as
    /// [`Error::Api`]; callers never see transport-specific error kinds.
    async fn execute(&self, builder: reqwest::RequestBuilder) -> Result<Value> {
        let request = builder.build().map_err(|e| Error::Api(e.to_string()))?;
        tracing::debug!(method = %request.method(), url = %request.url(), "Content API request");

        let response = self
            .http
            .execute(request)
            .await
            .map_err(|e| Error::Api(e.to_string()))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| Error::Api(e.to_string()))?;

        if !status.is_success() {
            let message = failure_message(status, &body);
            tracing::warn!(status = status.as_u16(), message = %message, "Content API request failed");
            return Err(Error::Api(message));
        }

        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&body).map_err(|e| Error::Api(format!("invalid JSON in response: {e}")))
    }
}

#[async_trait]
impl ContentApi for ResourceClient {
    async fn fetch_hero(&self) -> Result<Value> {
        self.execute(self.http.get(self.endpoint("/hero"))).await
    }

    async fn save_hero(&self, payload: &HeroPayload) -> Result<Value> {
        self.execute(self.http.post(self.endpoint("/hero")).json(payload)).await
    }

    async fn fetch_albums(&self) -> Result<Vec<Value>> {
        let body = self.execute(self.http.get(self.endpoint("/albums"))).await?;
        let envelope: AlbumsEnvelope = serde_json::from_value(body)
            .map_err(|e| Error::Api(format!("unexpected albums response shape: {e}")))?;
        Ok(envelope.albums)
    }

    async fn create_album(&self, payload: &AlbumPayload) -> Result<Value> {
        payload.validate()?;
        self.execute(self.http.post(self.endpoint("/albums")).json(payload)).await
    }

    async fn update_album(&self, id: &str, payload: &AlbumPayload) -> Result<Value> {
        payload.validate()?;
        self.execute(self.http.put(self.endpoint(&format!("/albums/{id}"))).json(payload))
            .await
    }

    async fn delete_album(&self, id: &str) -> Result<()> {
        self.execute(self.http.delete(self.endpoint(&format!("/albums/{id}"))))
            .await
            .map(|_| ())
    }

    async fn fetch_videos(&self) -> Result<Vec<Value>> {
        let body = self.execute(self.http.get(self.endpoint("/videos"))).await?;
        let envelope: VideosEnvelope = serde_json::from_value(body)
            .map_err(|e| Error::Api(format!("unexpected videos response shape: {e}")))?;
        Ok(envelope.videos)
    }

    async fn create_video(&self, payload: &VideoPayload) -> Result<Value> {
        payload.validate_create()?;
        // Identifier extraction is mandatory on create
        let mut body = payload.clone();
        body.video_id = Some(video_id::extract(&payload.source_url)?);
        self.execute(self.http.post(self.endpoint("/videos")).json(&body)).await
    }

    async fn update_video(&self, id: &str, payload: &VideoPayload) -> Result<Value> {
        payload.validate_update()?;
        let mut body = payload.clone();
        // An empty source URL keeps the stored identifier unchanged;
        // a non-empty one must yield a fresh identifier or the commit fails.
        if !payload.source_url.trim().is_empty() {
            body.video_id = Some(video_id::extract(&payload.source_url)?);
        }
        self.execute(self.http.put(self.endpoint(&format!("/videos/{id}"))).json(&body))
            .await
    }

    async fn delete_video(&self, id: &str) -> Result<()> {
        self.execute(self.http.delete(self.endpoint(&format!("/videos/{id}"))))
            .await
            .map(|_| ())
    }

    async fn fetch_tours(&self) -> Result<Vec<Value>> {
        let body = self.execute(self.http.get(self.endpoint("/tours"))).await?;
        let envelope: ToursEnvelope = serde_json::from_value(body)
            .map_err(|e| Error::Api(format!("unexpected tours response shape: {e}")))?;
        Ok(envelope.tours)
    }

    async fn create_tour(&self, payload: &TourPayload) -> Result<Value> {
        payload.validate()?;
        self.execute(self.http.post(self.endpoint("/tours")).json(payload)).await
    }

    async fn update_tour(&self, id: &str, payload: &TourPayload) -> Result<Value> {
        payload.validate()?;
        self.execute(self.http.put(self.endpoint(&format!("/tours/{id}"))).json(payload))
            .await
    }

    async fn delete_tour(&self, id: &str) -> Result<()> {
        self.execute(self.http.delete(self.endpoint(&format!("/tours/{id}"))))
            .await
            .map(|_| ())
    }

    async fn fetch_about(&self) -> Result<Value> {
        self.execute(self.http.get(self.endpoint("/about"))).await
    }

    async fn save_about(&self, payload: &AboutPayload) -> Result<Value> {
        self.execute(self.http.put(self.endpoint("/about")).json(payload)).await
    }

    async fn login(&self, request: &LoginRequest) -> Result<bool> {
        request.validate()?;
        let body = self
            .execute(self.http.post(self.endpoint("/auth/login")).json(request))
            .await?;
        let response: LoginResponse = serde_json::from_value(body)
            .map_err(|e| Error::Api(format!("unexpected login response shape: {e}")))?;
        Ok(response.success)
    }

    async fn update_credentials(&self, update: &CredentialsUpdate) -> Result<()> {
        update.validate()?;
        self.execute(self.http.put(self.endpoint("/auth/credentials")).json(update))
            .await
            .map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_message_prefers_the_json_body() {
        let status = reqwest::StatusCode::BAD_REQUEST;
        let message = failure_message(status, r#"{"message": "title is required"}"#);
        assert_eq!(message, "title is required");
    }

    #[test]
    fn failure_message_falls_back_to_the_status_line() {
        let status = reqwest::StatusCode::INTERNAL_SERVER_ERROR;
        assert_eq!(failure_message(status, "<html>oops</html>"), "500 Internal Server Error");
        assert_eq!(failure_message(status, ""), "500 Internal Server Error");
    }

    #[test]
    fn endpoint_joins_without_duplicate_slashes() {
        let client = ResourceClient::new("http://localhost:4000/api/").unwrap();
        assert_eq!(client.endpoint("/albums"), "http://localhost:4000/api/albums");
    }
}
