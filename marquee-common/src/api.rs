//! API request/response wire types
//!
//! Request payloads carry their own required-field validation, which the
//! resource client runs before any transport is attempted. Response
//! bodies stay as raw [`serde_json::Value`] records at this layer;
//! normalization happens in the content store.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::model::{
    AboutPage, Achievement, Album, AlbumLink, AudioItem, Award, CallToAction, Highlight,
    HeroConfig, NavLink, NoticeBanner, PlatformLink, SocialLink, Tour, Video,
};

fn require(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        Err(Error::Validation(format!("{field} is required")))
    } else {
        Ok(())
    }
}

// ========================================
// Resource payloads
// ========================================

/// Hero save payload (`POST /hero`); any subset of fields may be sent
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artist_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_video: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nav_links: Option<Vec<NavLink>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub call_to_actions: Option<Vec<CallToAction>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub streaming_links: Option<Vec<PlatformLink>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub social_links: Option<Vec<SocialLink>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<NoticeBanner>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_items: Option<Vec<AudioItem>>,
}

impl From<&HeroConfig> for HeroPayload {
    fn from(hero: &HeroConfig) -> Self {
        Self {
            artist_name: Some(hero.artist_name.clone()),
            background_image: Some(hero.background_image.clone()),
            background_video: hero.background_video.clone(),
            nav_links: Some(hero.nav_links.clone()),
            call_to_actions: Some(hero.call_to_actions.clone()),
            streaming_links: Some(hero.streaming_links.clone()),
            social_links: Some(hero.social_links.clone()),
            notice: Some(hero.notice.clone()),
            audio_items: Some(hero.audio_items.clone()),
        }
    }
}

/// Album create/update payload
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlbumPayload {
    pub title: String,
    pub year: String,
    pub cover_image: String,
    pub summary: String,
    pub description: String,
    pub tracks: Vec<String>,
    pub links: Vec<AlbumLink>,
}

impl AlbumPayload {
    /// Required fields: title and cover image
    pub fn validate(&self) -> Result<()> {
        require("title", &self.title)?;
        require("coverImage", &self.cover_image)
    }
}

impl From<&Album> for AlbumPayload {
    fn from(album: &Album) -> Self {
        Self {
            title: album.title.clone(),
            year: album.year.clone(),
            cover_image: album.cover_image.clone(),
            summary: album.summary.clone(),
            description: album.description.clone(),
            tracks: album.tracks.clone(),
            links: album.links.clone(),
        }
    }
}

/// Video create/update payload
///
/// `video_id` is filled in by the resource client after identifier
/// extraction; editors only supply the source URL. On update, an empty
/// `source_url` means "keep the stored identifier" and the field is
/// omitted from the request body.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoPayload {
    pub title: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub source_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_id: Option<String>,
    pub views: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lyrics: Option<String>,
}

impl VideoPayload {
    /// Required fields on create: title and source URL
    pub fn validate_create(&self) -> Result<()> {
        require("title", &self.title)?;
        require("sourceUrl", &self.source_url)
    }

    /// Required fields on update: title (source URL may stay empty)
    pub fn validate_update(&self) -> Result<()> {
        require("title", &self.title)
    }
}

impl From<&Video> for VideoPayload {
    fn from(video: &Video) -> Self {
        Self {
            title: video.title.clone(),
            source_url: video.source_url.clone(),
            video_id: None,
            views: video.views.clone(),
            description: video.description.clone(),
            lyrics: video.lyrics.clone(),
        }
    }
}

/// Tour create/update payload
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TourPayload {
    pub date: String,
    pub city: String,
    pub venue: String,
    pub ticket_url: String,
}

impl TourPayload {
    /// All four fields are required
    pub fn validate(&self) -> Result<()> {
        require("date", &self.date)?;
        require("city", &self.city)?;
        require("venue", &self.venue)?;
        require("ticketUrl", &self.ticket_url)
    }
}

impl From<&Tour> for TourPayload {
    fn from(tour: &Tour) -> Self {
        Self {
            date: tour.date.clone(),
            city: tour.city.clone(),
            venue: tour.venue.clone(),
            ticket_url: tour.ticket_url.clone(),
        }
    }
}

/// About save payload (`PUT /about`); no required fields
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AboutPayload {
    pub biography: String,
    pub highlights: Vec<Highlight>,
    pub achievements: Vec<Achievement>,
    pub awards: Vec<Award>,
    pub label: String,
    pub location: String,
    pub email: String,
    pub phone: String,
    pub image: String,
}

impl From<&AboutPage> for AboutPayload {
    fn from(about: &AboutPage) -> Self {
        Self {
            biography: about.biography.clone(),
            highlights: about.highlights.clone(),
            achievements: about.achievements.clone(),
            awards: about.awards.clone(),
            label: about.label.clone(),
            location: about.location.clone(),
            email: about.email.clone(),
            phone: about.phone.clone(),
            image: about.image.clone(),
        }
    }
}

// ========================================
// List envelopes
// ========================================

/// `GET /albums` response: `{ "albums": [...] }`
#[derive(Debug, Clone, Deserialize)]
pub struct AlbumsEnvelope {
    #[serde(default)]
    pub albums: Vec<Value>,
}

/// `GET /videos` response: `{ "videos": [...] }`
#[derive(Debug, Clone, Deserialize)]
pub struct VideosEnvelope {
    #[serde(default)]
    pub videos: Vec<Value>,
}

/// `GET /tours` response: `{ "tours": [...] }`
#[derive(Debug, Clone, Deserialize)]
pub struct ToursEnvelope {
    #[serde(default)]
    pub tours: Vec<Value>,
}

// ========================================
// Auth types
// ========================================

/// `POST /auth/login` request body
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl LoginRequest {
    pub fn validate(&self) -> Result<()> {
        require("username", &self.username)?;
        require("password", &self.password)
    }
}

/// `POST /auth/login` response body
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    #[serde(default)]
    pub success: bool,
}

/// `PUT /auth/credentials` request body
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialsUpdate {
    pub current_password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_password: Option<String>,
}

impl CredentialsUpdate {
    /// Only the current password is required
    pub fn validate(&self) -> Result<()> {
        require("currentPassword", &self.current_password)
    }
}

// ========================================
// Error body
// ========================================

/// Failure body returned by every endpoint: `{ "message": string }`
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn album_payload_requires_title_and_cover() {
        let mut payload = AlbumPayload {
            title: "X".to_string(),
            cover_image: "/x.jpg".to_string(),
            ..Default::default()
        };
        assert!(payload.validate().is_ok());

        payload.title = "  ".to_string();
        assert!(matches!(payload.validate(), Err(Error::Validation(_))));

        payload.title = "X".to_string();
        payload.cover_image = String::new();
        assert!(matches!(payload.validate(), Err(Error::Validation(_))));
    }

    #[test]
    fn tour_payload_requires_all_four_fields() {
        let payload = TourPayload {
            date: "2026-09-01".to_string(),
            city: "Berlin".to_string(),
            venue: "Columbiahalle".to_string(),
            ticket_url: String::new(),
        };
        assert!(matches!(payload.validate(), Err(Error::Validation(_))));
    }

    #[test]
    fn video_update_allows_empty_source_url() {
        let payload = VideoPayload {
            title: "Live".to_string(),
            ..Default::default()
        };
        assert!(payload.validate_create().is_err());
        assert!(payload.validate_update().is_ok());
    }

    #[test]
    fn empty_video_source_url_is_omitted_from_the_body() {
        let payload = VideoPayload {
            title: "Live".to_string(),
            views: "12 views".to_string(),
            ..Default::default()
        };
        let body = serde_json::to_value(&payload).unwrap();
        assert!(body.get("sourceUrl").is_none());
        assert!(body.get("videoId").is_none());
        assert_eq!(body["title"], "Live");
    }

    #[test]
    fn credentials_update_requires_current_password() {
        let update = CredentialsUpdate {
            current_password: String::new(),
            new_username: Some("admin".to_string()),
            new_password: None,
        };
        assert!(update.validate().is_err());
    }

    #[test]
    fn envelopes_tolerate_a_missing_list() {
        let envelope: AlbumsEnvelope = serde_json::from_value(json!({})).unwrap();
        assert!(envelope.albums.is_empty());

        let envelope: VideosEnvelope =
            serde_json::from_value(json!({"videos": [{"id": "v1"}]})).unwrap();
        assert_eq!(envelope.videos.len(), 1);
    }
}
