//! Content model entities
//!
//! Strict in-memory representation of every content record on the site.
//! Instances are produced by the normalizer in [`crate::normalize`], which
//! guarantees every field is populated; view code never needs to re-check
//! for absent data.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Navigation link shown in the hero chrome
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavLink {
    pub label: String,
    pub href: String,
}

/// Call-to-action descriptor (e.g. "Listen now")
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallToAction {
    pub label: String,
    pub href: String,
    /// Presentation hint ("primary", "outline", ...); free-form
    pub style: String,
}

/// Streaming platform link (Spotify, Apple Music, ...)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformLink {
    pub platform: String,
    pub url: String,
}

/// Social media link
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialLink {
    pub platform: String,
    pub url: String,
}

/// Site-wide notification banner
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoticeBanner {
    pub text: String,
    pub href: String,
    pub visible: bool,
}

/// Embedded audio item (artwork + outbound link)
///
/// Audio items are carried inside the hero singleton record and edited
/// through the hero editor; they have no REST resource of their own.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioItem {
    pub id: String,
    pub image: String,
    pub link: String,
    pub title: Option<String>,
}

/// Hero banner configuration (singleton)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroConfig {
    pub id: String,
    pub artist_name: String,
    pub background_image: String,
    pub background_video: Option<String>,
    pub nav_links: Vec<NavLink>,
    pub call_to_actions: Vec<CallToAction>,
    pub streaming_links: Vec<PlatformLink>,
    pub social_links: Vec<SocialLink>,
    pub notice: NoticeBanner,
    pub audio_items: Vec<AudioItem>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Labeled external link attached to an album
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlbumLink {
    pub id: String,
    pub label: String,
    pub url: String,
    pub description: String,
}

/// Album record
///
/// `tracks` and `links` are ordered sequences; their order is meaningful
/// and round-trips through save/refresh unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Album {
    pub id: String,
    pub title: String,
    pub year: String,
    pub cover_image: String,
    pub summary: String,
    pub description: String,
    pub tracks: Vec<String>,
    pub links: Vec<AlbumLink>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Video record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    pub id: String,
    pub title: String,
    /// Original source URL as entered by the editor
    pub source_url: String,
    /// Platform-native identifier derived from `source_url` at commit time
    pub video_id: String,
    /// Free-text view-count label ("1.2M views"), not numeric
    pub views: String,
    pub description: String,
    pub lyrics: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Tour date record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tour {
    pub id: String,
    /// ISO calendar date string (YYYY-MM-DD)
    pub date: String,
    pub city: String,
    pub venue: String,
    pub ticket_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Career highlight (title + description pair)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Highlight {
    pub title: String,
    pub description: String,
}

/// Achievement entry (year / title / organization triple)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    pub year: String,
    pub title: String,
    pub organization: String,
}

/// Award entry (title + description pair)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Award {
    pub title: String,
    pub description: String,
}

/// Biography page content (singleton)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AboutPage {
    pub id: String,
    pub biography: String,
    pub highlights: Vec<Highlight>,
    pub achievements: Vec<Achievement>,
    pub awards: Vec<Award>,
    pub label: String,
    pub location: String,
    pub email: String,
    pub phone: String,
    pub image: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The whole content model, exclusively owned by the content store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentModel {
    pub hero: HeroConfig,
    pub albums: Vec<Album>,
    pub videos: Vec<Video>,
    pub tours: Vec<Tour>,
    pub about: AboutPage,
}

impl ContentModel {
    /// Model used before the first refresh completes: both singletons at
    /// their defaults, every collection empty.
    pub fn initial() -> Self {
        Self {
            hero: crate::normalize::normalize_hero(&serde_json::Value::Null),
            albums: Vec::new(),
            videos: Vec::new(),
            tours: Vec::new(),
            about: crate::normalize::normalize_about(&serde_json::Value::Null),
        }
    }

    /// Built-in demo model for local development without a backend.
    ///
    /// Only the admin tool's explicit `demo` command installs this; the
    /// editor code paths never reach it.
    pub fn demo() -> Self {
        let mut model = Self::initial();
        model.hero.artist_name = "Demo Artist".to_string();
        model.hero.background_image = "/img/hero-demo.jpg".to_string();
        model.hero.nav_links = vec![
            NavLink {
                label: "Music".to_string(),
                href: "#music".to_string(),
            },
            NavLink {
                label: "Tour".to_string(),
                href: "#tour".to_string(),
            },
            NavLink {
                label: "About".to_string(),
                href: "#about".to_string(),
            },
        ];
        model.albums = vec![crate::normalize::normalize_album(&serde_json::json!({
            "id": "demo-album",
            "title": "First Light",
            "year": "2024",
            "coverImage": "/img/first-light.jpg",
            "summary": "Debut studio album.",
            "tracks": ["Opener", "Second Wind", "Closing Time"],
        }))];
        model.tours = vec![crate::normalize::normalize_tour(&serde_json::json!({
            "id": "demo-tour",
            "date": "2026-09-01",
            "city": "Berlin",
            "venue": "Columbiahalle",
            "ticketUrl": "https://tickets.example.com/berlin",
        }))];
        model.about.biography = "Placeholder biography shown in demo mode.".to_string();
        model
    }
}
