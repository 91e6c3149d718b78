//! Record normalization
//!
//! Converts raw server records of unknown or partial shape into fully
//! populated entities from [`crate::model`]. Every recognized field has an
//! explicit default substitution, so normalization is total: it never
//! fails, it degrades unknown or malformed input to defaults instead.
//!
//! Normalization is pure except for two documented cases:
//! - a record with no usable identifier receives a generated fallback
//!   identifier ([`crate::ids::fallback_id`]);
//! - a record with no parseable `createdAt`/`updatedAt` receives the
//!   current instant.

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::ids::fallback_id;
use crate::model::{
    AboutPage, Achievement, Album, AlbumLink, AudioItem, Award, CallToAction, Highlight,
    HeroConfig, NavLink, NoticeBanner, PlatformLink, SocialLink, Tour, Video,
};

/// Look up a field, treating JSON `null` the same as an absent key.
fn field<'a>(record: &'a Value, key: &str) -> Option<&'a Value> {
    match record.get(key) {
        Some(Value::Null) | None => None,
        Some(v) => Some(v),
    }
}

fn string_or(record: &Value, key: &str, default: &str) -> String {
    field(record, key)
        .and_then(Value::as_str)
        .unwrap_or(default)
        .to_string()
}

/// Optional string field: absent, null, non-string, or empty all map to `None`.
fn opt_string(record: &Value, key: &str) -> Option<String> {
    field(record, key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn bool_or(record: &Value, key: &str, default: bool) -> bool {
    field(record, key).and_then(Value::as_bool).unwrap_or(default)
}

/// List field as raw elements; absent or non-array maps to empty.
fn elements<'a>(record: &'a Value, key: &str) -> &'a [Value] {
    field(record, key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// Ordered list of strings. Malformed elements degrade to the empty
/// string rather than being dropped, so list length (and therefore any
/// editor index into it) is preserved.
fn string_list(record: &Value, key: &str) -> Vec<String> {
    elements(record, key)
        .iter()
        .map(|v| v.as_str().unwrap_or_default().to_string())
        .collect()
}

fn timestamp_or_now(record: &Value, key: &str) -> DateTime<Utc> {
    field(record, key)
        .and_then(Value::as_str)
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(Utc::now)
}

/// Resolve the record identifier: the conventional `id` field first, then
/// the storage-assigned `_id` (plain string or extended-JSON
/// `{"$oid": ...}`), then a generated fallback identifier.
///
/// Also used by editor sessions to read the server-assigned identifier
/// out of a create response.
pub fn record_id(record: &Value) -> String {
    if let Some(id) = field(record, "id").and_then(Value::as_str) {
        if !id.is_empty() {
            return id.to_string();
        }
    }
    if let Some(raw) = field(record, "_id") {
        if let Some(id) = raw.as_str() {
            if !id.is_empty() {
                return id.to_string();
            }
        }
        if let Some(id) = raw.get("$oid").and_then(Value::as_str) {
            if !id.is_empty() {
                return id.to_string();
            }
        }
    }
    fallback_id()
}

fn normalize_nav_link(record: &Value) -> NavLink {
    NavLink {
        label: string_or(record, "label", ""),
        href: string_or(record, "href", ""),
    }
}

fn normalize_call_to_action(record: &Value) -> CallToAction {
    CallToAction {
        label: string_or(record, "label", ""),
        href: string_or(record, "href", ""),
        style: string_or(record, "style", "primary"),
    }
}

fn normalize_platform_link(record: &Value) -> PlatformLink {
    PlatformLink {
        platform: string_or(record, "platform", ""),
        url: string_or(record, "url", ""),
    }
}

fn normalize_social_link(record: &Value) -> SocialLink {
    SocialLink {
        platform: string_or(record, "platform", ""),
        url: string_or(record, "url", ""),
    }
}

fn normalize_notice(record: &Value) -> NoticeBanner {
    let notice = field(record, "notice").unwrap_or(&Value::Null);
    NoticeBanner {
        text: string_or(notice, "text", ""),
        href: string_or(notice, "href", ""),
        visible: bool_or(notice, "visible", false),
    }
}

/// Normalize an embedded audio item.
pub fn normalize_audio_item(record: &Value) -> AudioItem {
    AudioItem {
        id: record_id(record),
        image: string_or(record, "image", ""),
        link: string_or(record, "link", ""),
        title: opt_string(record, "title"),
    }
}

/// Normalize the hero singleton record.
pub fn normalize_hero(record: &Value) -> HeroConfig {
    HeroConfig {
        id: record_id(record),
        artist_name: string_or(record, "artistName", ""),
        background_image: string_or(record, "backgroundImage", ""),
        background_video: opt_string(record, "backgroundVideo"),
        nav_links: elements(record, "navLinks").iter().map(normalize_nav_link).collect(),
        call_to_actions: elements(record, "callToActions")
            .iter()
            .map(normalize_call_to_action)
            .collect(),
        streaming_links: elements(record, "streamingLinks")
            .iter()
            .map(normalize_platform_link)
            .collect(),
        social_links: elements(record, "socialLinks")
            .iter()
            .map(normalize_social_link)
            .collect(),
        notice: normalize_notice(record),
        audio_items: elements(record, "audioItems")
            .iter()
            .map(normalize_audio_item)
            .collect(),
        created_at: timestamp_or_now(record, "createdAt"),
        updated_at: timestamp_or_now(record, "updatedAt"),
    }
}

fn normalize_album_link(record: &Value) -> AlbumLink {
    AlbumLink {
        id: record_id(record),
        label: string_or(record, "label", ""),
        url: string_or(record, "url", ""),
        description: string_or(record, "description", ""),
    }
}

/// Normalize an album record.
pub fn normalize_album(record: &Value) -> Album {
    Album {
        id: record_id(record),
        title: string_or(record, "title", ""),
        year: string_or(record, "year", ""),
        cover_image: string_or(record, "coverImage", ""),
        summary: string_or(record, "summary", ""),
        description: string_or(record, "description", ""),
        tracks: string_list(record, "tracks"),
        links: elements(record, "links").iter().map(normalize_album_link).collect(),
        created_at: timestamp_or_now(record, "createdAt"),
        updated_at: timestamp_or_now(record, "updatedAt"),
    }
}

/// Normalize a video record.
pub fn normalize_video(record: &Value) -> Video {
    Video {
        id: record_id(record),
        title: string_or(record, "title", ""),
        source_url: string_or(record, "sourceUrl", ""),
        video_id: string_or(record, "videoId", ""),
        views: string_or(record, "views", ""),
        description: string_or(record, "description", ""),
        lyrics: opt_string(record, "lyrics"),
        created_at: timestamp_or_now(record, "createdAt"),
        updated_at: timestamp_or_now(record, "updatedAt"),
    }
}

/// Normalize a tour date record.
pub fn normalize_tour(record: &Value) -> Tour {
    Tour {
        id: record_id(record),
        date: string_or(record, "date", ""),
        city: string_or(record, "city", ""),
        venue: string_or(record, "venue", ""),
        ticket_url: string_or(record, "ticketUrl", ""),
        created_at: timestamp_or_now(record, "createdAt"),
        updated_at: timestamp_or_now(record, "updatedAt"),
    }
}

fn normalize_highlight(record: &Value) -> Highlight {
    Highlight {
        title: string_or(record, "title", ""),
        description: string_or(record, "description", ""),
    }
}

fn normalize_achievement(record: &Value) -> Achievement {
    Achievement {
        year: string_or(record, "year", ""),
        title: string_or(record, "title", ""),
        organization: string_or(record, "organization", ""),
    }
}

fn normalize_award(record: &Value) -> Award {
    Award {
        title: string_or(record, "title", ""),
        description: string_or(record, "description", ""),
    }
}

/// Normalize the about singleton record.
pub fn normalize_about(record: &Value) -> AboutPage {
    AboutPage {
        id: record_id(record),
        biography: string_or(record, "biography", ""),
        highlights: elements(record, "highlights").iter().map(normalize_highlight).collect(),
        achievements: elements(record, "achievements")
            .iter()
            .map(normalize_achievement)
            .collect(),
        awards: elements(record, "awards").iter().map(normalize_award).collect(),
        label: string_or(record, "label", ""),
        location: string_or(record, "location", ""),
        email: string_or(record, "email", ""),
        phone: string_or(record, "phone", ""),
        image: string_or(record, "image", ""),
        created_at: timestamp_or_now(record, "createdAt"),
        updated_at: timestamp_or_now(record, "updatedAt"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_record_gets_full_defaults() {
        let album = normalize_album(&json!({}));
        assert!(!album.id.is_empty(), "missing id must get a fallback");
        assert_eq!(album.title, "");
        assert_eq!(album.year, "");
        assert!(album.tracks.is_empty());
        assert!(album.links.is_empty());
    }

    #[test]
    fn null_input_is_treated_like_an_empty_record() {
        let hero = normalize_hero(&Value::Null);
        assert_eq!(hero.artist_name, "");
        assert!(hero.nav_links.is_empty());
        assert!(!hero.notice.visible);
        assert!(hero.background_video.is_none());
    }

    #[test]
    fn id_resolution_prefers_id_then_storage_id_then_fallback() {
        assert_eq!(record_id(&json!({"id": "a", "_id": "b"})), "a");
        assert_eq!(record_id(&json!({"_id": "b"})), "b");
        assert_eq!(record_id(&json!({"_id": {"$oid": "c"}})), "c");

        let generated = record_id(&json!({}));
        assert!(!generated.is_empty());
        // Two calls on id-less records must not collide
        assert_ne!(generated, record_id(&json!({})));
    }

    #[test]
    fn normalization_is_idempotent_for_complete_records() {
        let record = json!({
            "id": "v1",
            "title": "Live at the Forum",
            "sourceUrl": "https://youtu.be/abc12345678",
            "videoId": "abc12345678",
            "views": "1.2M views",
            "description": "Full set",
            "lyrics": "la la la",
            "createdAt": "2024-03-01T12:00:00Z",
            "updatedAt": "2024-03-02T12:00:00Z",
        });
        assert_eq!(normalize_video(&record), normalize_video(&record));
    }

    #[test]
    fn malformed_list_elements_degrade_without_changing_length() {
        let album = normalize_album(&json!({
            "id": "a1",
            "tracks": ["Intro", 42, null, "Outro"],
        }));
        assert_eq!(album.tracks, vec!["Intro", "", "", "Outro"]);
    }

    #[test]
    fn track_and_link_order_is_preserved() {
        let album = normalize_album(&json!({
            "id": "a1",
            "tracks": ["One", "Two", "Three"],
            "links": [
                {"id": "l1", "label": "Spotify", "url": "https://sp", "description": ""},
                {"id": "l2", "label": "Bandcamp", "url": "https://bc", "description": ""},
            ],
        }));
        assert_eq!(album.tracks, vec!["One", "Two", "Three"]);
        assert_eq!(album.links[0].label, "Spotify");
        assert_eq!(album.links[1].label, "Bandcamp");
    }

    #[test]
    fn timestamps_parse_when_present() {
        let tour = normalize_tour(&json!({
            "id": "t1",
            "createdAt": "2024-01-01T00:00:00Z",
            "updatedAt": "2024-01-02T00:00:00Z",
        }));
        assert_eq!(tour.created_at.to_rfc3339(), "2024-01-01T00:00:00+00:00");
        assert!(tour.updated_at > tour.created_at);
    }

    #[test]
    fn audio_items_ride_inside_the_hero_record() {
        let hero = normalize_hero(&json!({
            "id": "hero",
            "audioItems": [
                {"id": "au1", "image": "/img/a.jpg", "link": "https://listen", "title": "Single"},
                {"image": "/img/b.jpg", "link": "https://listen2"},
            ],
        }));
        assert_eq!(hero.audio_items.len(), 2);
        assert_eq!(hero.audio_items[0].title.as_deref(), Some("Single"));
        assert!(hero.audio_items[1].title.is_none());
        assert!(!hero.audio_items[1].id.is_empty());
    }
}
