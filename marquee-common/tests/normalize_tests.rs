//! Integration tests for record normalization
//!
//! Exercises the normalizer the way the content store uses it: raw
//! server records of varying completeness in, fully populated entities
//! out.

use serde_json::json;

use marquee_common::normalize::{
    normalize_about, normalize_album, normalize_hero, normalize_video, record_id,
};

#[test]
fn full_hero_record_round_trips_every_field() {
    let record = json!({
        "id": "hero-1",
        "artistName": "The Marquee Lights",
        "backgroundImage": "/img/hero.jpg",
        "backgroundVideo": "/video/hero.mp4",
        "navLinks": [
            {"label": "Music", "href": "#music"},
            {"label": "Tour", "href": "#tour"},
        ],
        "callToActions": [
            {"label": "Listen", "href": "https://listen.example.com", "style": "primary"},
        ],
        "streamingLinks": [
            {"platform": "spotify", "url": "https://open.spotify.com/artist/x"},
        ],
        "socialLinks": [
            {"platform": "instagram", "url": "https://instagram.com/x"},
        ],
        "notice": {"text": "New single out now", "href": "/news", "visible": true},
        "audioItems": [
            {"id": "au-1", "image": "/img/single.jpg", "link": "https://listen.example.com/single"},
        ],
        "createdAt": "2024-06-01T00:00:00Z",
        "updatedAt": "2024-06-02T00:00:00Z",
    });

    let hero = normalize_hero(&record);
    assert_eq!(hero.id, "hero-1");
    assert_eq!(hero.artist_name, "The Marquee Lights");
    assert_eq!(hero.background_video.as_deref(), Some("/video/hero.mp4"));
    assert_eq!(hero.nav_links.len(), 2);
    assert_eq!(hero.nav_links[1].label, "Tour");
    assert_eq!(hero.call_to_actions[0].style, "primary");
    assert_eq!(hero.streaming_links[0].platform, "spotify");
    assert_eq!(hero.social_links[0].platform, "instagram");
    assert!(hero.notice.visible);
    assert_eq!(hero.audio_items[0].id, "au-1");
    assert!(hero.audio_items[0].title.is_none());
}

#[test]
fn partial_album_record_is_completed_with_defaults() {
    let album = normalize_album(&json!({
        "id": "a1",
        "title": "X",
        "coverImage": "/x.jpg",
    }));

    assert_eq!(album.id, "a1");
    assert_eq!(album.title, "X");
    assert_eq!(album.cover_image, "/x.jpg");
    assert_eq!(album.year, "");
    assert_eq!(album.summary, "");
    assert_eq!(album.description, "");
    assert!(album.tracks.is_empty());
    assert!(album.links.is_empty());
}

#[test]
fn normalizing_twice_yields_identical_entities() {
    // Idempotence holds whenever the two non-deterministic defaults
    // (generated identifier, current-instant timestamps) are not needed
    let record = json!({
        "id": "a1",
        "title": "Complete",
        "year": "2023",
        "coverImage": "/c.jpg",
        "summary": "s",
        "description": "d",
        "tracks": ["One"],
        "links": [{"id": "l1", "label": "Shop", "url": "https://shop", "description": ""}],
        "createdAt": "2023-01-01T00:00:00Z",
        "updatedAt": "2023-01-02T00:00:00Z",
    });
    assert_eq!(normalize_album(&record), normalize_album(&record));
}

#[test]
fn singleton_defaults_materialize_from_an_empty_body() {
    // GET /about on a fresh server may return an empty record; the
    // normalized entity is still fully populated
    let about = normalize_about(&json!({}));
    assert_eq!(about.biography, "");
    assert!(about.highlights.is_empty());
    assert!(about.achievements.is_empty());
    assert!(about.awards.is_empty());
    assert_eq!(about.email, "");
    assert!(!about.id.is_empty());
}

#[test]
fn video_identifier_is_read_not_derived() {
    // The normalizer trusts the stored videoId; derivation from the URL
    // happens in the resource client at commit time
    let video = normalize_video(&json!({
        "id": "v1",
        "sourceUrl": "https://youtu.be/abc12345678",
    }));
    assert_eq!(video.video_id, "");
    assert_eq!(video.source_url, "https://youtu.be/abc12345678");
}

#[test]
fn storage_assigned_identifiers_are_honored() {
    assert_eq!(record_id(&json!({"_id": "6650f1f2ab"})), "6650f1f2ab");
    assert_eq!(
        record_id(&json!({"_id": {"$oid": "6650f1f2ab"}})),
        "6650f1f2ab"
    );
    assert_eq!(record_id(&json!({"id": "plain", "_id": "storage"})), "plain");
}
