//! Test doubles for the content API
//!
//! `MockApi` is a tiny in-memory stand-in for the real backend: it keeps
//! raw JSON records, applies the same merge-on-update semantics the
//! server uses (fields absent from the body are kept, never deleted),
//! and mirrors the resource client's pre-transport contract (payload
//! validation and video identifier extraction) so editor tests exercise
//! the same failure paths. Individual operations can be forced to fail.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};

use marquee_common::api::{
    AboutPayload, AlbumPayload, CredentialsUpdate, HeroPayload, LoginRequest, TourPayload,
    VideoPayload,
};
use marquee_common::{Error, Result};

use crate::client::ContentApi;
use crate::video_id;

/// Shallow merge of a request body onto a stored record: present fields
/// replace, absent fields are kept.
fn merge(record: &mut Value, body: Value) {
    if let (Value::Object(target), Value::Object(patch)) = (record, body) {
        for (key, value) in patch {
            target.insert(key, value);
        }
    }
}

fn find_record<'a>(records: &'a mut [Value], id: &str) -> Option<&'a mut Value> {
    records
        .iter_mut()
        .find(|r| r.get("id").and_then(Value::as_str) == Some(id))
}

pub(crate) struct MockApi {
    hero: Mutex<Value>,
    albums: Mutex<Vec<Value>>,
    videos: Mutex<Vec<Value>>,
    tours: Mutex<Vec<Value>>,
    about: Mutex<Value>,
    next_id: AtomicUsize,
    failing: Mutex<HashSet<String>>,
    call_counts: Mutex<HashMap<String, usize>>,
}

impl MockApi {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            hero: Mutex::new(json!({})),
            albums: Mutex::new(Vec::new()),
            videos: Mutex::new(Vec::new()),
            tours: Mutex::new(Vec::new()),
            about: Mutex::new(json!({})),
            next_id: AtomicUsize::new(1),
            failing: Mutex::new(HashSet::new()),
            call_counts: Mutex::new(HashMap::new()),
        })
    }

    /// One record per resource, enough for the scenario tests
    pub fn with_demo_data() -> Arc<Self> {
        let api = Self::new();
        *api.hero.lock().unwrap() = json!({
            "id": "hero-1",
            "artistName": "Mock Artist",
            "backgroundImage": "/img/mock.jpg",
        });
        api.albums.lock().unwrap().push(json!({
            "id": "album-1",
            "title": "Mock Album",
            "coverImage": "/img/album.jpg",
        }));
        api.videos.lock().unwrap().push(json!({
            "id": "video-1",
            "title": "Mock Video",
            "sourceUrl": "https://youtu.be/mock0000000",
            "videoId": "mock0000000",
            "views": "10 views",
        }));
        api.tours.lock().unwrap().push(json!({
            "id": "tour-1",
            "date": "2026-09-01",
            "city": "Berlin",
            "venue": "Columbiahalle",
            "ticketUrl": "https://tickets.example.com/berlin",
        }));
        *api.about.lock().unwrap() = json!({
            "id": "about-1",
            "biography": "Mock biography",
        });
        api
    }

    pub fn push_album(&self, record: Value) {
        self.albums.lock().unwrap().push(record);
    }

    /// Force every subsequent call of the named operation to fail
    pub fn fail(&self, operation: &str) {
        self.failing.lock().unwrap().insert(operation.to_string());
    }

    /// How many times the named operation reached the "server"
    pub fn calls(&self, operation: &str) -> usize {
        self.call_counts.lock().unwrap().get(operation).copied().unwrap_or(0)
    }

    /// Raw field of a stored video record, for asserting server state
    pub fn video_field(&self, id: &str, key: &str) -> String {
        let mut videos = self.videos.lock().unwrap();
        find_record(&mut videos, id)
            .and_then(|r| r.get(key))
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    }

    /// Record the call; fails when the operation has been marked failing.
    /// Validation and extraction run before this, matching the real
    /// client where those reject before any request is issued.
    fn accept(&self, operation: &str) -> Result<()> {
        *self
            .call_counts
            .lock()
            .unwrap()
            .entry(operation.to_string())
            .or_insert(0) += 1;
        if self.failing.lock().unwrap().contains(operation) {
            return Err(Error::Api(format!("simulated {operation} failure")));
        }
        Ok(())
    }

    fn assign_id(&self, prefix: &str) -> String {
        format!("srv-{prefix}-{}", self.next_id.fetch_add(1, Ordering::SeqCst))
    }
}

#[async_trait]
impl ContentApi for MockApi {
    async fn fetch_hero(&self) -> Result<Value> {
        self.accept("fetch_hero")?;
        Ok(self.hero.lock().unwrap().clone())
    }

    async fn save_hero(&self, payload: &HeroPayload) -> Result<Value> {
        self.accept("save_hero")?;
        let mut hero = self.hero.lock().unwrap();
        merge(&mut hero, serde_json::to_value(payload).unwrap());
        // Create-if-absent singleton semantics
        if hero.get("id").and_then(Value::as_str).is_none() {
            hero["id"] = json!("hero-1");
        }
        Ok(hero.clone())
    }

    async fn fetch_albums(&self) -> Result<Vec<Value>> {
        self.accept("fetch_albums")?;
        Ok(self.albums.lock().unwrap().clone())
    }

    async fn create_album(&self, payload: &AlbumPayload) -> Result<Value> {
        payload.validate()?;
        self.accept("create_album")?;
        let mut record = serde_json::to_value(payload).unwrap();
        record["id"] = json!(self.assign_id("album"));
        self.albums.lock().unwrap().push(record.clone());
        Ok(record)
    }

    async fn update_album(&self, id: &str, payload: &AlbumPayload) -> Result<Value> {
        payload.validate()?;
        self.accept("update_album")?;
        let mut albums = self.albums.lock().unwrap();
        let record = find_record(&mut albums, id)
            .ok_or_else(|| Error::Api(format!("album {id} not found")))?;
        merge(record, serde_json::to_value(payload).unwrap());
        Ok(record.clone())
    }

    async fn delete_album(&self, id: &str) -> Result<()> {
        self.accept("delete_album")?;
        let mut albums = self.albums.lock().unwrap();
        let before = albums.len();
        albums.retain(|r| r.get("id").and_then(Value::as_str) != Some(id));
        if albums.len() == before {
            return Err(Error::Api(format!("album {id} not found")));
        }
        Ok(())
    }

    async fn fetch_videos(&self) -> Result<Vec<Value>> {
        self.accept("fetch_videos")?;
        Ok(self.videos.lock().unwrap().clone())
    }

    async fn create_video(&self, payload: &VideoPayload) -> Result<Value> {
        payload.validate_create()?;
        let derived = video_id::extract(&payload.source_url)?;
        self.accept("create_video")?;
        let mut record = serde_json::to_value(payload).unwrap();
        record["id"] = json!(self.assign_id("video"));
        record["videoId"] = json!(derived);
        self.videos.lock().unwrap().push(record.clone());
        Ok(record)
    }

    async fn update_video(&self, id: &str, payload: &VideoPayload) -> Result<Value> {
        payload.validate_update()?;
        let mut body = serde_json::to_value(payload).unwrap();
        if !payload.source_url.trim().is_empty() {
            body["videoId"] = json!(video_id::extract(&payload.source_url)?);
        }
        self.accept("update_video")?;
        let mut videos = self.videos.lock().unwrap();
        let record = find_record(&mut videos, id)
            .ok_or_else(|| Error::Api(format!("video {id} not found")))?;
        merge(record, body);
        Ok(record.clone())
    }

    async fn delete_video(&self, id: &str) -> Result<()> {
        self.accept("delete_video")?;
        let mut videos = self.videos.lock().unwrap();
        let before = videos.len();
        videos.retain(|r| r.get("id").and_then(Value::as_str) != Some(id));
        if videos.len() == before {
            return Err(Error::Api(format!("video {id} not found")));
        }
        Ok(())
    }

    async fn fetch_tours(&self) -> Result<Vec<Value>> {
        self.accept("fetch_tours")?;
        Ok(self.tours.lock().unwrap().clone())
    }

    async fn create_tour(&self, payload: &TourPayload) -> Result<Value> {
        payload.validate()?;
        self.accept("create_tour")?;
        let mut record = serde_json::to_value(payload).unwrap();
        record["id"] = json!(self.assign_id("tour"));
        self.tours.lock().unwrap().push(record.clone());
        Ok(record)
    }

    async fn update_tour(&self, id: &str, payload: &TourPayload) -> Result<Value> {
        payload.validate()?;
        self.accept("update_tour")?;
        let mut tours = self.tours.lock().unwrap();
        let record = find_record(&mut tours, id)
            .ok_or_else(|| Error::Api(format!("tour {id} not found")))?;
        merge(record, serde_json::to_value(payload).unwrap());
        Ok(record.clone())
    }

    async fn delete_tour(&self, id: &str) -> Result<()> {
        self.accept("delete_tour")?;
        let mut tours = self.tours.lock().unwrap();
        let before = tours.len();
        tours.retain(|r| r.get("id").and_then(Value::as_str) != Some(id));
        if tours.len() == before {
            return Err(Error::Api(format!("tour {id} not found")));
        }
        Ok(())
    }

    async fn fetch_about(&self) -> Result<Value> {
        self.accept("fetch_about")?;
        Ok(self.about.lock().unwrap().clone())
    }

    async fn save_about(&self, payload: &AboutPayload) -> Result<Value> {
        self.accept("save_about")?;
        let mut about = self.about.lock().unwrap();
        merge(&mut about, serde_json::to_value(payload).unwrap());
        if about.get("id").and_then(Value::as_str).is_none() {
            about["id"] = json!("about-1");
        }
        Ok(about.clone())
    }

    async fn login(&self, request: &LoginRequest) -> Result<bool> {
        request.validate()?;
        self.accept("login")?;
        Ok(true)
    }

    async fn update_credentials(&self, update: &CredentialsUpdate) -> Result<()> {
        update.validate()?;
        self.accept("update_credentials")
    }
}

/// Hero fetches answered from a queue of (delay in ms, record) pairs, for
/// pinning down the overlapping-refresh ordering. All other resources
/// return empty successes.
pub(crate) struct SequencedHeroApi {
    responses: Mutex<VecDeque<(u64, Value)>>,
}

impl SequencedHeroApi {
    pub fn new(responses: Vec<(u64, Value)>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
        }
    }
}

#[async_trait]
impl ContentApi for SequencedHeroApi {
    async fn fetch_hero(&self) -> Result<Value> {
        let next = self.responses.lock().unwrap().pop_front();
        match next {
            Some((delay_ms, record)) => {
                tokio::time::sleep(std::time::Duration::from_millis(delay_ms)).await;
                Ok(record)
            }
            None => Ok(json!({})),
        }
    }

    async fn save_hero(&self, _payload: &HeroPayload) -> Result<Value> {
        Err(Error::Api("not supported by this mock".to_string()))
    }

    async fn fetch_albums(&self) -> Result<Vec<Value>> {
        Ok(Vec::new())
    }

    async fn create_album(&self, _payload: &AlbumPayload) -> Result<Value> {
        Err(Error::Api("not supported by this mock".to_string()))
    }

    async fn update_album(&self, _id: &str, _payload: &AlbumPayload) -> Result<Value> {
        Err(Error::Api("not supported by this mock".to_string()))
    }

    async fn delete_album(&self, _id: &str) -> Result<()> {
        Err(Error::Api("not supported by this mock".to_string()))
    }

    async fn fetch_videos(&self) -> Result<Vec<Value>> {
        Ok(Vec::new())
    }

    async fn create_video(&self, _payload: &VideoPayload) -> Result<Value> {
        Err(Error::Api("not supported by this mock".to_string()))
    }

    async fn update_video(&self, _id: &str, _payload: &VideoPayload) -> Result<Value> {
        Err(Error::Api("not supported by this mock".to_string()))
    }

    async fn delete_video(&self, _id: &str) -> Result<()> {
        Err(Error::Api("not supported by this mock".to_string()))
    }

    async fn fetch_tours(&self) -> Result<Vec<Value>> {
        Ok(Vec::new())
    }

    async fn create_tour(&self, _payload: &TourPayload) -> Result<Value> {
        Err(Error::Api("not supported by this mock".to_string()))
    }

    async fn update_tour(&self, _id: &str, _payload: &TourPayload) -> Result<Value> {
        Err(Error::Api("not supported by this mock".to_string()))
    }

    async fn delete_tour(&self, _id: &str) -> Result<()> {
        Err(Error::Api("not supported by this mock".to_string()))
    }

    async fn fetch_about(&self) -> Result<Value> {
        Ok(json!({}))
    }

    async fn save_about(&self, _payload: &AboutPayload) -> Result<Value> {
        Err(Error::Api("not supported by this mock".to_string()))
    }

    async fn login(&self, _request: &LoginRequest) -> Result<bool> {
        Err(Error::Api("not supported by this mock".to_string()))
    }

    async fn update_credentials(&self, _update: &CredentialsUpdate) -> Result<()> {
        Err(Error::Api("not supported by this mock".to_string()))
    }
}
