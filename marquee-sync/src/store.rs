//! Content store
//!
//! Single source of truth for the whole content model. Views read from
//! the store; editor sessions write local edits into it and are the only
//! callers that trigger a persist. The store is a cheap cloneable handle;
//! construct it once at application start and inject it into consumers.

use std::sync::Arc;

use tokio::sync::RwLock;

use marquee_common::model::{AboutPage, Album, HeroConfig, Tour, Video};
use marquee_common::normalize::{
    normalize_about, normalize_album, normalize_hero, normalize_tour, normalize_video,
};
use marquee_common::{ContentModel, Error};

use crate::client::ContentApi;

/// The five resources reloaded by a refresh
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Hero,
    Albums,
    Videos,
    Tours,
    About,
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResourceKind::Hero => write!(f, "hero"),
            ResourceKind::Albums => write!(f, "albums"),
            ResourceKind::Videos => write!(f, "videos"),
            ResourceKind::Tours => write!(f, "tours"),
            ResourceKind::About => write!(f, "about"),
        }
    }
}

/// One failed slice of a refresh
#[derive(Debug, Clone)]
pub struct RefreshFailure {
    pub resource: ResourceKind,
    pub message: String,
}

/// Result of a refresh: which resource slices failed to reload.
///
/// A failed slice keeps its previous value in the store, so a partial
/// failure never blanks out working content.
#[derive(Debug, Clone, Default)]
pub struct RefreshOutcome {
    pub failures: Vec<RefreshFailure>,
}

impl RefreshOutcome {
    /// True when all five slices reloaded
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    fn record(&mut self, resource: ResourceKind, error: Error) {
        let message = error.to_string();
        tracing::warn!(resource = %resource, message = %message, "Refresh slice failed, holding previous value");
        self.failures.push(RefreshFailure { resource, message });
    }
}

/// Shared content store handle
#[derive(Clone)]
pub struct ContentStore {
    api: Arc<dyn ContentApi>,
    model: Arc<RwLock<ContentModel>>,
}

impl ContentStore {
    /// Create a store backed by the given API. The model starts at its
    /// defaults until the first [`refresh`](Self::refresh) completes.
    pub fn new(api: Arc<dyn ContentApi>) -> Self {
        Self {
            api,
            model: Arc::new(RwLock::new(ContentModel::initial())),
        }
    }

    pub(crate) fn api(&self) -> &Arc<dyn ContentApi> {
        &self.api
    }

    /// Reload all five resources and swap them into the model.
    ///
    /// The fetches run concurrently; the model is only touched after all
    /// of them settle, inside a single write section, so readers never
    /// observe hero data from one reload paired with album data from
    /// another. A failed fetch keeps the previous slice and is reported
    /// in the outcome instead of blocking the others.
    ///
    /// Unsaved local edits are superseded by the reloaded server truth;
    /// the editing pattern is "edit locally, save explicitly, refresh".
    ///
    /// Overlapping refreshes are not guarded against: whichever call
    /// finishes last writes the model last (last-to-finish wins). This is
    /// an accepted race of the editing UI, not a consistency mechanism.
    pub async fn refresh(&self) -> RefreshOutcome {
        let (hero, albums, videos, tours, about) = tokio::join!(
            self.api.fetch_hero(),
            self.api.fetch_albums(),
            self.api.fetch_videos(),
            self.api.fetch_tours(),
            self.api.fetch_about(),
        );

        let mut outcome = RefreshOutcome::default();
        let mut model = self.model.write().await;

        match hero {
            Ok(record) => model.hero = normalize_hero(&record),
            Err(e) => outcome.record(ResourceKind::Hero, e),
        }
        match albums {
            Ok(records) => model.albums = records.iter().map(normalize_album).collect(),
            Err(e) => outcome.record(ResourceKind::Albums, e),
        }
        match videos {
            Ok(records) => model.videos = records.iter().map(normalize_video).collect(),
            Err(e) => outcome.record(ResourceKind::Videos, e),
        }
        match tours {
            Ok(records) => model.tours = records.iter().map(normalize_tour).collect(),
            Err(e) => outcome.record(ResourceKind::Tours, e),
        }
        match about {
            Ok(record) => model.about = normalize_about(&record),
            Err(e) => outcome.record(ResourceKind::About, e),
        }

        outcome
    }

    /// Restore the built-in demo model.
    ///
    /// For local development without a backend only; nothing in the
    /// editor code paths calls this.
    pub async fn reset(&self) {
        let mut model = self.model.write().await;
        *model = ContentModel::demo();
    }

    // ========================================
    // Readers
    // ========================================

    /// Clone of the full model
    pub async fn snapshot(&self) -> ContentModel {
        self.model.read().await.clone()
    }

    pub async fn hero(&self) -> HeroConfig {
        self.model.read().await.hero.clone()
    }

    pub async fn albums(&self) -> Vec<Album> {
        self.model.read().await.albums.clone()
    }

    pub async fn videos(&self) -> Vec<Video> {
        self.model.read().await.videos.clone()
    }

    pub async fn tours(&self) -> Vec<Tour> {
        self.model.read().await.tours.clone()
    }

    pub async fn about(&self) -> AboutPage {
        self.model.read().await.about.clone()
    }

    pub async fn album(&self, id: &str) -> Option<Album> {
        self.model.read().await.albums.iter().find(|a| a.id == id).cloned()
    }

    pub async fn video(&self, id: &str) -> Option<Video> {
        self.model.read().await.videos.iter().find(|v| v.id == id).cloned()
    }

    pub async fn tour(&self, id: &str) -> Option<Tour> {
        self.model.read().await.tours.iter().find(|t| t.id == id).cloned()
    }

    pub(crate) async fn with_model<R>(&self, f: impl FnOnce(&ContentModel) -> R) -> R {
        f(&*self.model.read().await)
    }

    pub(crate) async fn with_model_mut<R>(&self, f: impl FnOnce(&mut ContentModel) -> R) -> R {
        f(&mut *self.model.write().await)
    }

    // ========================================
    // Local mutators (live form editing)
    // ========================================
    //
    // In-memory only: visible to readers immediately, never sent to the
    // server, and superseded by the next refresh. Saving is the editor
    // session's job.

    pub async fn mutate_hero(&self, f: impl FnOnce(&mut HeroConfig)) {
        f(&mut self.model.write().await.hero);
    }

    pub async fn mutate_about(&self, f: impl FnOnce(&mut AboutPage)) {
        f(&mut self.model.write().await.about);
    }

    /// Apply a local change to the album with the given id; false when absent
    pub async fn mutate_album(&self, id: &str, f: impl FnOnce(&mut Album)) -> bool {
        let mut model = self.model.write().await;
        match model.albums.iter_mut().find(|a| a.id == id) {
            Some(album) => {
                f(album);
                true
            }
            None => false,
        }
    }

    /// Apply a local change to the video with the given id; false when absent
    pub async fn mutate_video(&self, id: &str, f: impl FnOnce(&mut Video)) -> bool {
        let mut model = self.model.write().await;
        match model.videos.iter_mut().find(|v| v.id == id) {
            Some(video) => {
                f(video);
                true
            }
            None => false,
        }
    }

    /// Apply a local change to the tour with the given id; false when absent
    pub async fn mutate_tour(&self, id: &str, f: impl FnOnce(&mut Tour)) -> bool {
        let mut model = self.model.write().await;
        match model.tours.iter_mut().find(|t| t.id == id) {
            Some(tour) => {
                f(tour);
                true
            }
            None => false,
        }
    }
}
