//! Editor sessions
//!
//! Per-entity edit/save/delete workflow built on the content store. An
//! editor session holds a borrowed view of one entity: edits are written
//! into the store immediately (live form editing), an explicit save
//! commits them to the server, and every successful commit is followed by
//! a full refresh so local state reconciles with server truth.

use std::marker::PhantomData;

use async_trait::async_trait;
use serde_json::Value;

use marquee_common::api::{AboutPayload, AlbumPayload, HeroPayload, TourPayload, VideoPayload};
use marquee_common::model::{AboutPage, Album, HeroConfig, Tour, Video};
use marquee_common::normalize::record_id;
use marquee_common::{ContentModel, Error, Result};

use crate::client::ContentApi;
use crate::store::{ContentStore, RefreshOutcome, ResourceKind};

/// Where an editor session sits in the edit/save cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditState {
    /// No pending local change
    Clean,
    /// Local edit applied, not yet sent
    Dirty,
    /// Commit in flight
    Saving,
    /// Commit failed; the local edit is retained and no retry is automatic
    DirtyWithError(String),
}

impl EditState {
    /// True when the session holds an unsent local edit
    pub fn is_dirty(&self) -> bool {
        matches!(self, EditState::Dirty | EditState::DirtyWithError(_))
    }

    /// Message of the last failed commit, if any
    pub fn error(&self) -> Option<&str> {
        match self {
            EditState::DirtyWithError(message) => Some(message),
            _ => None,
        }
    }
}

impl std::fmt::Display for EditState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EditState::Clean => write!(f, "clean"),
            EditState::Dirty => write!(f, "dirty"),
            EditState::Saving => write!(f, "saving"),
            EditState::DirtyWithError(_) => write!(f, "dirty (save failed)"),
        }
    }
}

/// Human confirmation for a delete commit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteDecision {
    Confirmed,
    Cancelled,
}

/// What a delete call did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// Commit issued and confirmed by the server
    Deleted,
    /// Declined before any request was issued
    Cancelled,
}

/// A collection resource entity editable through [`EditorSession`]
#[async_trait]
pub trait CollectionEntity: Clone + Send + Sync + Sized + 'static {
    fn resource() -> ResourceKind;
    fn id(&self) -> &str;
    fn find_in(model: &ContentModel, id: &str) -> Option<Self>;
    /// Replace the stored entity with the same id; false when absent
    fn put_in(model: &mut ContentModel, entity: Self) -> bool;
    async fn create_remote(api: &dyn ContentApi, draft: &Self) -> Result<Value>;
    async fn update_remote(api: &dyn ContentApi, entity: &Self) -> Result<()>;
    async fn delete_remote(api: &dyn ContentApi, id: &str) -> Result<()>;
}

/// A singleton resource editable through [`SingletonEditor`]
#[async_trait]
pub trait SingletonEntity: Clone + Send + Sync + 'static {
    fn resource() -> ResourceKind;
    fn read_from(model: &ContentModel) -> Self;
    fn put_in(model: &mut ContentModel, entity: Self);
    async fn save_remote(api: &dyn ContentApi, entity: &Self) -> Result<()>;
}

fn replace_by_id<E: CollectionEntity>(slot: &mut Vec<E>, entity: E) -> bool {
    match slot.iter_mut().find(|e| e.id() == entity.id()) {
        Some(existing) => {
            *existing = entity;
            true
        }
        None => false,
    }
}

#[async_trait]
impl CollectionEntity for Album {
    fn resource() -> ResourceKind {
        ResourceKind::Albums
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn find_in(model: &ContentModel, id: &str) -> Option<Self> {
        model.albums.iter().find(|a| a.id == id).cloned()
    }

    fn put_in(model: &mut ContentModel, entity: Self) -> bool {
        replace_by_id(&mut model.albums, entity)
    }

    async fn create_remote(api: &dyn ContentApi, draft: &Self) -> Result<Value> {
        api.create_album(&AlbumPayload::from(draft)).await
    }

    async fn update_remote(api: &dyn ContentApi, entity: &Self) -> Result<()> {
        api.update_album(&entity.id, &AlbumPayload::from(entity)).await.map(|_| ())
    }

    async fn delete_remote(api: &dyn ContentApi, id: &str) -> Result<()> {
        api.delete_album(id).await
    }
}

#[async_trait]
impl CollectionEntity for Video {
    fn resource() -> ResourceKind {
        ResourceKind::Videos
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn find_in(model: &ContentModel, id: &str) -> Option<Self> {
        model.videos.iter().find(|v| v.id == id).cloned()
    }

    fn put_in(model: &mut ContentModel, entity: Self) -> bool {
        replace_by_id(&mut model.videos, entity)
    }

    async fn create_remote(api: &dyn ContentApi, draft: &Self) -> Result<Value> {
        api.create_video(&VideoPayload::from(draft)).await
    }

    async fn update_remote(api: &dyn ContentApi, entity: &Self) -> Result<()> {
        api.update_video(&entity.id, &VideoPayload::from(entity)).await.map(|_| ())
    }

    async fn delete_remote(api: &dyn ContentApi, id: &str) -> Result<()> {
        api.delete_video(id).await
    }
}

#[async_trait]
impl CollectionEntity for Tour {
    fn resource() -> ResourceKind {
        ResourceKind::Tours
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn find_in(model: &ContentModel, id: &str) -> Option<Self> {
        model.tours.iter().find(|t| t.id == id).cloned()
    }

    fn put_in(model: &mut ContentModel, entity: Self) -> bool {
        replace_by_id(&mut model.tours, entity)
    }

    async fn create_remote(api: &dyn ContentApi, draft: &Self) -> Result<Value> {
        api.create_tour(&TourPayload::from(draft)).await
    }

    async fn update_remote(api: &dyn ContentApi, entity: &Self) -> Result<()> {
        api.update_tour(&entity.id, &TourPayload::from(entity)).await.map(|_| ())
    }

    async fn delete_remote(api: &dyn ContentApi, id: &str) -> Result<()> {
        api.delete_tour(id).await
    }
}

#[async_trait]
impl SingletonEntity for HeroConfig {
    fn resource() -> ResourceKind {
        ResourceKind::Hero
    }

    fn read_from(model: &ContentModel) -> Self {
        model.hero.clone()
    }

    fn put_in(model: &mut ContentModel, entity: Self) {
        model.hero = entity;
    }

    async fn save_remote(api: &dyn ContentApi, entity: &Self) -> Result<()> {
        api.save_hero(&HeroPayload::from(entity)).await.map(|_| ())
    }
}

#[async_trait]
impl SingletonEntity for AboutPage {
    fn resource() -> ResourceKind {
        ResourceKind::About
    }

    fn read_from(model: &ContentModel) -> Self {
        model.about.clone()
    }

    fn put_in(model: &mut ContentModel, entity: Self) {
        model.about = entity;
    }

    async fn save_remote(api: &dyn ContentApi, entity: &Self) -> Result<()> {
        api.save_about(&AboutPayload::from(entity)).await.map(|_| ())
    }
}

/// Edit/save/delete session for one collection entity.
///
/// One session edits one entity; concurrent sessions on different
/// entities are independent. Same-entity sessions in two tabs are not
/// coordinated: last write wins.
pub struct EditorSession<E: CollectionEntity> {
    store: ContentStore,
    id: String,
    state: EditState,
    _entity: PhantomData<fn() -> E>,
}

pub type AlbumEditor = EditorSession<Album>;
pub type VideoEditor = EditorSession<Video>;
pub type TourEditor = EditorSession<Tour>;

impl<E: CollectionEntity> EditorSession<E> {
    /// Open a session on an entity already present in the store.
    pub async fn open(store: ContentStore, id: &str) -> Result<Self> {
        let exists = store.with_model(|m| E::find_in(m, id).is_some()).await;
        if !exists {
            return Err(Error::Validation(format!(
                "no {} entity with id {id}",
                E::resource()
            )));
        }
        Ok(Self {
            store,
            id: id.to_string(),
            state: EditState::Clean,
            _entity: PhantomData,
        })
    }

    /// Create a new entity from a placeholder draft and open a session on it.
    ///
    /// The entity identifier comes from the server's create response; a
    /// client-side fallback identifier on the draft is never persisted.
    /// The mandatory refresh after the commit brings the created record
    /// into the store.
    pub async fn create(store: ContentStore, draft: &E) -> Result<Self> {
        let record = E::create_remote(store.api().as_ref(), draft).await?;
        let id = record_id(&record);
        tracing::info!(resource = %E::resource(), id = %id, "Created entity");

        let outcome = store.refresh().await;
        if !outcome.is_complete() {
            tracing::warn!(resource = %E::resource(), "Refresh after create was partial");
        }

        Ok(Self {
            store,
            id,
            state: EditState::Clean,
            _entity: PhantomData,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn state(&self) -> &EditState {
        &self.state
    }

    /// Current working copy, read back from the store
    pub async fn entity(&self) -> Option<E> {
        self.store.with_model(|m| E::find_in(m, &self.id)).await
    }

    /// Apply a local edit. The change lands in the store immediately
    /// (readers see it on the next read) but is not sent anywhere until
    /// [`save`](Self::save).
    pub async fn edit(&mut self, f: impl FnOnce(&mut E) + Send) -> Result<()> {
        let applied = self
            .store
            .with_model_mut(|m| match E::find_in(m, &self.id) {
                Some(mut entity) => {
                    f(&mut entity);
                    E::put_in(m, entity)
                }
                None => false,
            })
            .await;

        if !applied {
            return Err(Error::Validation(format!(
                "{} entity {} is no longer in the store",
                E::resource(),
                self.id
            )));
        }
        self.state = EditState::Dirty;
        Ok(())
    }

    /// Commit the working copy to the server.
    ///
    /// On success the store is refreshed (reconciling with server truth)
    /// and the session returns to `Clean`; the refresh outcome is handed
    /// back so partial failures can be surfaced. On failure the local
    /// edit is retained, the session moves to `DirtyWithError`, and no
    /// retry happens automatically.
    pub async fn save(&mut self) -> Result<RefreshOutcome> {
        let entity = self
            .entity()
            .await
            .ok_or_else(|| {
                Error::Validation(format!(
                    "{} entity {} is no longer in the store",
                    E::resource(),
                    self.id
                ))
            })?;

        self.state = EditState::Saving;
        match E::update_remote(self.store.api().as_ref(), &entity).await {
            Ok(()) => {
                let outcome = self.store.refresh().await;
                self.state = EditState::Clean;
                Ok(outcome)
            }
            Err(e) => {
                self.state = EditState::DirtyWithError(e.to_string());
                Err(e)
            }
        }
    }

    /// Delete the entity, gated on an explicit human confirmation.
    ///
    /// A cancelled decision issues no request and leaves everything
    /// untouched. On a failed commit the entity stays visible and
    /// editable.
    pub async fn delete(&mut self, decision: DeleteDecision) -> Result<DeleteOutcome> {
        if decision == DeleteDecision::Cancelled {
            return Ok(DeleteOutcome::Cancelled);
        }

        match E::delete_remote(self.store.api().as_ref(), &self.id).await {
            Ok(()) => {
                tracing::info!(resource = %E::resource(), id = %self.id, "Deleted entity");
                self.store.refresh().await;
                self.state = EditState::Clean;
                Ok(DeleteOutcome::Deleted)
            }
            Err(e) => {
                self.state = EditState::DirtyWithError(e.to_string());
                Err(e)
            }
        }
    }
}

/// Edit/save session for a singleton resource (hero, about).
///
/// Singletons are lazily materialized server-side, so there is no create
/// or delete; the session always has an entity to work on.
pub struct SingletonEditor<E: SingletonEntity> {
    store: ContentStore,
    state: EditState,
    _entity: PhantomData<fn() -> E>,
}

pub type HeroEditor = SingletonEditor<HeroConfig>;
pub type AboutEditor = SingletonEditor<AboutPage>;

impl<E: SingletonEntity> SingletonEditor<E> {
    pub fn new(store: ContentStore) -> Self {
        Self {
            store,
            state: EditState::Clean,
            _entity: PhantomData,
        }
    }

    pub fn state(&self) -> &EditState {
        &self.state
    }

    /// Current working copy, read back from the store
    pub async fn entity(&self) -> E {
        self.store.with_model(E::read_from).await
    }

    /// Apply a local edit; in-memory only until [`save`](Self::save).
    pub async fn edit(&mut self, f: impl FnOnce(&mut E) + Send) {
        self.store
            .with_model_mut(|m| {
                let mut entity = E::read_from(m);
                f(&mut entity);
                E::put_in(m, entity);
            })
            .await;
        self.state = EditState::Dirty;
    }

    /// Commit the working copy, then refresh. Same cycle as
    /// [`EditorSession::save`].
    pub async fn save(&mut self) -> Result<RefreshOutcome> {
        let entity = self.entity().await;
        self.state = EditState::Saving;
        match E::save_remote(self.store.api().as_ref(), &entity).await {
            Ok(()) => {
                let outcome = self.store.refresh().await;
                self.state = EditState::Clean;
                Ok(outcome)
            }
            Err(e) => {
                self.state = EditState::DirtyWithError(e.to_string());
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockApi;
    use marquee_common::normalize::normalize_album;
    use serde_json::json;
    use std::sync::Arc;

    async fn ready_store(api: Arc<MockApi>) -> ContentStore {
        let store = ContentStore::new(api);
        store.refresh().await;
        store
    }

    #[tokio::test]
    async fn create_album_round_trips_with_defaults() {
        let api = MockApi::new();
        let store = ready_store(api.clone()).await;

        let draft = normalize_album(&json!({
            "title": "X",
            "coverImage": "/x.jpg",
        }));
        let session = AlbumEditor::create(store.clone(), &draft).await.unwrap();

        assert_eq!(session.state(), &EditState::Clean);
        // Identifier was assigned by the server, not taken from the draft
        assert_ne!(session.id(), draft.id);

        let album = store.album(session.id()).await.expect("created album in store");
        assert_eq!(album.title, "X");
        assert_eq!(album.cover_image, "/x.jpg");
        assert_eq!(album.summary, "");
        assert!(album.tracks.is_empty());
        assert!(album.links.is_empty());
    }

    #[tokio::test]
    async fn create_rejects_a_draft_missing_required_fields() {
        let api = MockApi::new();
        let store = ready_store(api.clone()).await;

        let draft = normalize_album(&json!({"title": "No cover"}));
        let result = AlbumEditor::create(store, &draft).await;
        assert!(matches!(result, Err(Error::Validation(_))));
        assert_eq!(api.calls("create_album"), 0);
    }

    #[tokio::test]
    async fn edit_save_cycle_returns_to_clean() {
        let api = MockApi::with_demo_data();
        let store = ready_store(api.clone()).await;
        let id = store.albums().await[0].id.clone();

        let mut session = AlbumEditor::open(store.clone(), &id).await.unwrap();
        assert_eq!(session.state(), &EditState::Clean);

        session.edit(|album| album.title = "Retitled".to_string()).await.unwrap();
        assert_eq!(session.state(), &EditState::Dirty);
        // Live edit is already visible to readers
        assert_eq!(store.album(&id).await.unwrap().title, "Retitled");

        let outcome = session.save().await.unwrap();
        assert!(outcome.is_complete());
        assert_eq!(session.state(), &EditState::Clean);
        // Server truth now carries the edit through the refresh
        assert_eq!(store.album(&id).await.unwrap().title, "Retitled");
    }

    #[tokio::test]
    async fn failed_save_keeps_the_local_edit_and_surfaces_the_error() {
        let api = MockApi::with_demo_data();
        let store = ready_store(api.clone()).await;
        let id = store.albums().await[0].id.clone();

        let mut session = AlbumEditor::open(store.clone(), &id).await.unwrap();
        session.edit(|album| album.title = "Unsaved".to_string()).await.unwrap();

        api.fail("update_album");
        let error = session.save().await.unwrap_err();
        assert!(matches!(error, Error::Api(_)));
        assert!(session.state().is_dirty());
        assert!(session.state().error().is_some());
        // No refresh ran, so the local edit survives
        assert_eq!(store.album(&id).await.unwrap().title, "Unsaved");
    }

    #[tokio::test]
    async fn video_source_url_update_rederives_the_identifier() {
        let api = MockApi::with_demo_data();
        let store = ready_store(api.clone()).await;
        let id = store.videos().await[0].id.clone();

        let mut session = VideoEditor::open(store.clone(), &id).await.unwrap();
        session
            .edit(|video| video.source_url = "https://youtu.be/abc12345678".to_string())
            .await
            .unwrap();
        session.save().await.unwrap();

        assert_eq!(store.video(&id).await.unwrap().video_id, "abc12345678");
    }

    #[tokio::test]
    async fn unextractable_source_url_fails_the_commit_and_keeps_the_old_id() {
        let api = MockApi::with_demo_data();
        let store = ready_store(api.clone()).await;
        let id = store.videos().await[0].id.clone();
        let original_id = store.video(&id).await.unwrap().video_id;

        let mut session = VideoEditor::open(store.clone(), &id).await.unwrap();
        session.edit(|video| video.source_url = "not a url".to_string()).await.unwrap();

        let error = session.save().await.unwrap_err();
        assert!(matches!(error, Error::Extraction(_)));
        assert!(session.state().is_dirty());
        // Server record untouched
        assert_eq!(api.video_field(&id, "videoId"), original_id);
    }

    #[tokio::test]
    async fn empty_source_url_keeps_the_stored_identifier() {
        let api = MockApi::with_demo_data();
        let store = ready_store(api.clone()).await;
        let id = store.videos().await[0].id.clone();
        let original_id = store.video(&id).await.unwrap().video_id;
        assert!(!original_id.is_empty());

        let mut session = VideoEditor::open(store.clone(), &id).await.unwrap();
        session
            .edit(|video| {
                video.source_url = String::new();
                video.views = "2M views".to_string();
            })
            .await
            .unwrap();
        session.save().await.unwrap();

        let video = store.video(&id).await.unwrap();
        assert_eq!(video.video_id, original_id);
        assert_eq!(video.views, "2M views");
    }

    #[tokio::test]
    async fn declined_delete_issues_no_request() {
        let api = MockApi::with_demo_data();
        let store = ready_store(api.clone()).await;
        let id = store.tours().await[0].id.clone();

        let mut session = TourEditor::open(store.clone(), &id).await.unwrap();
        let outcome = session.delete(DeleteDecision::Cancelled).await.unwrap();

        assert_eq!(outcome, DeleteOutcome::Cancelled);
        assert_eq!(api.calls("delete_tour"), 0);
        assert!(store.tour(&id).await.is_some());
    }

    #[tokio::test]
    async fn confirmed_delete_removes_the_entity_after_refresh() {
        let api = MockApi::with_demo_data();
        let store = ready_store(api.clone()).await;
        let id = store.tours().await[0].id.clone();

        let mut session = TourEditor::open(store.clone(), &id).await.unwrap();
        let outcome = session.delete(DeleteDecision::Confirmed).await.unwrap();

        assert_eq!(outcome, DeleteOutcome::Deleted);
        assert_eq!(api.calls("delete_tour"), 1);
        assert!(store.tour(&id).await.is_none());
    }

    #[tokio::test]
    async fn failed_delete_leaves_the_entity_editable() {
        let api = MockApi::with_demo_data();
        let store = ready_store(api.clone()).await;
        let id = store.tours().await[0].id.clone();

        api.fail("delete_tour");
        let mut session = TourEditor::open(store.clone(), &id).await.unwrap();
        assert!(session.delete(DeleteDecision::Confirmed).await.is_err());

        assert!(store.tour(&id).await.is_some());
        assert!(session.state().is_dirty());
        session.edit(|tour| tour.city = "Still editable".to_string()).await.unwrap();
    }

    #[tokio::test]
    async fn hero_editor_saves_through_the_singleton_endpoint() {
        let api = MockApi::with_demo_data();
        let store = ready_store(api.clone()).await;

        let mut editor = HeroEditor::new(store.clone());
        editor.edit(|hero| hero.artist_name = "Renamed".to_string()).await;
        assert_eq!(editor.state(), &EditState::Dirty);

        editor.save().await.unwrap();
        assert_eq!(editor.state(), &EditState::Clean);
        assert_eq!(store.hero().await.artist_name, "Renamed");
        assert_eq!(api.calls("save_hero"), 1);
    }

    #[tokio::test]
    async fn sessions_on_different_entities_are_independent() {
        let api = MockApi::with_demo_data();
        api.push_album(json!({"id": "a2", "title": "Second", "coverImage": "/2.jpg"}));
        let store = ready_store(api.clone()).await;

        let albums = store.albums().await;
        let mut first = AlbumEditor::open(store.clone(), &albums[0].id).await.unwrap();
        let mut second = AlbumEditor::open(store.clone(), &albums[1].id).await.unwrap();

        first.edit(|a| a.summary = "first edit".to_string()).await.unwrap();
        second.edit(|a| a.summary = "second edit".to_string()).await.unwrap();
        first.save().await.unwrap();

        // Saving the first session refreshed the store, wiping the
        // second session's unsaved local edit; its state still says so.
        assert_eq!(store.album(&albums[1].id).await.unwrap().summary, "");
        assert!(second.state().is_dirty());
        second.edit(|a| a.summary = "second edit".to_string()).await.unwrap();
        second.save().await.unwrap();
        assert_eq!(store.album(&albums[1].id).await.unwrap().summary, "second edit");
    }
}
