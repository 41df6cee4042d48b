//! Catalog mutation gateway
//!
//! Translates high-level intents into single remote writes. The gateway
//! never mutates the local catalog: the synchronizer's next snapshot is
//! the sole source of truth for what became visible. Failures propagate
//! to the caller; there is no retry and nothing to roll back.

use std::sync::Arc;

use shared::{
    PhotosPatch, Photo, PlaceDoc, PlaceDraft, PlaceUpdate, ServerTimestamp, Status, StatusPatch,
    now_iso,
};

use crate::error::{CatalogError, CatalogResult};
use crate::store::{DocumentStore, StoreError};

/// Write-side client for one namespace's place collection.
#[derive(Clone)]
pub struct CatalogGateway {
    store: Arc<dyn DocumentStore>,
    namespace: String,
}

impl CatalogGateway {
    pub fn new(store: Arc<dyn DocumentStore>, namespace: impl Into<String>) -> Self {
        Self {
            store,
            namespace: namespace.into(),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Create a new place from an editor draft.
    ///
    /// One local timestamp backs both `createdAt` and `updatedAt`, and
    /// both server token fields are requested. Photos default to empty
    /// unless the draft carries some. Returns the store-assigned id.
    pub async fn create(&self, draft: PlaceDraft) -> CatalogResult<String> {
        validate(&draft)?;
        let now = now_iso();
        let doc = PlaceDoc {
            name: draft.name,
            area: draft.area,
            genre: draft.genre,
            price_range: draft.price_range,
            url: draft.url,
            status: draft.status,
            rating: draft.rating,
            note: draft.note,
            photos: draft.photos.unwrap_or_default(),
            created_at: Some(now.clone()),
            updated_at: Some(now),
            created_at_ts: Some(ServerTimestamp::Request),
            updated_at_ts: Some(ServerTimestamp::Request),
        };
        let value = serde_json::to_value(&doc).map_err(StoreError::from)?;
        let id = self.store.create(&self.namespace, value).await?;
        tracing::info!(namespace = %self.namespace, id = %id, "place created");
        Ok(id)
    }

    /// Rewrite a place's editable fields.
    ///
    /// Writes the full draft field set with a fresh `updatedAt`;
    /// `createdAt` and the photo list are left untouched. A stale id is
    /// surfaced as a rejected operation by the store.
    pub async fn update(&self, id: &str, draft: PlaceDraft) -> CatalogResult<()> {
        validate(&draft)?;
        let update = PlaceUpdate {
            name: draft.name,
            area: draft.area,
            genre: draft.genre,
            price_range: draft.price_range,
            url: draft.url,
            status: draft.status,
            rating: draft.rating,
            note: draft.note,
            updated_at: now_iso(),
        };
        let value = serde_json::to_value(&update).map_err(StoreError::from)?;
        self.store.update(&self.namespace, id, value).await?;
        tracing::info!(namespace = %self.namespace, id = %id, "place updated");
        Ok(())
    }

    /// Narrow status toggle: touches only `status`, `updatedAt`, and the
    /// `updatedAtTS` token. Kept separate from [`update`](Self::update)
    /// so the most frequent interaction never re-submits unrelated
    /// fields.
    pub async fn change_status(&self, id: &str, status: Status) -> CatalogResult<()> {
        let patch = StatusPatch {
            status,
            updated_at: now_iso(),
            updated_at_ts: ServerTimestamp::Request,
        };
        let value = serde_json::to_value(&patch).map_err(StoreError::from)?;
        self.store.update(&self.namespace, id, value).await?;
        tracing::info!(namespace = %self.namespace, id = %id, status = %status, "status changed");
        Ok(())
    }

    /// Remove a place.
    ///
    /// Callers owning an edit selection must clear it when it names the
    /// deleted id; the selection is not gateway state.
    pub async fn delete(&self, id: &str) -> CatalogResult<()> {
        self.store.delete(&self.namespace, id).await?;
        tracing::info!(namespace = %self.namespace, id = %id, "place deleted");
        Ok(())
    }

    /// Rewrite the photo list after a merge, with a fresh `updatedAt`
    /// and token. Used by the photo attacher only.
    pub(crate) async fn write_photos(&self, id: &str, photos: Vec<Photo>) -> CatalogResult<()> {
        let patch = PhotosPatch {
            photos,
            updated_at: now_iso(),
            updated_at_ts: ServerTimestamp::Request,
        };
        let value = serde_json::to_value(&patch).map_err(StoreError::from)?;
        self.store.update(&self.namespace, id, value).await?;
        Ok(())
    }
}

fn validate(draft: &PlaceDraft) -> CatalogResult<()> {
    if draft.name.trim().is_empty() {
        return Err(CatalogError::Validation("name must not be empty".into()));
    }
    Ok(())
}
