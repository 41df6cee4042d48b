//! Catalog view controller
//!
//! Composition root: wires the synchronizer's output through the filter
//! engine and dispatches confirmed user intents to the gateway and the
//! photo attacher. Holds exactly one piece of durable local state, the
//! id currently selected for editing. Read-only mode is honored here by
//! refusing every mutation before any store is contacted; it is a UI
//! convention, not a store-level permission.

use std::sync::Arc;

use shared::{Filters, Photo, PhotoUpload, Place, PlaceDraft, Status, apply_filters};
use tokio::sync::watch;

use crate::config::CatalogConfig;
use crate::error::{CatalogError, CatalogResult};
use crate::gateway::CatalogGateway;
use crate::photos::PhotoAttacher;
use crate::store::{DocumentStore, ObjectStore};
use crate::sync::CatalogSynchronizer;

/// One catalog session over a namespace.
pub struct CatalogController {
    config: CatalogConfig,
    gateway: CatalogGateway,
    attacher: PhotoAttacher,
    synchronizer: CatalogSynchronizer,
    catalog_rx: watch::Receiver<Vec<Place>>,
    edit_id: Option<String>,
}

impl CatalogController {
    /// Start a session: subscribes to the configured namespace and
    /// resolves once the initial snapshot has been applied.
    pub async fn start(
        documents: Arc<dyn DocumentStore>,
        objects: Arc<dyn ObjectStore>,
        config: CatalogConfig,
    ) -> CatalogResult<Self> {
        let synchronizer =
            CatalogSynchronizer::start(Arc::clone(&documents), config.namespace.clone()).await?;
        let catalog_rx = synchronizer.catalog();
        let gateway = CatalogGateway::new(documents, config.namespace.clone());
        let attacher = PhotoAttacher::new(objects, gateway.clone());
        Ok(Self {
            config,
            gateway,
            attacher,
            synchronizer,
            catalog_rx,
            edit_id: None,
        })
    }

    pub fn namespace(&self) -> &str {
        self.synchronizer.namespace()
    }

    pub fn read_only(&self) -> bool {
        self.config.read_only
    }

    /// Current catalog, most recently touched first.
    pub fn places(&self) -> Vec<Place> {
        self.catalog_rx.borrow().clone()
    }

    /// Filtered view of the current catalog; ordering is inherited.
    pub fn filtered(&self, filters: &Filters) -> Vec<Place> {
        apply_filters(&self.catalog_rx.borrow(), filters)
    }

    /// Watch side of the catalog for reactive consumers.
    pub fn catalog(&self) -> watch::Receiver<Vec<Place>> {
        self.catalog_rx.clone()
    }

    pub fn edit_id(&self) -> Option<&str> {
        self.edit_id.as_deref()
    }

    pub fn select_for_edit(&mut self, id: impl Into<String>) {
        self.edit_id = Some(id.into());
    }

    pub fn clear_selection(&mut self) {
        self.edit_id = None;
    }

    /// Save an editor draft: updates the selected place if one is open
    /// for editing, creates a new one otherwise. A successful save
    /// returns the editor to "new entry" mode.
    pub async fn save(&mut self, draft: PlaceDraft) -> CatalogResult<()> {
        self.ensure_writable()?;
        match self.edit_id.clone() {
            Some(id) => self.gateway.update(&id, draft).await?,
            None => {
                self.gateway.create(draft).await?;
            }
        }
        self.edit_id = None;
        Ok(())
    }

    /// Delete a place. Clears the edit selection when it names the
    /// deleted id, so the editor never points at a dead entity.
    pub async fn delete(&mut self, id: &str) -> CatalogResult<()> {
        self.ensure_writable()?;
        self.gateway.delete(id).await?;
        if self.edit_id.as_deref() == Some(id) {
            self.edit_id = None;
        }
        Ok(())
    }

    /// Toggle a place's visit status.
    pub async fn set_status(&self, id: &str, status: Status) -> CatalogResult<()> {
        self.ensure_writable()?;
        self.gateway.change_status(id, status).await
    }

    /// Attach photos to a place, merging against the photo list in the
    /// current local snapshot (possibly stale; last write wins at the
    /// store). Returns the merged list that was written.
    pub async fn add_photos(
        &self,
        id: &str,
        uploads: Vec<PhotoUpload>,
    ) -> CatalogResult<Vec<Photo>> {
        self.ensure_writable()?;
        let existing: Vec<Photo> = self
            .catalog_rx
            .borrow()
            .iter()
            .find(|p| p.id == id)
            .map(|p| p.photos.clone())
            .unwrap_or_default();
        self.attacher.attach(id, &existing, uploads).await
    }

    /// End the session, releasing the namespace subscription.
    pub async fn shutdown(self) {
        self.synchronizer.stop().await;
    }

    fn ensure_writable(&self) -> CatalogResult<()> {
        if self.config.read_only {
            return Err(CatalogError::ReadOnly);
        }
        Ok(())
    }
}
