//! Photo attacher
//!
//! Uploads a batch of binary assets, resolves their retrievable URLs,
//! and rewrites the owning place's photo list under the cap. The merge
//! reads the caller's current local catalog, not the remote store, so a
//! batch racing a concurrent photo write from another session follows
//! plain last-write-wins at the store.

use std::sync::Arc;

use futures::future::join_all;
use shared::{MAX_BATCH_UPLOAD, MAX_PHOTOS, Photo, PhotoUpload, new_id, now_iso};

use crate::error::CatalogResult;
use crate::gateway::CatalogGateway;
use crate::store::{ObjectStore, StoreError};

/// Upload-and-merge client for place photos.
#[derive(Clone)]
pub struct PhotoAttacher {
    objects: Arc<dyn ObjectStore>,
    gateway: CatalogGateway,
}

impl PhotoAttacher {
    pub fn new(objects: Arc<dyn ObjectStore>, gateway: CatalogGateway) -> Self {
        Self { objects, gateway }
    }

    /// Attach a batch of uploads to the place `id`.
    ///
    /// At most [`MAX_BATCH_UPLOAD`] assets are accepted per call; the
    /// rest are dropped silently. Uploads run concurrently and the call
    /// waits for every one to finish: if any fails, no photos are
    /// attached and no remote write happens. On success the new photos
    /// are prepended to `existing` (order preserved within both groups),
    /// truncated to [`MAX_PHOTOS`], and written in one remote update.
    /// Returns the merged list.
    pub async fn attach(
        &self,
        id: &str,
        existing: &[Photo],
        uploads: Vec<PhotoUpload>,
    ) -> CatalogResult<Vec<Photo>> {
        let submitted = uploads.len();
        let accepted: Vec<PhotoUpload> = uploads.into_iter().take(MAX_BATCH_UPLOAD).collect();
        if accepted.len() < submitted {
            tracing::debug!(
                id = %id,
                dropped = submitted - accepted.len(),
                "photo batch over the cap, extra assets dropped"
            );
        }

        let namespace = self.gateway.namespace();
        let results = join_all(accepted.into_iter().map(|upload| {
            let objects = Arc::clone(&self.objects);
            // Namespace + entity + fresh id keeps paths collision-free
            // while the original name stays readable.
            let path = format!("{namespace}/{id}/{}-{}", new_id(), upload.file_name);
            async move {
                let handle = objects.put(&path, upload.bytes).await?;
                let url = objects.resolve_url(&handle).await?;
                Ok::<Photo, StoreError>(Photo {
                    id: new_id(),
                    url,
                    created_at: now_iso(),
                })
            }
        }))
        .await;

        // Every upload has settled at this point; fail the whole batch
        // on the first error so no partial photo list is ever written.
        let new_photos = results.into_iter().collect::<Result<Vec<Photo>, _>>()?;

        let mut merged = new_photos;
        merged.extend_from_slice(existing);
        merged.truncate(MAX_PHOTOS);
        self.gateway.write_photos(id, merged.clone()).await?;
        tracing::info!(id = %id, total = merged.len(), "photos attached");
        Ok(merged)
    }
}
