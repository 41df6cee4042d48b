//! Catalog synchronizer
//!
//! Keeps the local catalog consistent with one namespace's remote
//! collection. Subscribes to the store's snapshot stream, decodes each
//! record defensively, and republishes the whole catalog through a
//! watch channel on every remote change. Partial patching is never
//! attempted; the latest snapshot is the only source of truth.

use std::sync::Arc;

use shared::{Place, PlaceDoc};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::error::CatalogResult;
use crate::store::{DocumentStore, RawDocument, Subscription};

/// Live synchronizer for one namespace.
///
/// Exactly one synchronizer should be running per consuming context;
/// switching namespaces means stopping the old one before starting the
/// new one, otherwise snapshots from two collections could interleave
/// into one local catalog.
pub struct CatalogSynchronizer {
    namespace: String,
    catalog_rx: watch::Receiver<Vec<Place>>,
    shutdown: CancellationToken,
    worker: Option<JoinHandle<()>>,
}

impl CatalogSynchronizer {
    /// Subscribe to `namespace` and wait for the initial snapshot, then
    /// keep the catalog current from a background worker.
    pub async fn start(
        store: Arc<dyn DocumentStore>,
        namespace: impl Into<String>,
    ) -> CatalogResult<Self> {
        let namespace = namespace.into();
        let mut subscription = store.subscribe(&namespace).await?;
        let initial = subscription.next().await.unwrap_or_default();
        let (catalog_tx, catalog_rx) = watch::channel(decode_snapshot(initial));
        let shutdown = CancellationToken::new();
        let worker = tokio::spawn(run(
            subscription,
            catalog_tx,
            shutdown.clone(),
            namespace.clone(),
        ));
        tracing::info!(namespace = %namespace, "catalog synchronizer started");
        Ok(Self {
            namespace,
            catalog_rx,
            shutdown,
            worker: Some(worker),
        })
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Read side of the local catalog. Each emission replaces the whole
    /// view; receivers only ever observe complete snapshots.
    pub fn catalog(&self) -> watch::Receiver<Vec<Place>> {
        self.catalog_rx.clone()
    }

    /// Release the subscription and wait for the worker to finish.
    pub async fn stop(mut self) {
        self.shutdown.cancel();
        if let Some(worker) = self.worker.take() {
            let _ = worker.await;
        }
    }
}

impl Drop for CatalogSynchronizer {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

async fn run(
    mut subscription: Subscription,
    catalog_tx: watch::Sender<Vec<Place>>,
    shutdown: CancellationToken,
    namespace: String,
) {
    loop {
        tokio::select! {
            _ = shutdown.cancelled() => {
                tracing::debug!(namespace = %namespace, "catalog synchronizer shutting down");
                break;
            }

            snapshot = subscription.next() => {
                match snapshot {
                    Some(docs) => {
                        let places = decode_snapshot(docs);
                        tracing::debug!(
                            namespace = %namespace,
                            count = places.len(),
                            "catalog snapshot applied"
                        );
                        if catalog_tx.send(places).is_err() {
                            tracing::debug!(namespace = %namespace, "all catalog receivers dropped");
                            break;
                        }
                    }
                    None => {
                        tracing::info!(namespace = %namespace, "snapshot stream closed");
                        break;
                    }
                }
            }
        }
    }
    subscription.unsubscribe();
}

/// Decode one snapshot into the local representation.
///
/// Optional fields fall back to documented defaults; a record missing
/// `name` or `status` is malformed and is skipped with a warning rather
/// than failing the whole snapshot.
fn decode_snapshot(docs: Vec<RawDocument>) -> Vec<Place> {
    docs.into_iter()
        .filter_map(|raw| match serde_json::from_value::<PlaceDoc>(raw.data) {
            Ok(doc) => Some(Place::from_doc(raw.id, doc)),
            Err(error) => {
                tracing::warn!(id = %raw.id, error = %error, "skipping malformed place record");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use shared::{PriceRange, Status};

    #[test]
    fn decode_fills_documented_defaults() {
        let docs = vec![RawDocument {
            id: "p1".into(),
            data: json!({ "name": "Sushi Tengoku", "status": "booked" }),
        }];
        let places = decode_snapshot(docs);
        assert_eq!(places.len(), 1);
        let place = &places[0];
        assert_eq!(place.status, Status::Booked);
        assert_eq!(place.price_range, PriceRange::Unset);
        assert!(place.photos.is_empty());
        assert!(!place.updated_at.is_empty());
    }

    #[test]
    fn decode_skips_malformed_records_and_keeps_the_rest() {
        let docs = vec![
            RawDocument {
                id: "bad".into(),
                data: json!({ "name": "No Status Diner" }),
            },
            RawDocument {
                id: "good".into(),
                data: json!({ "name": "Ramen Ichi", "status": "want" }),
            },
        ];
        let places = decode_snapshot(docs);
        assert_eq!(places.len(), 1);
        assert_eq!(places[0].id, "good");
    }
}
