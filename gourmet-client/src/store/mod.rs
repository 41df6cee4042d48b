//! Remote store seams
//!
//! The catalog engine talks to two external collaborators: a document
//! store holding one record per place, and an object store holding the
//! photo binaries. Both are consumed through traits so production
//! backends and the in-memory implementations are interchangeable.

pub mod memory;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;
use tokio::sync::mpsc;

pub use memory::{MemoryDocumentStore, MemoryObjectStore};

/// Store error type
#[derive(Debug, Error)]
pub enum StoreError {
    /// The identifier no longer exists in the store
    #[error("document not found: {0}")]
    NotFound(String),

    /// Store unreachable or the write was rejected
    #[error("transport error: {0}")]
    Transport(String),

    /// Payload could not be encoded for the wire
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// One remote record as delivered in a snapshot: the store-assigned id
/// plus the raw document body, decoded defensively by the synchronizer.
#[derive(Debug, Clone)]
pub struct RawDocument {
    pub id: String,
    pub data: Value,
}

/// Live subscription to one namespace's place collection.
///
/// Yields full-collection snapshots ordered by `updatedAt` descending:
/// the initial contents first, then a fresh snapshot after every remote
/// write. Dropping the subscription releases it; the store prunes the
/// dead channel on its next emission.
#[derive(Debug)]
pub struct Subscription {
    rx: mpsc::UnboundedReceiver<Vec<RawDocument>>,
}

impl Subscription {
    pub fn new(rx: mpsc::UnboundedReceiver<Vec<RawDocument>>) -> Self {
        Self { rx }
    }

    /// Wait for the next snapshot. `None` means the store side closed
    /// the stream.
    pub async fn next(&mut self) -> Option<Vec<RawDocument>> {
        self.rx.recv().await
    }

    /// Release the subscription.
    pub fn unsubscribe(self) {}
}

/// Remote document store, one JSON document per place.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Open a live snapshot stream over `namespace`, ordered by
    /// `updatedAt` descending. The initial snapshot is delivered first.
    async fn subscribe(&self, namespace: &str) -> StoreResult<Subscription>;

    /// Create a document, returning the store-assigned identifier.
    /// `ServerTimestamp` request sentinels in the body are replaced with
    /// the store's own clock.
    async fn create(&self, namespace: &str, doc: Value) -> StoreResult<String>;

    /// Merge `patch`'s fields into an existing document. Nulls overwrite.
    /// Fails with [`StoreError::NotFound`] for an unknown id.
    async fn update(&self, namespace: &str, id: &str, patch: Value) -> StoreResult<()>;

    /// Remove a document. Fails with [`StoreError::NotFound`] for an
    /// unknown id.
    async fn delete(&self, namespace: &str, id: &str) -> StoreResult<()>;
}

/// Handle naming one stored binary. Opaque outside the object store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectHandle(pub(crate) String);

impl ObjectHandle {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }
}

/// Remote object store for photo binaries.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Store bytes at `path`, returning an opaque handle.
    async fn put(&self, path: &str, bytes: Vec<u8>) -> StoreResult<ObjectHandle>;

    /// Resolve a handle into a retrievable URL.
    async fn resolve_url(&self, handle: &ObjectHandle) -> StoreResult<String>;
}
