//! In-memory store implementations
//!
//! Process-local stand-ins for the remote document and object stores,
//! used by tests, examples, and offline development. They honor the
//! full store contract: snapshot fan-out on every write, `updatedAt`
//! descending ordering, server timestamp sentinel substitution, and
//! `NotFound` on stale identifiers.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;
use shared::new_id;
use tokio::sync::mpsc;

use super::{
    DocumentStore, ObjectHandle, ObjectStore, RawDocument, StoreError, StoreResult, Subscription,
};

/// Server token fields whose null sentinels the store replaces with its
/// own clock on write.
const TOKEN_FIELDS: [&str; 2] = ["createdAtTS", "updatedAtTS"];

#[derive(Default)]
struct NamespaceState {
    docs: HashMap<String, Value>,
    subscribers: Vec<mpsc::UnboundedSender<Vec<RawDocument>>>,
}

impl NamespaceState {
    /// Full collection contents, most recently touched first.
    fn snapshot(&self) -> Vec<RawDocument> {
        let mut docs: Vec<RawDocument> = self
            .docs
            .iter()
            .map(|(id, data)| RawDocument {
                id: id.clone(),
                data: data.clone(),
            })
            .collect();
        docs.sort_by(|a, b| {
            let key = |d: &RawDocument| {
                (
                    d.data["updatedAt"].as_str().unwrap_or("").to_string(),
                    d.id.clone(),
                )
            };
            key(b).cmp(&key(a))
        });
        docs
    }

    /// Re-deliver the current snapshot to every live subscriber,
    /// pruning the ones whose receiving side is gone.
    fn broadcast(&mut self) {
        let snapshot = self.snapshot();
        self.subscribers
            .retain(|tx| tx.send(snapshot.clone()).is_ok());
    }
}

#[derive(Default)]
struct DocInner {
    namespaces: HashMap<String, NamespaceState>,
    /// Monotonic stand-in for the server clock backing timestamp tokens
    clock: i64,
}

impl DocInner {
    /// Replace null token sentinels with a fresh clock value.
    fn assign_tokens(&mut self, doc: &mut Value) {
        for field in TOKEN_FIELDS {
            if let Some(slot) = doc.get_mut(field) {
                if slot.is_null() {
                    self.clock += 1;
                    *slot = Value::from(self.clock);
                }
            }
        }
    }
}

/// In-memory [`DocumentStore`]
#[derive(Clone, Default)]
pub struct MemoryDocumentStore {
    inner: Arc<Mutex<DocInner>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw document body, for inspection in tests.
    pub fn document(&self, namespace: &str, id: &str) -> Option<Value> {
        let inner = self.inner.lock();
        inner.namespaces.get(namespace)?.docs.get(id).cloned()
    }

    /// Insert a raw document as another writer would have left it,
    /// bypassing every client-side convention. Useful for schema-drift
    /// scenarios in tests.
    pub fn insert_raw(&self, namespace: &str, id: &str, data: Value) {
        let mut inner = self.inner.lock();
        let ns = inner.namespaces.entry(namespace.to_string()).or_default();
        ns.docs.insert(id.to_string(), data);
        ns.broadcast();
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn subscribe(&self, namespace: &str) -> StoreResult<Subscription> {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut inner = self.inner.lock();
        let ns = inner.namespaces.entry(namespace.to_string()).or_default();
        // Initial snapshot before the sender is registered, so the
        // subscriber always sees current contents first.
        let _ = tx.send(ns.snapshot());
        ns.subscribers.push(tx);
        tracing::debug!(namespace = %namespace, "subscription opened");
        Ok(Subscription::new(rx))
    }

    async fn create(&self, namespace: &str, mut doc: Value) -> StoreResult<String> {
        if !doc.is_object() {
            return Err(StoreError::Transport("document must be a JSON object".into()));
        }
        let mut inner = self.inner.lock();
        inner.assign_tokens(&mut doc);
        let id = new_id();
        let ns = inner.namespaces.entry(namespace.to_string()).or_default();
        ns.docs.insert(id.clone(), doc);
        ns.broadcast();
        tracing::debug!(namespace = %namespace, id = %id, "document created");
        Ok(id)
    }

    async fn update(&self, namespace: &str, id: &str, mut patch: Value) -> StoreResult<()> {
        if !patch.is_object() {
            return Err(StoreError::Transport("patch must be a JSON object".into()));
        }
        let mut inner = self.inner.lock();
        inner.assign_tokens(&mut patch);
        let ns = inner
            .namespaces
            .get_mut(namespace)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        let doc = ns
            .docs
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        if let (Some(target), Value::Object(fields)) = (doc.as_object_mut(), patch) {
            for (key, value) in fields {
                target.insert(key, value);
            }
        }
        ns.broadcast();
        tracing::debug!(namespace = %namespace, id = %id, "document updated");
        Ok(())
    }

    async fn delete(&self, namespace: &str, id: &str) -> StoreResult<()> {
        let mut inner = self.inner.lock();
        let ns = inner
            .namespaces
            .get_mut(namespace)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        ns.docs
            .remove(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        ns.broadcast();
        tracing::debug!(namespace = %namespace, id = %id, "document deleted");
        Ok(())
    }
}

/// In-memory [`ObjectStore`]
///
/// Resolved URLs use the `mem://` scheme and embed the storage path.
#[derive(Clone, Default)]
pub struct MemoryObjectStore {
    objects: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl MemoryObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, path: &str) -> bool {
        self.objects.lock().contains_key(path)
    }

    pub fn object_count(&self) -> usize {
        self.objects.lock().len()
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    async fn put(&self, path: &str, bytes: Vec<u8>) -> StoreResult<ObjectHandle> {
        self.objects.lock().insert(path.to_string(), bytes);
        Ok(ObjectHandle::new(path))
    }

    async fn resolve_url(&self, handle: &ObjectHandle) -> StoreResult<String> {
        let objects = self.objects.lock();
        if !objects.contains_key(&handle.0) {
            return Err(StoreError::NotFound(handle.0.clone()));
        }
        Ok(format!("mem://{}", handle.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn create_assigns_tokens_and_id() {
        let store = MemoryDocumentStore::new();
        let id = store
            .create(
                "ns",
                json!({ "name": "a", "status": "want", "updatedAt": "t1",
                        "createdAtTS": null, "updatedAtTS": null }),
            )
            .await
            .unwrap();
        let doc = store.document("ns", &id).unwrap();
        assert!(doc["createdAtTS"].is_i64());
        assert!(doc["updatedAtTS"].is_i64());
    }

    #[tokio::test]
    async fn snapshots_order_by_updated_at_desc() {
        let store = MemoryDocumentStore::new();
        store
            .create("ns", json!({ "name": "old", "status": "want", "updatedAt": "2025-01-01T00:00:00.000Z" }))
            .await
            .unwrap();
        store
            .create("ns", json!({ "name": "new", "status": "want", "updatedAt": "2025-02-01T00:00:00.000Z" }))
            .await
            .unwrap();

        let mut sub = store.subscribe("ns").await.unwrap();
        let snapshot = sub.next().await.unwrap();
        assert_eq!(snapshot[0].data["name"], json!("new"));
        assert_eq!(snapshot[1].data["name"], json!("old"));
    }

    #[tokio::test]
    async fn every_write_reemits_to_subscribers() {
        let store = MemoryDocumentStore::new();
        let mut sub = store.subscribe("ns").await.unwrap();
        assert!(sub.next().await.unwrap().is_empty());

        let id = store
            .create("ns", json!({ "name": "a", "status": "want", "updatedAt": "t1" }))
            .await
            .unwrap();
        assert_eq!(sub.next().await.unwrap().len(), 1);

        store
            .update("ns", &id, json!({ "status": "done" }))
            .await
            .unwrap();
        let snap = sub.next().await.unwrap();
        assert_eq!(snap[0].data["status"], json!("done"));

        store.delete("ns", &id).await.unwrap();
        assert!(sub.next().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_and_delete_of_missing_id_are_rejected() {
        let store = MemoryDocumentStore::new();
        assert!(matches!(
            store.update("ns", "ghost", json!({})).await,
            Err(StoreError::NotFound(_))
        ));
        assert!(matches!(
            store.delete("ns", "ghost").await,
            Err(StoreError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn object_store_round_trip() {
        let store = MemoryObjectStore::new();
        let handle = store.put("ns/p1/x-a.jpg", vec![1, 2, 3]).await.unwrap();
        assert_eq!(
            store.resolve_url(&handle).await.unwrap(),
            "mem://ns/p1/x-a.jpg"
        );
        let missing = ObjectHandle::new("nope");
        assert!(store.resolve_url(&missing).await.is_err());
    }
}
