//! Gourmet Client - shared restaurant catalog engine
//!
//! Keeps a local reactive view consistent with a remotely stored,
//! multi-writer place collection, applies mutations against it, and
//! derives filtered views. The remote document and object stores are
//! consumed through the traits in [`store`]; in-memory implementations
//! are provided for development and tests.

pub mod config;
pub mod controller;
pub mod error;
pub mod gateway;
pub mod photos;
pub mod store;
pub mod sync;

pub use config::{CatalogConfig, DEFAULT_NAMESPACE};
pub use controller::CatalogController;
pub use error::{CatalogError, CatalogResult};
pub use gateway::CatalogGateway;
pub use photos::PhotoAttacher;
pub use store::{
    DocumentStore, MemoryDocumentStore, MemoryObjectStore, ObjectHandle, ObjectStore, RawDocument,
    StoreError, StoreResult, Subscription,
};
pub use sync::CatalogSynchronizer;

// Re-export shared types for convenience
pub use shared::{Filters, Photo, PhotoUpload, Place, PlaceDraft, PriceRange, Status, apply_filters};
