//! Shared types for the gourmet catalog
//!
//! Data models, wire document shapes, filter predicates, and the id/time
//! helpers used by every crate that touches the catalog.

pub mod filter;
pub mod models;
pub mod util;

// Re-exports
pub use filter::{Filters, apply_filters};
pub use models::*;
pub use serde::{Deserialize, Serialize};
pub use util::{new_id, now_iso};
