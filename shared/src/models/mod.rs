//! Data models
//!
//! Shared between the catalog engine and any presentation layer.
//! Wire shapes (`PlaceDoc` and the patch types) use the remote store's
//! camelCase field names; everything else is plain Rust.

pub mod photo;
pub mod place;

// Re-exports
pub use photo::*;
pub use place::*;
