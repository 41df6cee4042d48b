//! Catalog error types

use thiserror::Error;

use crate::store::StoreError;

/// Catalog engine error type
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Rejected before any remote call
    #[error("validation error: {0}")]
    Validation(String),

    /// Mutation attempted while the catalog is in read-only mode
    #[error("catalog is read-only")]
    ReadOnly,

    /// Remote store failure, propagated unchanged
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Malformed page address
    #[error("invalid address: {0}")]
    Address(#[from] url::ParseError),
}

/// Result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;
