//! Error types for catalog loading.
//!
//! Filtering itself is total and never fails; only getting the project
//! list into memory can go wrong.

use thiserror::Error;

/// Failures while fetching or validating a project catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Two projects share the same id
    #[error("Duplicate project id: {0}")]
    DuplicateId(u64),

    /// Remote catalog answered with a non-success status
    #[error("Catalog request to {url} failed with status {status}")]
    Http { status: u16, url: String },

    /// Catalog document is neither a project array nor a `{"projects": [...]}` object
    #[error("Invalid catalog format: {0}")]
    InvalidFormat(String),
}
