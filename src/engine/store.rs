//! # Store Seam
//!
//! The contract between the HTTP layer and storage. The store never applies
//! conditional-request logic itself: reads hand the current tag back to the
//! caller, and the caller decides whether a write may proceed before
//! invoking it.

use async_trait::async_trait;

use crate::conditional::ETag;
use crate::payload::Field;

use super::errors::EngineError;

/// A row read back from the store: the JSON body and its current tag.
#[derive(Debug, Clone)]
pub struct ReadOutcome {
    /// The row as a JSON object keyed by column name, in canonical order.
    pub body: String,

    /// Strong by construction: it reflects a committed row state.
    pub etag: ETag,
}

/// One resource's read/create/update operations.
#[async_trait]
pub trait ResourceStore: Send + Sync {
    /// Fetch the row for `key`. `NotFound` when no row matches.
    async fn read(&self, key: i64) -> Result<ReadOutcome, EngineError>;

    /// Insert a new row, returning the stored row as JSON text.
    async fn create(&self, fields: Vec<Field>) -> Result<String, EngineError>;

    /// Partially update the row for `key`, returning the stored row as JSON
    /// text. `NotFound` when the key does not exist.
    async fn update(&self, key: i64, fields: Vec<Field>) -> Result<String, EngineError>;
}
