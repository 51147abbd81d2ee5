//! The record store contract consumed by the query and transfer engines.
//!
//! Implementations own persistence; the engines only ever read the
//! authoritative set and submit creates through this trait.

use std::collections::BTreeSet;

use thiserror::Error;

use crate::types::{InventoryRecord, RecordChanges, RecordFields, RecordId};
use crate::validate::ValidationError;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Record not found: {0}")]
    NotFound(RecordId),
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),
    #[error("Conflict: {0}")]
    Conflict(String),
    /// Transport or backend failure, surfaced verbatim.
    #[error("{0}")]
    Backend(String),
}

impl StoreError {
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }
}

/// CRUD access to the authoritative record collection.
pub trait RecordStore {
    /// All records, oldest first.
    fn list(&self) -> Result<Vec<InventoryRecord>, StoreError>;

    fn get(&self, id: RecordId) -> Result<InventoryRecord, StoreError>;

    /// Validate and persist a new record, returning it with its assigned id.
    fn create(&self, fields: &RecordFields) -> Result<InventoryRecord, StoreError>;

    fn update(&self, id: RecordId, changes: &RecordChanges)
    -> Result<InventoryRecord, StoreError>;

    fn delete(&self, id: RecordId) -> Result<(), StoreError>;

    /// Distinct non-empty categories in use.
    fn list_categories(&self) -> Result<BTreeSet<String>, StoreError>;

    /// Set or clear the image reference of a record.
    fn attach_image(
        &self,
        id: RecordId,
        image_ref: Option<&str>,
    ) -> Result<InventoryRecord, StoreError>;
}
