//! [`RecordStore`] implementation over a SQLite connection.

use std::collections::BTreeSet;
use std::path::Path;

use brickshelf_catalog::store::{RecordStore, StoreError};
use brickshelf_catalog::types::*;
use rusqlite::Connection;

use crate::operations::{self, OperationError};
use crate::queries;
use crate::schema::{self, SchemaError};

impl From<OperationError> for StoreError {
    fn from(err: OperationError) -> Self {
        match err {
            OperationError::Validation(e) => StoreError::Validation(e),
            OperationError::DuplicateCode(_) => StoreError::conflict(err.to_string()),
            OperationError::NotFound { ref id, .. } => match id.parse() {
                Ok(id) => StoreError::NotFound(id),
                Err(_) => StoreError::backend(err.to_string()),
            },
            OperationError::Sqlite(e) => StoreError::backend(e.to_string()),
        }
    }
}

/// A record store backed by a single SQLite connection.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (creating if needed) the database file at `path`.
    pub fn open(path: &Path) -> Result<Self, SchemaError> {
        Ok(Self {
            conn: schema::open_database(path)?,
        })
    }

    /// A fresh in-memory store.
    pub fn open_memory() -> Result<Self, SchemaError> {
        Ok(Self {
            conn: schema::open_memory()?,
        })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    fn fetch(&self, id: RecordId) -> Result<InventoryRecord, StoreError> {
        queries::get_record(&self.conn, id)?.ok_or(StoreError::NotFound(id))
    }
}

impl RecordStore for SqliteStore {
    fn list(&self) -> Result<Vec<InventoryRecord>, StoreError> {
        Ok(queries::list_records(&self.conn)?)
    }

    fn get(&self, id: RecordId) -> Result<InventoryRecord, StoreError> {
        self.fetch(id)
    }

    fn create(&self, fields: &RecordFields) -> Result<InventoryRecord, StoreError> {
        let id = operations::insert_record(&self.conn, fields)?;
        self.fetch(id)
    }

    fn update(&self, id: RecordId, changes: &RecordChanges) -> Result<InventoryRecord, StoreError> {
        let current = self.fetch(id)?;
        if changes.is_empty() {
            return Ok(current);
        }
        let merged = changes.apply_to(current.fields());
        operations::update_record(&self.conn, id, &merged)?;
        self.fetch(id)
    }

    fn delete(&self, id: RecordId) -> Result<(), StoreError> {
        Ok(operations::delete_record(&self.conn, id)?)
    }

    fn list_categories(&self) -> Result<BTreeSet<String>, StoreError> {
        Ok(queries::list_categories(&self.conn)?.into_iter().collect())
    }

    fn attach_image(
        &self,
        id: RecordId,
        image_ref: Option<&str>,
    ) -> Result<InventoryRecord, StoreError> {
        operations::set_image_ref(&self.conn, id, image_ref)?;
        self.fetch(id)
    }
}
