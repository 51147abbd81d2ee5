//! Write operations on inventory records.

use brickshelf_catalog::types::*;
use brickshelf_catalog::validate::ValidationError;
use rusqlite::{Connection, params};
use thiserror::Error;

use crate::queries;

#[derive(Debug, Error)]
pub enum OperationError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),
    #[error("A record with primary code '{0}' already exists")]
    DuplicateCode(String),
    #[error("Entity not found: {entity_type} with id '{id}'")]
    NotFound { entity_type: String, id: String },
}

impl OperationError {
    fn record_not_found(id: RecordId) -> Self {
        Self::NotFound {
            entity_type: "record".to_string(),
            id: id.to_string(),
        }
    }

    /// Map a UNIQUE violation on `primary_code` to `DuplicateCode`. Other
    /// constraint failures (CHECK, NOT NULL) stay `Sqlite`.
    fn from_insert(err: rusqlite::Error, code: &str) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(e, _)
                if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE =>
            {
                Self::DuplicateCode(code.to_string())
            }
            _ => Self::Sqlite(err),
        }
    }
}

/// Store `Option<NaiveDate>` as ISO `YYYY-MM-DD` text.
fn date_text(fields: &RecordFields) -> Option<String> {
    fields.value_as_of.map(|d| d.format("%Y-%m-%d").to_string())
}

/// Validate and insert a new record. Returns the assigned id.
pub fn insert_record(conn: &Connection, fields: &RecordFields) -> Result<RecordId, OperationError> {
    let fields = fields.clone().normalized();
    fields.validate()?;

    if queries::find_record_by_code(conn, &fields.primary_code)?.is_some() {
        return Err(OperationError::DuplicateCode(fields.primary_code));
    }

    conn.execute(
        "INSERT INTO records (primary_code, alternate_code, title, owned, quantity_owned,
             release_year, description, category, part_count, sub_unit_count,
             bricklink_url, rebrickable_url, approximate_value, value_as_of,
             condition_notes, notes, image_ref)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17)",
        params![
            fields.primary_code,
            fields.alternate_code,
            fields.title,
            fields.owned,
            fields.quantity_owned,
            fields.release_year,
            fields.description,
            fields.category,
            fields.part_count,
            fields.sub_unit_count,
            fields.bricklink_url,
            fields.rebrickable_url,
            fields.approximate_value,
            date_text(&fields),
            fields.condition_notes,
            fields.notes,
            fields.image_ref,
        ],
    )
    .map_err(|e| OperationError::from_insert(e, &fields.primary_code))?;

    let id = RecordId(conn.last_insert_rowid());
    log::debug!("Inserted record {} ({})", id, fields.primary_code);
    Ok(id)
}

/// Replace every caller-controlled attribute of an existing record.
///
/// Rejects a primary code already used by a different record.
pub fn update_record(
    conn: &Connection,
    id: RecordId,
    fields: &RecordFields,
) -> Result<(), OperationError> {
    let fields = fields.clone().normalized();
    fields.validate()?;

    if let Some(other) = queries::find_record_by_code(conn, &fields.primary_code)? {
        if other.id != id {
            return Err(OperationError::DuplicateCode(fields.primary_code));
        }
    }

    let changed = conn
        .execute(
            "UPDATE records SET
                 primary_code = ?2,
                 alternate_code = ?3,
                 title = ?4,
                 owned = ?5,
                 quantity_owned = ?6,
                 release_year = ?7,
                 description = ?8,
                 category = ?9,
                 part_count = ?10,
                 sub_unit_count = ?11,
                 bricklink_url = ?12,
                 rebrickable_url = ?13,
                 approximate_value = ?14,
                 value_as_of = ?15,
                 condition_notes = ?16,
                 notes = ?17,
                 image_ref = ?18,
                 updated_at = datetime('now')
             WHERE id = ?1",
            params![
                id.0,
                fields.primary_code,
                fields.alternate_code,
                fields.title,
                fields.owned,
                fields.quantity_owned,
                fields.release_year,
                fields.description,
                fields.category,
                fields.part_count,
                fields.sub_unit_count,
                fields.bricklink_url,
                fields.rebrickable_url,
                fields.approximate_value,
                date_text(&fields),
                fields.condition_notes,
                fields.notes,
                fields.image_ref,
            ],
        )
        .map_err(|e| OperationError::from_insert(e, &fields.primary_code))?;
    if changed == 0 {
        return Err(OperationError::record_not_found(id));
    }
    Ok(())
}

/// Set or clear the image reference of a record.
pub fn set_image_ref(
    conn: &Connection,
    id: RecordId,
    image_ref: Option<&str>,
) -> Result<(), OperationError> {
    let changed = conn.execute(
        "UPDATE records SET image_ref = ?2, updated_at = datetime('now') WHERE id = ?1",
        params![id.0, image_ref],
    )?;
    if changed == 0 {
        return Err(OperationError::record_not_found(id));
    }
    Ok(())
}

/// Delete a record by id.
pub fn delete_record(conn: &Connection, id: RecordId) -> Result<(), OperationError> {
    let changed = conn.execute("DELETE FROM records WHERE id = ?1", params![id.0])?;
    if changed == 0 {
        return Err(OperationError::record_not_found(id));
    }
    log::debug!("Deleted record {}", id);
    Ok(())
}
