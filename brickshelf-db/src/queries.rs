//! Read queries for the catalog database.

use brickshelf_catalog::types::*;
use chrono::NaiveDate;
use rusqlite::{Connection, params};

use crate::operations::OperationError;

const RECORD_COLUMNS: &str = "id, primary_code, alternate_code, title, owned, quantity_owned,
     release_year, description, category, part_count, sub_unit_count,
     bricklink_url, rebrickable_url, approximate_value, value_as_of,
     condition_notes, notes, image_ref, created_at, updated_at";

/// List every record, oldest first.
pub fn list_records(conn: &Connection) -> Result<Vec<InventoryRecord>, OperationError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {RECORD_COLUMNS} FROM records ORDER BY created_at, id"
    ))?;
    let rows = stmt.query_map([], row_to_record)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// Fetch a single record by id.
pub fn get_record(conn: &Connection, id: RecordId) -> Result<Option<InventoryRecord>, OperationError> {
    let mut stmt = conn.prepare(&format!("SELECT {RECORD_COLUMNS} FROM records WHERE id = ?1"))?;
    let result = stmt.query_row(params![id.0], row_to_record);
    match result {
        Ok(record) => Ok(Some(record)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Find a record by its primary code (exact match).
pub fn find_record_by_code(
    conn: &Connection,
    code: &str,
) -> Result<Option<InventoryRecord>, OperationError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {RECORD_COLUMNS} FROM records WHERE primary_code = ?1 LIMIT 1"
    ))?;
    let result = stmt.query_row(params![code], row_to_record);
    match result {
        Ok(record) => Ok(Some(record)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Distinct non-empty categories, alphabetically.
pub fn list_categories(conn: &Connection) -> Result<Vec<String>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT DISTINCT category FROM records
         WHERE category IS NOT NULL AND category != ''
         ORDER BY category ASC",
    )?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// Total number of records.
pub fn count_records(conn: &Connection) -> Result<i64, OperationError> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM records", [], |row| row.get(0))?;
    Ok(count)
}

fn row_to_record(row: &rusqlite::Row) -> rusqlite::Result<InventoryRecord> {
    let value_as_of: Option<String> = row.get(14)?;
    Ok(InventoryRecord {
        id: RecordId(row.get(0)?),
        primary_code: row.get(1)?,
        alternate_code: row.get(2)?,
        title: row.get(3)?,
        owned: row.get(4)?,
        quantity_owned: row.get(5)?,
        release_year: row.get(6)?,
        description: row.get(7)?,
        category: row.get(8)?,
        part_count: row.get(9)?,
        sub_unit_count: row.get(10)?,
        bricklink_url: row.get(11)?,
        rebrickable_url: row.get(12)?,
        approximate_value: row.get(13)?,
        value_as_of: value_as_of.and_then(|s| NaiveDate::parse_from_str(&s, "%Y-%m-%d").ok()),
        condition_notes: row.get(15)?,
        notes: row.get(16)?,
        image_ref: row.get(17)?,
        created_at: row.get(18)?,
        updated_at: row.get(19)?,
    })
}
