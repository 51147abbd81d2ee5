//! Bulk import of delimited text into a record store.
//!
//! Rows are coerced into [`RecordFields`], validated, checked for duplicate
//! primary codes, and submitted to the store one at a time. A bad row never
//! aborts the run; it is recorded in [`TransferOutcome::errors`] and the next
//! row is processed.

use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use brickshelf_catalog::store::RecordStore;
use brickshelf_catalog::types::{InventoryRecord, RecordFields};
use chrono::{DateTime, NaiveDate};
use csv::StringRecord;
use serde::Serialize;

use crate::columns::{Column, HeaderMap};
use crate::error::TransferError;
use crate::progress::TransferProgress;

/// Counts and messages from one import run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TransferOutcome {
    pub imported: usize,
    pub skipped: usize,
    /// One message per failed row, in row order.
    pub errors: Vec<String>,
    /// Set when the run stopped early because cancellation was requested.
    pub cancelled: bool,
}

impl TransferOutcome {
    /// No row errors and not cancelled.
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && !self.cancelled
    }
}

/// Optional hooks for an import run.
#[derive(Default)]
pub struct ImportOptions<'a> {
    /// Checked before each row is submitted; once set, the run stops.
    pub cancel: Option<Arc<AtomicBool>>,
    pub progress: Option<&'a dyn TransferProgress>,
}

impl ImportOptions<'_> {
    fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }
}

/// Import `payload` into `store`.
///
/// `existing` is the caller's authoritative record set; a row whose primary
/// code already appears there, or in an earlier imported row of the same
/// payload, is skipped. Fails before creating anything if the header is
/// missing or lacks a required column.
pub fn import_records(
    payload: &[u8],
    existing: &[InventoryRecord],
    store: &dyn RecordStore,
    options: &ImportOptions,
) -> Result<TransferOutcome, TransferError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(payload);

    let header = reader.headers()?.clone();
    if header.iter().all(|cell| cell.trim().is_empty()) {
        return Err(TransferError::MissingHeader);
    }
    let columns = HeaderMap::from_record(&header);
    let missing = columns.missing_required();
    if !missing.is_empty() {
        return Err(TransferError::MissingColumns(missing));
    }

    let rows: Vec<Result<StringRecord, csv::Error>> = reader.records().collect();
    let total = rows.len();
    log::debug!("Importing {} data row(s) against {} existing record(s)", total, existing.len());

    let mut seen: HashSet<String> = existing
        .iter()
        .map(|r| r.primary_code.trim().to_string())
        .collect();
    let mut outcome = TransferOutcome::default();

    for (index, row) in rows.into_iter().enumerate() {
        if options.is_cancelled() {
            log::debug!("Import cancelled before data row {}", index + 1);
            outcome.cancelled = true;
            break;
        }

        let row_number = file_line(&row).unwrap_or(index + 2);
        let key = process_row(row_number, row, &columns, &mut seen, store, &mut outcome);

        if let Some(progress) = options.progress {
            progress.on_row(index + 1, total, &key);
        }
    }

    if let Some(progress) = options.progress {
        progress.on_complete(&outcome);
    }
    Ok(outcome)
}

/// Line of the file where a record starts. The header is line 1; empty lines
/// the reader skips and line breaks inside quoted fields still count.
fn file_line(row: &Result<StringRecord, csv::Error>) -> Option<usize> {
    let position = match row {
        Ok(record) => record.position(),
        Err(e) => e.position(),
    }?;
    usize::try_from(position.line()).ok()
}

/// Handle one data row, updating `outcome`. Returns the row's primary code
/// (empty when it has none) for progress reporting.
fn process_row(
    row_number: usize,
    row: Result<StringRecord, csv::Error>,
    columns: &HeaderMap,
    seen: &mut HashSet<String>,
    store: &dyn RecordStore,
    outcome: &mut TransferOutcome,
) -> String {
    let row = match row {
        Ok(row) => row,
        Err(e) => {
            log::debug!("Row {}: unreadable: {}", row_number, e);
            outcome.errors.push(format!("Row {}: {}", row_number, e));
            return String::new();
        }
    };

    if row.iter().all(|cell| cell.trim().is_empty()) {
        log::debug!("Row {}: blank, ignored", row_number);
        return String::new();
    }

    let fields = row_to_fields(&row, columns);
    let code = fields.primary_code.clone();

    if let Err(e) = fields.validate() {
        log::debug!("Row {}: invalid: {}", row_number, e);
        outcome.errors.push(format!("Row {}: {}", row_number, e));
        return code;
    }

    if seen.contains(&code) {
        log::debug!("Row {} ({}): duplicate primary code, skipped", row_number, code);
        outcome.skipped += 1;
        return code;
    }

    match store.create(&fields) {
        Ok(record) => {
            log::debug!("Row {} ({}): created record {}", row_number, code, record.id);
            seen.insert(code.clone());
            outcome.imported += 1;
        }
        Err(e) => {
            log::debug!("Row {} ({}): store rejected: {}", row_number, code, e);
            outcome.errors.push(format!("Row {} ({}): {}", row_number, code, e));
        }
    }
    code
}

/// Coerce a data row into record fields. Unparseable or empty cells become
/// absent; required numbers fall back to zero and `owned` to false. Text is
/// trimmed by [`RecordFields::normalized`], the same way the store does it.
pub fn row_to_fields(row: &StringRecord, columns: &HeaderMap) -> RecordFields {
    let text = |column: Column| columns.non_empty(row, column).map(str::to_string);
    let cell = |column: Column| columns.non_empty(row, column);

    RecordFields {
        primary_code: text(Column::PrimaryCode).unwrap_or_default(),
        alternate_code: text(Column::AlternateCode),
        title: text(Column::Title).unwrap_or_default(),
        owned: cell(Column::Owned).and_then(parse_bool).unwrap_or(false),
        quantity_owned: cell(Column::QuantityOwned).and_then(parse_count).unwrap_or(0),
        release_year: cell(Column::ReleaseYear).and_then(parse_year),
        description: text(Column::Description),
        category: text(Column::Category),
        part_count: cell(Column::PartCount).and_then(parse_count).unwrap_or(0),
        sub_unit_count: cell(Column::SubUnitCount).and_then(parse_count).unwrap_or(0),
        bricklink_url: text(Column::BricklinkUrl),
        rebrickable_url: text(Column::RebrickableUrl),
        approximate_value: cell(Column::ApproximateValue).and_then(parse_decimal),
        value_as_of: cell(Column::ValueAsOfDate).and_then(parse_date),
        condition_notes: text(Column::ConditionNotes),
        notes: text(Column::FreeformNotes),
        image_ref: text(Column::ImageReference),
    }
    .normalized()
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

fn parse_count(s: &str) -> Option<u32> {
    s.trim().parse().ok()
}

fn parse_year(s: &str) -> Option<u32> {
    parse_count(s).filter(|&year| year > 0)
}

fn parse_decimal(s: &str) -> Option<f64> {
    s.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive()))
}
