//! Serialize a record set to comma-separated text.

use std::io::Write;

use brickshelf_catalog::types::InventoryRecord;

use crate::columns::Column;
use crate::error::TransferError;

/// Export `records` to an in-memory CSV document.
///
/// One header row, then one row per record in the order given.
pub fn export_records(records: &[InventoryRecord]) -> Result<Vec<u8>, TransferError> {
    let mut buf = Vec::new();
    write_records(records, &mut buf)?;
    Ok(buf)
}

/// Export `records` to any writer. Rows end in `\n`; fields containing the
/// delimiter, a quote, or a line break are double-quoted.
pub fn write_records<W: Write>(records: &[InventoryRecord], writer: W) -> Result<(), TransferError> {
    let mut csv_writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .quote_style(csv::QuoteStyle::Necessary)
        .from_writer(writer);

    csv_writer.write_record(Column::ALL.iter().map(Column::name))?;
    for record in records {
        csv_writer.write_record(Column::ALL.iter().map(|c| export_value(record, *c)))?;
    }
    csv_writer.flush()?;

    log::debug!("Exported {} record(s)", records.len());
    Ok(())
}

/// Text form of one attribute. Absent values become an empty field.
pub fn export_value(record: &InventoryRecord, column: Column) -> String {
    fn text(value: &Option<String>) -> String {
        value.clone().unwrap_or_default()
    }
    fn number<T: ToString>(value: Option<T>) -> String {
        value.map(|v| v.to_string()).unwrap_or_default()
    }

    match column {
        Column::PrimaryCode => record.primary_code.clone(),
        Column::AlternateCode => text(&record.alternate_code),
        Column::Title => record.title.clone(),
        Column::Owned => record.owned.to_string(),
        Column::QuantityOwned => record.quantity_owned.to_string(),
        Column::ReleaseYear => number(record.release_year),
        Column::Description => text(&record.description),
        Column::Category => text(&record.category),
        Column::PartCount => record.part_count.to_string(),
        Column::SubUnitCount => record.sub_unit_count.to_string(),
        Column::BricklinkUrl => text(&record.bricklink_url),
        Column::RebrickableUrl => text(&record.rebrickable_url),
        // f64's Display is the shortest text that parses back to the same value.
        Column::ApproximateValue => number(record.approximate_value),
        Column::ValueAsOfDate => record
            .value_as_of
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default(),
        Column::ConditionNotes => text(&record.condition_notes),
        Column::FreeformNotes => text(&record.notes),
        Column::ImageReference => text(&record.image_ref),
        Column::Id => record.id.to_string(),
        Column::CreatedAt => record.created_at.clone(),
        Column::UpdatedAt => record.updated_at.clone(),
    }
}
