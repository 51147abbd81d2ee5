use brickshelf_catalog::{InventoryRecord, RecordId, RecordStore};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;

use super::{Catalog, format_money};

pub(crate) fn run_show(catalog: &Catalog, id: RecordId, json: bool) -> Result<(), CliError> {
    let record = catalog.store.get(id)?;

    if json {
        let text = serde_json::to_string_pretty(&record)
            .map_err(|e| CliError::other(format!("Failed to serialize record: {}", e)))?;
        println!("{}", text);
        return Ok(());
    }

    log_record(catalog, &record);
    Ok(())
}

/// Log every populated field of `record`.
pub(crate) fn log_record(catalog: &Catalog, record: &InventoryRecord) {
    log::info!(
        "{} {}",
        record.primary_code.if_supports_color(Stdout, |t| t.bold()),
        record.title.if_supports_color(Stdout, |t| t.bold()),
    );

    let row = |label: &str, value: Option<String>| {
        if let Some(value) = value {
            log::info!("  {:<16} {}", format!("{}:", label), value);
        }
    };

    row("Id", Some(record.id.to_string()));
    row("Alternate code", record.alternate_code.clone());
    row("Series", record.category.clone());
    row("Released", record.release_year.map(|y| y.to_string()));
    row(
        "Owned",
        Some(if record.owned {
            format!("yes ({})", record.quantity_owned)
        } else {
            "no".to_string()
        }),
    );
    row("Parts", Some(record.part_count.to_string()));
    row("Minifigures", Some(record.sub_unit_count.to_string()));
    row(
        "Value",
        record.approximate_value.map(|v| match record.value_as_of {
            Some(date) => format!("{} (as of {})", format_money(v), date.format("%Y-%m-%d")),
            None => format_money(v),
        }),
    );
    row("Bricklink", record.bricklink_url.clone());
    row("Rebrickable", record.rebrickable_url.clone());
    row("Description", record.description.clone());
    row("Condition", record.condition_notes.clone());
    row("Notes", record.notes.clone());
    row(
        "Image",
        record
            .image_ref
            .as_deref()
            .map(|name| catalog.images.image_path(name).display().to_string()),
    );
    row("Added", Some(record.created_at.clone()));
    row("Updated", Some(record.updated_at.clone()));
}
