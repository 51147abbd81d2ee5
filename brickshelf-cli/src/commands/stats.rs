use brickshelf_catalog::{CollectionStats, InventoryRecord, RecordStore};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;

use super::{Catalog, format_money, record_line};

pub(crate) fn run_stats(catalog: &Catalog, json: bool) -> Result<(), CliError> {
    let records = catalog.store.list()?;
    let stats = CollectionStats::compute(&records);

    if json {
        let text = serde_json::to_string_pretty(&stats)
            .map_err(|e| CliError::other(format!("Failed to serialize stats: {}", e)))?;
        println!("{}", text);
        return Ok(());
    }

    log::info!(
        "{}",
        "Collection Statistics".if_supports_color(Stdout, |t| t.bold()),
    );
    crate::log_blank();
    log::info!("  Sets cataloged: {:>10}", stats.total_records);
    log::info!("  Sets owned:     {:>10}", stats.owned_records);
    log::info!("  Parts owned:    {:>10}", stats.total_parts);
    log::info!("  Minifigures:    {:>10}", stats.total_sub_units);
    log::info!("  Total value:    {:>10}", format_money(stats.total_value));
    log::info!("  Average value:  {:>10}", format_money(stats.average_value));

    let notable: [(&str, Option<&InventoryRecord>); 4] = [
        ("Most valuable", stats.most_valuable),
        ("Largest", stats.largest),
        ("Oldest", stats.oldest),
        ("Newest", stats.newest),
    ];
    if notable.iter().any(|(_, r)| r.is_some()) {
        crate::log_blank();
        for (label, record) in notable {
            if let Some(record) = record {
                log::info!("  {:<14} {}", format!("{}:", label), record_line(record));
            }
        }
    }
    Ok(())
}

pub(crate) fn run_categories(catalog: &Catalog) -> Result<(), CliError> {
    let categories = catalog.store.list_categories()?;
    if categories.is_empty() {
        log::info!("No series in use.");
        return Ok(());
    }
    for category in &categories {
        log::info!("{}", category);
    }
    Ok(())
}
