use std::path::Path;

use brickshelf_catalog::{RecordId, RecordStore};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;

use super::Catalog;

pub(crate) fn run_image_attach(catalog: &Catalog, id: RecordId, file: &Path) -> Result<(), CliError> {
    let record = catalog.store.get(id)?;
    let filename = catalog
        .images
        .store_image(record.id, &record.primary_code, file)?;

    // A new extension means a new filename; drop the stale file.
    if let Some(old) = record.image_ref.as_deref().filter(|old| *old != filename) {
        if let Err(e) = catalog.images.remove_image(old) {
            log::warn!("Could not remove previous image {}: {}", old, e);
        }
    }

    catalog.store.attach_image(id, Some(&filename))?;
    log::info!(
        "{} Attached {} to {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        catalog.images.image_path(&filename).display(),
        record.primary_code,
    );
    Ok(())
}

pub(crate) fn run_image_remove(catalog: &Catalog, id: RecordId) -> Result<(), CliError> {
    let record = catalog.store.get(id)?;
    let Some(filename) = record.image_ref.as_deref() else {
        log::info!("{} has no image.", record.primary_code);
        return Ok(());
    };

    catalog.images.remove_image(filename)?;
    catalog.store.attach_image(id, None)?;
    log::info!(
        "{} Removed image from {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        record.primary_code,
    );
    Ok(())
}
