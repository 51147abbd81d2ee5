use std::path::PathBuf;

use brickshelf_catalog::{RecordFields, RecordId, RecordStore};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;
use crate::cli_types::RecordArgs;

use super::{Catalog, record_line};

pub(crate) fn run_add(
    catalog: &Catalog,
    code: String,
    title: String,
    fields: RecordArgs,
    image: Option<PathBuf>,
) -> Result<(), CliError> {
    let new_fields = fields
        .into_changes()
        .apply_to(RecordFields::new(code, title));
    let mut record = catalog.store.create(&new_fields)?;

    if let Some(source) = image {
        let filename = catalog
            .images
            .store_image(record.id, &record.primary_code, &source)?;
        record = catalog.store.attach_image(record.id, Some(&filename))?;
    }

    log::info!(
        "{} Added {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        record_line(&record),
    );
    Ok(())
}

pub(crate) fn run_edit(
    catalog: &Catalog,
    id: RecordId,
    code: Option<String>,
    title: Option<String>,
    fields: RecordArgs,
) -> Result<(), CliError> {
    let mut changes = fields.into_changes();
    changes.primary_code = code;
    changes.title = title;

    if changes.is_empty() {
        return Err(CliError::other("Nothing to change; pass at least one field flag"));
    }

    let record = catalog.store.update(id, &changes)?;
    log::info!(
        "{} Updated {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        record_line(&record),
    );
    Ok(())
}

pub(crate) fn run_delete(catalog: &Catalog, id: RecordId) -> Result<(), CliError> {
    let record = catalog.store.get(id)?;
    catalog.store.delete(id)?;

    if let Some(filename) = &record.image_ref {
        if let Err(e) = catalog.images.remove_image(filename) {
            log::warn!("Deleted the set but could not remove its image {}: {}", filename, e);
        }
    }

    log::info!(
        "{} Deleted {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        record_line(&record),
    );
    Ok(())
}
