use std::io::Write;
use std::path::{Path, PathBuf};

use brickshelf_catalog::{InventoryRecord, RecordStore};
use brickshelf_transfer::{
    ImportOptions, NotificationSink, TransferError, TransferKind, TransferOutcome,
    TransferProgress, export_records, import_records, report_failure, report_outcome,
};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;

use super::Catalog;

pub(crate) fn run_export(catalog: &Catalog, output: Option<PathBuf>) -> Result<(), CliError> {
    let records = catalog.store.list()?;
    write_export(&records, output.as_deref()).map_err(|e| reported(TransferKind::Export, e))
}

fn write_export(records: &[InventoryRecord], output: Option<&Path>) -> Result<(), TransferError> {
    let bytes = export_records(records)?;

    match output {
        Some(path) => {
            std::fs::write(path, &bytes)?;
            log::info!(
                "{} Exported {} set(s) to {}",
                "\u{2714}".if_supports_color(Stdout, |t| t.green()),
                records.len(),
                path.display(),
            );
        }
        None => {
            // stdout carries the CSV itself, so keep the summary out of it
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&bytes)?;
            stdout.flush()?;
            log::debug!("Exported {} set(s) to stdout", records.len());
        }
    }
    Ok(())
}

pub(crate) fn run_import(catalog: &Catalog, file: &Path, quiet: bool) -> Result<(), CliError> {
    let existing = catalog.store.list()?;

    log::info!(
        "{}",
        format!("Importing {}", file.display()).if_supports_color(Stdout, |t| t.bold()),
    );

    let progress = BarProgress::new(quiet);
    let options = ImportOptions {
        cancel: None,
        progress: Some(&progress),
    };
    let outcome = std::fs::read(file)
        .map_err(TransferError::from)
        .and_then(|payload| import_records(&payload, &existing, &catalog.store, &options));
    progress.bar.finish_and_clear();
    let outcome = outcome.map_err(|e| reported(TransferKind::Import, e))?;

    report_outcome(&outcome, &LogSink);

    let total = catalog.store.list()?.len();
    log::info!("  Catalog now holds {} set(s)", total);
    Ok(())
}

/// Tell the user a transfer failed, then hand the error back for the exit code.
fn reported(kind: TransferKind, error: TransferError) -> CliError {
    report_failure(kind, &error, &LogSink);
    CliError::Transfer(error)
}

/// Progress bar over the data rows of an import.
struct BarProgress {
    bar: ProgressBar,
}

impl BarProgress {
    fn new(quiet: bool) -> Self {
        let bar = ProgressBar::new(0);
        if quiet {
            bar.set_draw_target(ProgressDrawTarget::hidden());
        }
        let style = ProgressStyle::with_template("  {bar:30.cyan/blue} {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        bar.set_style(style);
        Self { bar }
    }
}

impl TransferProgress for BarProgress {
    fn on_row(&self, current: usize, total: usize, key: &str) {
        self.bar.set_length(total as u64);
        self.bar.set_position(current as u64);
        self.bar.set_message(key.to_string());
    }

    fn on_complete(&self, _outcome: &TransferOutcome) {
        self.bar.finish_and_clear();
    }
}

/// Delivers user-facing notifications through the logger.
struct LogSink;

impl NotificationSink for LogSink {
    fn success(&self, message: &str) {
        log::info!(
            "{} {}",
            "\u{2714}".if_supports_color(Stdout, |t| t.green()),
            message
        );
    }

    fn info(&self, message: &str) {
        log::info!(
            "{} {}",
            "\u{26A0}".if_supports_color(Stdout, |t| t.yellow()),
            message
        );
    }

    fn error(&self, message: &str) {
        log::error!(
            "{} {}",
            "\u{2718}".if_supports_color(Stdout, |t| t.red()),
            message
        );
    }
}
