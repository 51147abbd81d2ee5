//! Import progress reporting.

use crate::import::TransferOutcome;

/// Trait for receiving import progress updates.
pub trait TransferProgress {
    /// Called after each data row is processed. `key` is the row's primary
    /// code, or empty when the row has none.
    fn on_row(&self, current: usize, total: usize, key: &str);

    /// Called once when the import finishes or is cancelled.
    fn on_complete(&self, outcome: &TransferOutcome);
}

/// A no-op progress reporter that discards all updates.
pub struct SilentProgress;

impl TransferProgress for SilentProgress {
    fn on_row(&self, _current: usize, _total: usize, _key: &str) {}
    fn on_complete(&self, _outcome: &TransferOutcome) {}
}

/// A progress reporter that logs to the `log` crate.
pub struct LogProgress;

impl TransferProgress for LogProgress {
    fn on_row(&self, current: usize, total: usize, key: &str) {
        if current.is_multiple_of(100) || current == total {
            log::info!("  [{}/{}] {}", current, total, key);
        }
    }

    fn on_complete(&self, outcome: &TransferOutcome) {
        log::info!(
            "Import finished: {} imported, {} skipped, {} error(s)",
            outcome.imported,
            outcome.skipped,
            outcome.errors.len(),
        );
    }
}
