//! User-facing summaries of transfer results.

use std::fmt;

use crate::error::TransferError;
use crate::import::TransferOutcome;

/// Direction of a transfer, for naming it in messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferKind {
    Import,
    Export,
}

impl fmt::Display for TransferKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransferKind::Import => write!(f, "importing"),
            TransferKind::Export => write!(f, "exporting"),
        }
    }
}

/// Receiver for short user-facing status messages.
pub trait NotificationSink {
    fn success(&self, message: &str);
    fn info(&self, message: &str);
    fn error(&self, message: &str);
}

/// Summarize an import outcome and deliver it to `sink`.
///
/// A clean run is a success; any row errors or a cancellation downgrade the
/// message to info so the user sees it was partial.
pub fn report_outcome(outcome: &TransferOutcome, sink: &dyn NotificationSink) {
    let message = summarize(outcome);
    if outcome.errors.is_empty() && !outcome.cancelled {
        sink.success(&message);
    } else {
        sink.info(&message);
    }
}

/// The text [`report_outcome`] would deliver.
pub fn summarize(outcome: &TransferOutcome) -> String {
    let mut message = if outcome.cancelled {
        format!(
            "Import cancelled. Imported: {}, Skipped: {}",
            outcome.imported, outcome.skipped
        )
    } else {
        format!(
            "Import complete! Imported: {}, Skipped: {}",
            outcome.imported, outcome.skipped
        )
    };
    if !outcome.errors.is_empty() {
        message.push_str(". Errors: ");
        message.push_str(&outcome.errors.join(", "));
    }
    message
}

/// Deliver a transfer that failed as a whole to `sink` as an error.
pub fn report_failure(kind: TransferKind, error: &TransferError, sink: &dyn NotificationSink) {
    sink.error(&format!("Error {} CSV: {}", kind, error));
}
