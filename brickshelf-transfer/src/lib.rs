//! Bulk CSV export and import for the inventory catalog.
//!
//! Export serializes a record set to delimited text. Import parses that text
//! back, validates each row, skips duplicates, and submits the rest to a
//! [`RecordStore`](brickshelf_catalog::RecordStore), collecting per-row errors
//! instead of aborting.

pub mod columns;
pub mod error;
pub mod export;
pub mod import;
pub mod progress;
pub mod report;

pub use columns::{Column, HeaderMap};
pub use error::TransferError;
pub use export::{export_records, write_records};
pub use import::{ImportOptions, TransferOutcome, import_records};
pub use progress::{LogProgress, SilentProgress, TransferProgress};
pub use report::{NotificationSink, TransferKind, report_failure, report_outcome, summarize};
