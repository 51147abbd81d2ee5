use thiserror::Error;

/// Failures that abort a whole transfer. Row-level import problems are
/// reported in [`TransferOutcome::errors`](crate::TransferOutcome) instead.
#[derive(Debug, Error)]
pub enum TransferError {
    /// Malformed delimited text at a level that prevents reading the header
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// I/O error while writing export output
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The payload has no header row
    #[error("The file is empty or has no header row")]
    MissingHeader,

    /// The header lacks one or more required columns
    #[error("Missing required column(s): {}", .0.join(", "))]
    MissingColumns(Vec<&'static str>),
}
