use brickshelf_catalog::StoreError;
use brickshelf_lib::ImageError;
use brickshelf_transfer::TransferError;
use thiserror::Error;

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// I/O error
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// Database could not be opened
    #[error("Database error: {0}")]
    Database(String),

    /// Record store rejected an operation
    #[error("{0}")]
    Store(#[from] StoreError),

    /// Export or import failed as a whole. The user has already been told
    /// through the notification sink.
    #[error("Transfer failed: {0}")]
    Transfer(TransferError),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),

    /// Image library error
    #[error("Image error: {0}")]
    Image(#[from] ImageError),

    /// Catch-all for other errors
    #[error("{0}")]
    Other(String),
}

impl CliError {
    pub(crate) fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub(crate) fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }

    /// Whether the failure has already been shown to the user.
    pub(crate) fn already_reported(&self) -> bool {
        matches!(self, Self::Transfer(_))
    }
}
