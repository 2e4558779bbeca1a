//! Storage-specific error types.

/// Errors that can occur while appending a row to the local sheet.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Sheet file could not be opened or written
    #[error("Failed to write sheet: {0}")]
    Io(#[from] std::io::Error),

    /// Row could not be encoded
    #[error("Failed to encode row: {0}")]
    Csv(#[from] csv::Error),
}
