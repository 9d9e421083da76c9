use thiserror::Error;

/// Errors that can occur while rendering an export.
#[derive(Debug, Error)]
pub enum ExportError {
    /// CSV serialization failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Flushing the CSV buffer failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for export rendering.
pub type Result<T> = std::result::Result<T, ExportError>;
