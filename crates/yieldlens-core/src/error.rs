use thiserror::Error;

/// Workspace-wide error types for yieldlens.
#[derive(Debug, Error)]
pub enum YieldError {
    /// A snapshot that the calculation needs is absent or incomplete.
    #[error("Missing data: {0}")]
    MissingData(String),

    /// A snapshot is present but holds values the engine cannot use.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Unknown reporting period name.
    #[error("Invalid period: {0}")]
    InvalidPeriod(String),

    /// A remote transaction source failed.
    #[error("Transaction source error: {0}")]
    Source(String),
}
