use thiserror::Error;

/// Failures the report core can produce. Store errors propagate unchanged
/// from the persistence layer; no partial report is ever returned.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("page size must be at least 1")]
    InvalidPagination,
    #[error("report store unavailable: {0}")]
    Store(#[from] sqlx::Error),
}
