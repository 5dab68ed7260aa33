//! Application-level error type.
//!
//! Store failures carry their own taxonomy
//! ([`crate::domain::store::StoreError`]); this type covers everything
//! that can end a run outside the fail-soft extraction path.

use crate::domain::store::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A store failure that escaped the extraction layer.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The final report could not be written.
    #[error("failed to write report: {0}")]
    Report(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
