//! Document store access: the trait the core depends on and its error
//! taxonomy.

mod document_store;

pub use document_store::DocumentStore;

#[cfg(test)]
pub use document_store::MockDocumentStore;

/// Errors surfaced by a [`DocumentStore`] implementation.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The store did not answer within its internal timeout. Transient;
    /// page fetches retry this in place.
    #[error("deadline exceeded while fetching a page")]
    DeadlineExceeded,

    /// The request itself failed (transport, auth, bad status).
    #[error("store request failed: {0}")]
    Request(String),

    /// The store answered with a document the client could not decode.
    #[error("malformed document in store response: {0}")]
    Decode(String),
}

impl StoreError {
    /// Whether this failure is worth retrying in place.
    pub fn is_deadline_exceeded(&self) -> bool {
        matches!(self, StoreError::DeadlineExceeded)
    }
}
