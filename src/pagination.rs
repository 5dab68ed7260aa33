//! Cursor-based page fetching over ordered store collections.
//!
//! A [`Paginator`] wraps an async page-fetch operation and walks a
//! collection page by page, carrying the cursor (the id of the last
//! document of the previous page) and applying the configured
//! [`RetryPolicy`] to every fetch.

use std::future::Future;

use crate::domain::entities::StoreDocument;
use crate::domain::store::StoreError;
use crate::utils::retry::RetryPolicy;

/// Streams pages out of an ordered collection.
///
/// `fetch` receives the current cursor and the page size and returns one
/// page in store order. The cursor advances only on a successful fetch,
/// so a retried attempt always re-requests the same page.
pub struct Paginator<T, F, Fut>
where
    T: StoreDocument,
    F: FnMut(Option<String>, usize) -> Fut,
    Fut: Future<Output = Result<Vec<T>, StoreError>>,
{
    fetch: F,
    batch_size: usize,
    retry: RetryPolicy,
    cursor: Option<String>,
    exhausted: bool,
}

impl<T, F, Fut> Paginator<T, F, Fut>
where
    T: StoreDocument,
    F: FnMut(Option<String>, usize) -> Fut,
    Fut: Future<Output = Result<Vec<T>, StoreError>>,
{
    pub fn new(fetch: F, batch_size: usize, retry: RetryPolicy) -> Self {
        Self {
            fetch,
            batch_size,
            retry,
            cursor: None,
            exhausted: false,
        }
    }

    /// Fetches the next page.
    ///
    /// Returns `Ok(None)` once the collection is exhausted. An empty page
    /// is the normal end-of-collection signal. Deadline failures are
    /// retried per the policy; when the attempt budget is spent the
    /// paginator gives up on the rest of the collection and reports it as
    /// exhausted instead of failing the caller, so everything fetched so
    /// far stays usable.
    ///
    /// # Errors
    ///
    /// Returns any non-deadline store error unchanged.
    pub async fn next_page(&mut self) -> Result<Option<Vec<T>>, StoreError> {
        if self.exhausted {
            return Ok(None);
        }

        let retry = self.retry;
        let batch_size = self.batch_size;
        let cursor = self.cursor.clone();

        let page = {
            let fetch = &mut self.fetch;
            retry.run(|| fetch(cursor.clone(), batch_size)).await
        };

        match page {
            Ok(docs) if docs.is_empty() => {
                self.exhausted = true;
                Ok(None)
            }
            Ok(docs) => {
                self.cursor = docs.last().map(|d| d.doc_id().to_string());
                Ok(Some(docs))
            }
            Err(StoreError::DeadlineExceeded) => {
                self.exhausted = true;
                tracing::warn!(
                    "giving up on collection after {} deadline-exceeded attempts, keeping partial results",
                    retry.max_attempts
                );
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Drains the whole collection into memory.
    ///
    /// # Errors
    ///
    /// Returns the first non-deadline store error; documents accumulated
    /// before a deadline exhaustion are returned as a partial success.
    pub async fn fetch_all(mut self) -> Result<Vec<T>, StoreError> {
        let mut all = Vec::new();
        while let Some(page) = self.next_page().await? {
            all.extend(page);
        }
        Ok(all)
    }
}
