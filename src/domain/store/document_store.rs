//! Store trait for the hierarchical shop/flow/action collections.

use crate::domain::entities::{ActionDocument, FlowDocument, ShopDocument};
use crate::domain::store::StoreError;
use async_trait::async_trait;

/// Read-only access to the hierarchical document store.
///
/// Each method lists one page of a collection in the store's default
/// order. `start_after` is the id of the last document of the previous
/// page; `None` starts at the beginning of the collection. An empty page
/// means the collection is exhausted.
///
/// Implementations must distinguish the transient deadline-exceeded
/// condition ([`StoreError::DeadlineExceeded`]) from other failures, and
/// are assumed safe to share across concurrent readers.
///
/// # Implementations
///
/// - [`crate::infrastructure::firestore::FirestoreStore`] - Firestore REST implementation
/// - Test mocks available with `cfg(test)`; integration tests use the
///   in-memory store in `tests/common`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Lists one page of shops.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DeadlineExceeded`] on store timeout, other
    /// variants on request or decode failures.
    async fn list_shops(
        &self,
        limit: usize,
        start_after: Option<String>,
    ) -> Result<Vec<ShopDocument>, StoreError>;

    /// Lists one page of a shop's flows.
    ///
    /// # Errors
    ///
    /// See [`Self::list_shops`].
    async fn list_flows(
        &self,
        shop_id: &str,
        limit: usize,
        start_after: Option<String>,
    ) -> Result<Vec<FlowDocument>, StoreError>;

    /// Lists one page of a flow's actions.
    ///
    /// # Errors
    ///
    /// See [`Self::list_shops`].
    async fn list_actions(
        &self,
        shop_id: &str,
        flow_id: &str,
        limit: usize,
        start_after: Option<String>,
    ) -> Result<Vec<ActionDocument>, StoreError>;
}
