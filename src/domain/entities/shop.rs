//! Shop document snapshot.

use crate::domain::entities::StoreDocument;

/// A shop fetched from the store.
///
/// Only the identifier is ever read; it doubles as the pagination cursor
/// for the shop collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShopDocument {
    pub id: String,
}

impl ShopDocument {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

impl StoreDocument for ShopDocument {
    fn doc_id(&self) -> &str {
        &self.id
    }
}
