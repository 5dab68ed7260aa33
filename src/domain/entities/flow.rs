//! Flow document snapshot.

use serde_json::Value;

use crate::domain::entities::StoreDocument;

/// A marketing flow belonging to exactly one shop.
///
/// The `attributes` payload is semi-structured and is scanned for links in
/// its serialized form rather than by field access.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowDocument {
    pub id: String,
    pub attributes: Value,
}

impl FlowDocument {
    pub fn new(id: impl Into<String>, attributes: Value) -> Self {
        Self {
            id: id.into(),
            attributes,
        }
    }
}

impl StoreDocument for FlowDocument {
    fn doc_id(&self) -> &str {
        &self.id
    }
}
