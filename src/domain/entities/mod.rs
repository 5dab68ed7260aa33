//! Core domain entities representing the business data model.
//!
//! This module contains the read-only snapshots fetched from the document
//! store, plus the extraction output row. Entities are plain data
//! structures without store or transport concerns.
//!
//! # Entity Types
//!
//! - [`ShopDocument`] - A shop, identified only by its id
//! - [`FlowDocument`] - A flow with its link-bearing `attributes` payload
//! - [`ActionDocument`] - An action with an arbitrary payload and an
//!   optional nested template id
//! - [`LinkMatch`] - One extracted link tagged with its provenance

pub mod action;
pub mod flow;
pub mod link_match;
pub mod shop;

pub use action::{ActionDocument, TEMPLATE_MALFORMED, TEMPLATE_NOT_AVAILABLE, TemplateIdPolicy};
pub use flow::FlowDocument;
pub use link_match::LinkMatch;
pub use shop::ShopDocument;

/// Anything with a stable per-document identifier.
///
/// The identifier of the last document of a page acts as the cursor for
/// the next page request of the same collection.
pub trait StoreDocument {
    fn doc_id(&self) -> &str;
}
