//! Firestore REST implementation of the document store.
//!
//! Concrete implementation of [`crate::domain::store::DocumentStore`]
//! over the `runQuery` endpoint, including decoding of Firestore typed
//! values into plain JSON.

pub mod client;
mod value;

pub use client::FirestoreStore;
