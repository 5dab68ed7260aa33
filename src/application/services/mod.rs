//! Business logic services for the application layer.

pub mod extraction_service;
pub mod shop_processor;

pub use extraction_service::{ExtractionService, ExtractionSettings};
pub use shop_processor::ShopProcessor;
