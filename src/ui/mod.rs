//! Raw editor and template-store JSON shapes, and their conversion into the canonical model.

pub mod conversion;
pub mod types;

pub use types::*;
