//! # Core Types
//!
//! Layer 0 of the workspace: the read-only market data the correlation engine consumes
//! (`Stock`, `StockUniverse`) and the `Entity` every higher layer correlates.
//!
//! This crate has no knowledge of series synthesis, navigation, or presentation.

pub mod enums;
pub mod error;
pub mod structs;
pub mod taxonomy;

// Re-export the core types to provide a clean public API.
pub use enums::AssetType;
pub use error::CoreError;
pub use structs::{Entity, Stock};
pub use taxonomy::{StockUniverse, CANONICAL_SECTORS};
