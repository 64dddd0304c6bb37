//! # Matrix Presentation
//!
//! Turns a `CorrelationMatrix` into a grid a renderer can paint without doing any
//! arithmetic of its own: labels, value-or-blank cells, a color bucket and a text tone
//! per cell.
//!
//! ## Public API
//!
//! - `present`: matrix + entities + diagonal policy → `PresentationGrid`.
//! - `ColorBucket`, `TextTone`, `PerformanceBucket`: the discrete styling classes.
//! - `correlation_legend` / `performance_legend`: ordered legend entries.
//! - `PresentationError`: the specific error types that can be returned from this crate.

pub mod buckets;
pub mod error;
pub mod grid;

pub use buckets::{
    correlation_legend, performance_legend, ColorBucket, LegendEntry, PerformanceBucket, TextTone,
};
pub use error::PresentationError;
pub use grid::{present, DisplayCell, PresentationGrid};
