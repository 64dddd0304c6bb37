//! # Correlation Analytics
//!
//! This crate turns a set of entities into a correlation matrix. It is the numeric
//! heart of the dashboard.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of navigation or
//!   rendering. It depends only on `core-types` and `configuration`.
//! - **Injected randomness:** The `SeriesSynthesizer` never owns an RNG. Callers pass one
//!   in, which keeps every computation independent and reproducible under a seed.
//! - **Stateless Calculation:** The `CorrelationMatrixBuilder` takes a series map and
//!   produces a `CorrelationMatrix`, nothing more.
//!
//! ## Public API
//!
//! - `SeriesSynthesizer` / `synthesize`: simulated performance series per entity.
//! - `CorrelationMatrixBuilder` / `pearson_correlation`: the pairwise statistics.
//! - `CorrelationMatrix`: the square, symmetric result.
//! - `AnalyticsError`: the specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod engine;
pub mod error;
pub mod matrix;
pub mod synthesizer;

// Re-export the key components to create a clean, public-facing API.
pub use engine::{pearson_correlation, CorrelationMatrixBuilder};
pub use error::AnalyticsError;
pub use matrix::CorrelationMatrix;
pub use synthesizer::{synthesize, SeriesMap, SeriesSynthesizer, TimeSeries};
