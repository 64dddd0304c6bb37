//! # Correlation Engine
//!
//! The orchestrator of the correlation dashboard. It wires the drill-down navigator,
//! the analytics crate and the presentation adapter into one pipeline:
//!
//! `navigator.current_entity_set → synthesize → build_matrix → present`
//!
//! ## Public API
//!
//! - `CorrelationPipeline`: the memoized computation for one navigation state.
//! - `Dashboard`: a universe, a navigator and a pipeline owned together.
//! - `load_universe` / `parse_universe`: the JSON stock collection reader.
//! - `PipelineError` / `ErrorKind`: every failure the dashboard can surface.

pub mod error;
pub mod pipeline;
pub mod session;
pub mod universe;

pub use error::{ErrorKind, PipelineError};
pub use pipeline::{CorrelationPipeline, CorrelationView};
pub use session::Dashboard;
pub use universe::{load_universe, parse_universe};
