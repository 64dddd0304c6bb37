//! # Drill-down Navigator
//!
//! The hierarchical navigation state machine of the correlation dashboard:
//! sectors → industries → stocks, plus an orthogonal custom stock selection.
//!
//! The navigator decides *which* entities are correlated. It never synthesizes series
//! or computes correlations itself.
//!
//! ## Public API
//!
//! - `DrillDownNavigator`: the single writer of navigation state.
//! - `NavigationEvent`: every transition as a value, for replaying event scripts.
//! - `DrillDownState` / `ViewLevel` / `Level`: the read-only state.
//! - `Breadcrumb`, `TopAndWorst`, `IndustrySummary`: read models for the view layer.

pub mod breadcrumb;
pub mod entities;
pub mod error;
pub mod navigator;
pub mod state;

pub use breadcrumb::Breadcrumb;
pub use entities::{IndustrySummary, TopAndWorst, PERFORMERS_PER_SIDE};
pub use error::NavigationError;
pub use navigator::{CustomSelection, DrillDownNavigator, NavigationEvent};
pub use state::{DrillDownSnapshot, DrillDownState, Level, ViewLevel, DEFAULT_MAX_CUSTOM_STOCKS};
