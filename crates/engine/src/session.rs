use crate::error::PipelineError;
use crate::pipeline::{CorrelationPipeline, CorrelationView};
use crate::universe::load_universe;
use configuration::Config;
use core_types::StockUniverse;
use navigator::{Breadcrumb, CustomSelection, DrillDownNavigator, NavigationEvent};
use std::path::Path;
use std::sync::Arc;

/// A complete dashboard: the stock universe, the navigation state and the pipeline that
/// turns the state into a correlation view.
#[derive(Debug)]
pub struct Dashboard {
    universe: StockUniverse,
    navigator: DrillDownNavigator,
    pipeline: CorrelationPipeline,
}

impl Dashboard {
    pub fn new(config: &Config, universe: StockUniverse) -> Result<Self, PipelineError> {
        let pipeline = CorrelationPipeline::new(config)?;
        Ok(Self {
            universe,
            navigator: DrillDownNavigator::new(config.correlation.max_custom_stocks),
            pipeline,
        })
    }

    /// Loads the universe from `universe_path`, or from `config.universe.path` when absent.
    pub fn from_config(config: &Config, universe_path: Option<&Path>) -> Result<Self, PipelineError> {
        let path = universe_path
            .or(config.universe.path.as_deref())
            .ok_or_else(|| {
                configuration::error::ConfigError::ValidationError(
                    "no stock universe given: set universe.path or pass a path".to_string(),
                )
            })?;
        let universe = load_universe(path, config.universe.sectors.as_deref())?;
        Self::new(config, universe)
    }

    pub fn universe(&self) -> &StockUniverse {
        &self.universe
    }

    pub fn navigator(&self) -> &DrillDownNavigator {
        &self.navigator
    }

    /// Replaces the stock collection and drops every memoized view.
    pub fn replace_universe(&mut self, universe: StockUniverse) {
        self.universe = universe;
        self.pipeline.clear_cache();
    }

    pub fn apply(&mut self, event: NavigationEvent) -> Result<(), PipelineError> {
        self.navigator.apply(&self.universe, event)?;
        Ok(())
    }

    /// Adds a stock from the universe to the custom selection by id.
    pub fn select_custom_stock(&mut self, stock_id: &str) -> Result<CustomSelection, PipelineError> {
        let stock = self.universe.find(stock_id).cloned().ok_or_else(|| {
            core_types::CoreError::InvalidInput(
                format!("stock '{stock_id}'"),
                "not found in the universe".to_string(),
            )
        })?;
        Ok(self.navigator.select_stock_for_custom(stock))
    }

    pub fn breadcrumbs(&self) -> Vec<Breadcrumb> {
        self.navigator.breadcrumbs()
    }

    pub fn current_view(&mut self) -> Result<Option<Arc<CorrelationView>>, PipelineError> {
        self.pipeline.compute(&self.universe, &self.navigator)
    }
}
