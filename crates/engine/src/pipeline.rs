use crate::error::PipelineError;
use analytics::{CorrelationMatrix, CorrelationMatrixBuilder, SeriesSynthesizer};
use configuration::{Config, DiagonalDisplayMode, Timeframe};
use core_types::{Entity, StockUniverse};
use navigator::{DrillDownNavigator, DrillDownState, Level, ViewLevel};
use presentation::{present, PresentationGrid};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;

/// Everything computed for one navigation state.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrelationView {
    pub level: Level,
    pub timeframe: Timeframe,
    pub entities: Vec<Entity>,
    pub matrix: CorrelationMatrix,
    pub grid: PresentationGrid,
}

/// Identifies a computation. Custom stock ids only count at the custom level, so editing
/// the custom list never invalidates the hierarchy's matrices.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    view: ViewLevel,
    custom_stock_ids: Vec<String>,
    timeframe: Timeframe,
    diagonal_mode: DiagonalDisplayMode,
}

impl CacheKey {
    fn new(state: &DrillDownState, timeframe: Timeframe, diagonal_mode: DiagonalDisplayMode) -> Self {
        let custom_stock_ids = match state.level() {
            Level::Custom => state.custom_stocks().iter().map(|s| s.id.clone()).collect(),
            _ => Vec::new(),
        };
        Self {
            view: state.view().clone(),
            custom_stock_ids,
            timeframe,
            diagonal_mode,
        }
    }
}

/// Runs `entities → series → matrix → grid` for the navigator's current state.
///
/// Sector and industry entities are synthesized with the aggregate knobs, stocks and
/// custom selections with the constituent knobs. Results are memoized per navigation
/// state, timeframe and diagonal mode until [`CorrelationPipeline::clear_cache`] is
/// called or the universe changes underneath the caller. Custom views are kept for the
/// latest custom list only.
#[derive(Debug)]
pub struct CorrelationPipeline {
    aggregate: SeriesSynthesizer,
    constituent: SeriesSynthesizer,
    builder: CorrelationMatrixBuilder,
    timeframe: Timeframe,
    diagonal_mode: DiagonalDisplayMode,
    seed: Option<u64>,
    memoize: bool,
    cache: HashMap<CacheKey, Arc<CorrelationView>>,
}

impl CorrelationPipeline {
    pub fn new(config: &Config) -> Result<Self, PipelineError> {
        config.validate()?;
        Ok(Self {
            aggregate: SeriesSynthesizer::new(config.synthesis.aggregate)?,
            constituent: SeriesSynthesizer::new(config.synthesis.constituent)?,
            builder: CorrelationMatrixBuilder::new(),
            timeframe: config.correlation.timeframe,
            diagonal_mode: config.correlation.diagonal_mode,
            seed: config.correlation.seed,
            memoize: true,
            cache: HashMap::new(),
        })
    }

    /// Recompute on every call instead of memoizing.
    pub fn without_cache(mut self) -> Self {
        self.memoize = false;
        self.cache.clear();
        self
    }

    pub fn timeframe(&self) -> Timeframe {
        self.timeframe
    }

    pub fn set_timeframe(&mut self, timeframe: Timeframe) {
        self.timeframe = timeframe;
    }

    pub fn diagonal_mode(&self) -> DiagonalDisplayMode {
        self.diagonal_mode
    }

    pub fn set_diagonal_mode(&mut self, diagonal_mode: DiagonalDisplayMode) {
        self.diagonal_mode = diagonal_mode;
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cached_views(&self) -> usize {
        self.cache.len()
    }

    /// The correlation view for the navigator's current state.
    ///
    /// Returns `Ok(None)` when the level yields fewer than two entities (an empty
    /// sector, a single-stock custom selection): there is nothing to correlate.
    pub fn compute(
        &mut self,
        universe: &StockUniverse,
        navigator: &DrillDownNavigator,
    ) -> Result<Option<Arc<CorrelationView>>, PipelineError> {
        let state = navigator.state();
        let key = CacheKey::new(state, self.timeframe, self.diagonal_mode);
        if let Some(view) = self.cache.get(&key) {
            tracing::debug!(level = %state.level(), "Correlation view served from cache.");
            return Ok(Some(Arc::clone(view)));
        }

        let entities = navigator.current_entity_set(universe);
        if entities.len() < 2 {
            tracing::debug!(
                level = %state.level(),
                entities = entities.len(),
                "Not enough entities to correlate."
            );
            return Ok(None);
        }

        let level = state.level();
        let synthesizer = match level {
            Level::Sectors | Level::Industries => &self.aggregate,
            Level::Stocks | Level::Custom => &self.constituent,
        };
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        let series = synthesizer.synthesize(&entities, self.timeframe.series_length(), &mut rng)?;
        let matrix = self.builder.build_matrix(&series)?;
        let grid = present(&matrix, &entities, self.diagonal_mode)?;

        tracing::info!(
            level = %level,
            entities = entities.len(),
            timeframe = ?self.timeframe,
            "Computed correlation view."
        );

        let view = Arc::new(CorrelationView {
            level,
            timeframe: self.timeframe,
            entities,
            matrix,
            grid,
        });
        if self.memoize {
            if matches!(key.view, ViewLevel::Custom) {
                // Only the current custom list is worth keeping.
                self.cache.retain(|k, _| {
                    !matches!(k.view, ViewLevel::Custom) || k.custom_stock_ids == key.custom_stock_ids
                });
            }
            self.cache.insert(key, Arc::clone(&view));
        }
        Ok(Some(view))
    }
}
