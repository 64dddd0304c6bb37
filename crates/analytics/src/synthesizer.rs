use crate::error::AnalyticsError;
use configuration::SynthesisParams;
use core_types::Entity;
use indexmap::IndexMap;
use rand::Rng;

/// One simulated performance sample per time step.
pub type TimeSeries = Vec<f64>;

/// Entity id → series, in the order the entities were given.
pub type SeriesMap = IndexMap<String, TimeSeries>;

/// Produces simulated daily series whose correlation structure loosely follows each
/// entity's reference performance while staying visibly noisy.
///
/// This is a simulation, not a forecast. Each sample is
/// `reference_performance * trend_factor + u` with `u` uniform in
/// `[-noise_amplitude / 2, noise_amplitude / 2)`. Entities without constituents get a
/// flat series at their trend instead.
#[derive(Debug, Clone, Copy)]
pub struct SeriesSynthesizer {
    params: SynthesisParams,
}

impl SeriesSynthesizer {
    /// Creates a synthesizer, rejecting knobs that could never produce a finite series.
    pub fn new(params: SynthesisParams) -> Result<Self, AnalyticsError> {
        validate_params(params.noise_amplitude, params.trend_factor)?;
        Ok(Self { params })
    }

    pub fn params(&self) -> SynthesisParams {
        self.params
    }

    /// Synthesizes `length` samples for every entity using the caller's random source.
    pub fn synthesize<R: Rng + ?Sized>(
        &self,
        entities: &[Entity],
        length: usize,
        rng: &mut R,
    ) -> Result<SeriesMap, AnalyticsError> {
        synthesize(
            entities,
            length,
            self.params.noise_amplitude,
            self.params.trend_factor,
            rng,
        )
    }
}

/// Builds one series per entity. See [`SeriesSynthesizer`] for the sample formula.
///
/// # Errors
///
/// `InvalidInput` when `entities` is empty, `length < 2`, an entity id repeats, or any
/// of the numeric inputs is not finite (or the noise amplitude is negative).
pub fn synthesize<R: Rng + ?Sized>(
    entities: &[Entity],
    length: usize,
    noise_amplitude: f64,
    trend_factor: f64,
    rng: &mut R,
) -> Result<SeriesMap, AnalyticsError> {
    if entities.is_empty() {
        return Err(AnalyticsError::InvalidInput(
            "cannot synthesize series for an empty entity list".to_string(),
        ));
    }
    if length < 2 {
        return Err(AnalyticsError::InvalidInput(format!(
            "series length must be at least 2, got {length}"
        )));
    }
    validate_params(noise_amplitude, trend_factor)?;

    let mut series = SeriesMap::with_capacity(entities.len());
    for entity in entities {
        if !entity.reference_performance.is_finite() {
            return Err(AnalyticsError::InvalidInput(format!(
                "entity '{}' has a non-finite reference performance",
                entity.id
            )));
        }

        let trend = entity.reference_performance * trend_factor;
        // No stocks, no performance: a flat series correlates to 0.0 with everything.
        let samples: TimeSeries = if entity.has_constituents() {
            (0..length)
                .map(|_| trend + (rng.random::<f64>() - 0.5) * noise_amplitude)
                .collect()
        } else {
            vec![trend; length]
        };

        if series.insert(entity.id.clone(), samples).is_some() {
            return Err(AnalyticsError::InvalidInput(format!(
                "duplicate entity id '{}'",
                entity.id
            )));
        }
    }

    tracing::debug!(
        entities = entities.len(),
        length,
        noise_amplitude,
        trend_factor,
        "Synthesized performance series."
    );
    Ok(series)
}

fn validate_params(noise_amplitude: f64, trend_factor: f64) -> Result<(), AnalyticsError> {
    if !noise_amplitude.is_finite() || noise_amplitude < 0.0 {
        return Err(AnalyticsError::InvalidInput(format!(
            "noise amplitude must be a non-negative finite number, got {noise_amplitude}"
        )));
    }
    if !trend_factor.is_finite() {
        return Err(AnalyticsError::InvalidInput(format!(
            "trend factor must be finite, got {trend_factor}"
        )));
    }
    Ok(())
}
