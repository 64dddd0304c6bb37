use crate::error::AnalyticsError;
use crate::matrix::CorrelationMatrix;
use crate::synthesizer::SeriesMap;
use indexmap::IndexSet;
use itertools::Itertools;

/// A stateless calculator for the full pairwise Pearson correlation matrix.
#[derive(Debug, Default)]
pub struct CorrelationMatrixBuilder {}

impl CorrelationMatrixBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// The main entry point for building a correlation matrix.
    ///
    /// # Arguments
    ///
    /// * `series` - Entity id → series. All series must share one non-zero length.
    ///
    /// # Returns
    ///
    /// A `Result` containing the `CorrelationMatrix`, ordered like `series`, or an
    /// `AnalyticsError` (`InvalidInput` for an empty map, `ShapeMismatch` for unequal
    /// or zero lengths).
    pub fn build_matrix(&self, series: &SeriesMap) -> Result<CorrelationMatrix, AnalyticsError> {
        let Some(expected_len) = series.values().next().map(Vec::len) else {
            return Err(AnalyticsError::InvalidInput(
                "cannot correlate an empty series map".to_string(),
            ));
        };
        if expected_len == 0 {
            return Err(AnalyticsError::ShapeMismatch(
                "series must not be empty".to_string(),
            ));
        }
        if let Some((id, s)) = series.iter().find(|(_, s)| s.len() != expected_len) {
            return Err(AnalyticsError::ShapeMismatch(format!(
                "series '{}' has length {}, expected {}",
                id,
                s.len(),
                expected_len
            )));
        }

        let n = series.len();
        let columns: Vec<&[f64]> = series.values().map(Vec::as_slice).collect();
        let mut values = vec![vec![0.0; n]; n];

        // Self-correlation is 1.0 by definition, never by formula.
        for (i, row) in values.iter_mut().enumerate() {
            row[i] = 1.0;
        }

        // Each unordered pair is computed once and mirrored so symmetry is bit-exact.
        for (i, j) in (0..n).tuple_combinations() {
            let correlation = pearson_correlation(columns[i], columns[j]);
            values[i][j] = correlation;
            values[j][i] = correlation;
        }

        tracing::debug!(entities = n, length = expected_len, "Built correlation matrix.");

        let ids: IndexSet<String> = series.keys().cloned().collect();
        Ok(CorrelationMatrix::from_parts(ids, values))
    }
}

/// Pearson correlation over the overlapping prefix of two series.
///
/// Returns `0.0` when either series has zero variance (including fewer than two
/// overlapping samples) instead of `NaN`. The result is clamped to `[-1, 1]`.
pub fn pearson_correlation(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len().min(y.len());
    if n == 0 {
        return 0.0;
    }
    let (x, y) = (&x[..n], &y[..n]);

    if is_constant(x) || is_constant(y) {
        return 0.0;
    }

    let n_f = n as f64;
    let mean_x = x.iter().sum::<f64>() / n_f;
    let mean_y = y.iter().sum::<f64>() / n_f;

    let mut numerator = 0.0;
    let mut sum_sq_x = 0.0;
    let mut sum_sq_y = 0.0;
    for (a, b) in x.iter().zip(y) {
        let dx = a - mean_x;
        let dy = b - mean_y;
        numerator += dx * dy;
        sum_sq_x += dx * dx;
        sum_sq_y += dy * dy;
    }

    let denominator = (sum_sq_x * sum_sq_y).sqrt();
    if denominator == 0.0 || !denominator.is_finite() {
        return 0.0;
    }

    (numerator / denominator).clamp(-1.0, 1.0)
}

fn is_constant(values: &[f64]) -> bool {
    values.iter().all(|v| *v == values[0])
}
