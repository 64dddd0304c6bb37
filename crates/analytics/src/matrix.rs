use indexmap::IndexSet;
use serde::Serialize;

/// A square, symmetric Pearson correlation matrix keyed by entity id.
///
/// This struct is the output of the `CorrelationMatrixBuilder` and the input of the
/// presentation layer. The diagonal is exactly `1.0` and `values[i][j]` is bit-identical
/// to `values[j][i]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    ids: IndexSet<String>,
    values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    /// `values` must be `ids.len()` square; only the builder constructs matrices.
    pub(crate) fn from_parts(ids: IndexSet<String>, values: Vec<Vec<f64>>) -> Self {
        debug_assert_eq!(ids.len(), values.len());
        Self { ids, values }
    }

    pub fn size(&self) -> usize {
        self.ids.len()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.ids.get_index_of(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// The correlation between two entities, or `None` if either id is unknown.
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.index_of(a)?;
        let j = self.index_of(b)?;
        Some(self.values[i][j])
    }

    pub fn row(&self, i: usize) -> Option<&[f64]> {
        self.values.get(i).map(Vec::as_slice)
    }

    pub fn values(&self) -> &[Vec<f64>] {
        &self.values
    }

    /// Mean of the upper triangle, excluding the diagonal. `None` below two entities.
    pub fn average_off_diagonal(&self) -> Option<f64> {
        let pairs: Vec<f64> = self.off_diagonal().map(|(_, _, c)| c).collect();
        if pairs.is_empty() {
            return None;
        }
        Some(pairs.iter().sum::<f64>() / pairs.len() as f64)
    }

    /// The most positively correlated pair.
    pub fn strongest_pair(&self) -> Option<(&str, &str, f64)> {
        self.off_diagonal()
            .fold(None, |best, candidate| match best {
                Some((_, _, c)) if c >= candidate.2 => best,
                _ => Some(candidate),
            })
    }

    /// The most negatively correlated pair.
    pub fn weakest_pair(&self) -> Option<(&str, &str, f64)> {
        self.off_diagonal()
            .fold(None, |worst, candidate| match worst {
                Some((_, _, c)) if c <= candidate.2 => worst,
                _ => Some(candidate),
            })
    }

    fn off_diagonal(&self) -> impl Iterator<Item = (&str, &str, f64)> {
        let n = self.size();
        (0..n).flat_map(move |i| {
            ((i + 1)..n).map(move |j| {
                (
                    self.ids[i].as_str(),
                    self.ids[j].as_str(),
                    self.values[i][j],
                )
            })
        })
    }
}
