use crate::buckets::{ColorBucket, PerformanceBucket, TextTone};
use crate::error::PresentationError;
use analytics::CorrelationMatrix;
use configuration::DiagonalDisplayMode;
use core_types::Entity;
use serde::Serialize;

/// One renderable matrix cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayCell {
    /// `None` when the cell is a hidden diagonal.
    pub value: Option<f64>,
    pub color_bucket: ColorBucket,
    pub text_tone: TextTone,
    pub is_diagonal: bool,
}

impl DisplayCell {
    fn off_diagonal(value: f64) -> Self {
        Self {
            value: Some(value),
            color_bucket: ColorBucket::for_correlation(value),
            text_tone: TextTone::for_correlation(value),
            is_diagonal: false,
        }
    }

    fn diagonal(value: f64, mode: DiagonalDisplayMode) -> Self {
        let (value, color_bucket, text_tone) = match mode {
            DiagonalDisplayMode::ShowValue => (
                Some(value),
                ColorBucket::for_correlation(value),
                TextTone::for_correlation(value),
            ),
            DiagonalDisplayMode::HideOpaque => (None, ColorBucket::Opaque, TextTone::None),
            DiagonalDisplayMode::HideTransparent => {
                (None, ColorBucket::Transparent, TextTone::None)
            }
        };
        Self {
            value,
            color_bucket,
            text_tone,
            is_diagonal: true,
        }
    }
}

/// A fully styled `n × n` grid, rows and columns in entity order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PresentationGrid {
    pub row_labels: Vec<String>,
    pub col_labels: Vec<String>,
    /// Performance class of each row entity's reference performance. Renderers use it
    /// for stock row headers.
    pub row_performance: Vec<PerformanceBucket>,
    pub cells: Vec<Vec<DisplayCell>>,
}

impl PresentationGrid {
    pub fn size(&self) -> usize {
        self.row_labels.len()
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&DisplayCell> {
        self.cells.get(row).and_then(|r| r.get(col))
    }
}

/// Lays out `matrix` in the order of `entities`.
///
/// Headers are the entity labels; cells are looked up by entity id, so the matrix may be
/// ordered differently from `entities` but must contain every id.
///
/// # Errors
///
/// `ShapeMismatch` when an entity id is missing from the matrix.
pub fn present(
    matrix: &CorrelationMatrix,
    entities: &[Entity],
    diagonal_mode: DiagonalDisplayMode,
) -> Result<PresentationGrid, PresentationError> {
    let indices = entities
        .iter()
        .map(|entity| {
            matrix.index_of(&entity.id).ok_or_else(|| {
                PresentationError::ShapeMismatch(format!(
                    "entity '{}' is not in the correlation matrix",
                    entity.id
                ))
            })
        })
        .collect::<Result<Vec<usize>, _>>()?;

    let values = matrix.values();
    let cells: Vec<Vec<DisplayCell>> = indices
        .iter()
        .enumerate()
        .map(|(row, &i)| {
            indices
                .iter()
                .enumerate()
                .map(|(col, &j)| {
                    let value = values[i][j];
                    if row == col {
                        DisplayCell::diagonal(value, diagonal_mode)
                    } else {
                        DisplayCell::off_diagonal(value)
                    }
                })
                .collect()
        })
        .collect();

    let labels: Vec<String> = entities.iter().map(|e| e.label.clone()).collect();
    let row_performance = entities
        .iter()
        .map(|e| PerformanceBucket::for_change(e.reference_performance))
        .collect();

    tracing::debug!(size = labels.len(), mode = ?diagonal_mode, "Presented correlation grid.");

    Ok(PresentationGrid {
        row_labels: labels.clone(),
        col_labels: labels,
        row_performance,
        cells,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use analytics::{CorrelationMatrixBuilder, SeriesMap};

    fn entities() -> Vec<Entity> {
        vec![
            Entity::new("aapl", "AAPL", 6.2),
            Entity::new("msft", "MSFT", -0.5),
            Entity::new("xom", "XOM", -3.1),
        ]
    }

    fn matrix() -> CorrelationMatrix {
        let series: SeriesMap = [
            ("aapl", vec![1.0, 2.0, 3.0, 4.0, 5.0]),
            ("msft", vec![1.1, 2.3, 2.9, 4.2, 4.8]),
            ("xom", vec![5.0, 3.0, 4.0, 1.0, 2.0]),
        ]
        .into_iter()
        .map(|(id, s)| (id.to_string(), s))
        .collect();
        CorrelationMatrixBuilder::new().build_matrix(&series).unwrap()
    }

    #[test]
    fn show_value_keeps_the_diagonal() {
        let grid = present(&matrix(), &entities(), DiagonalDisplayMode::ShowValue).unwrap();

        assert_eq!(grid.size(), 3);
        assert_eq!(grid.row_labels, vec!["AAPL", "MSFT", "XOM"]);
        assert_eq!(grid.col_labels, grid.row_labels);
        for i in 0..3 {
            let cell = grid.cell(i, i).unwrap();
            assert_eq!(cell.value, Some(1.0));
            assert_eq!(cell.color_bucket, ColorBucket::StrongPositive);
            assert_eq!(cell.text_tone, TextTone::Light);
            assert!(cell.is_diagonal);
        }
    }

    #[test]
    fn hidden_diagonal_modes_blank_the_value() {
        let opaque = present(&matrix(), &entities(), DiagonalDisplayMode::HideOpaque).unwrap();
        let transparent =
            present(&matrix(), &entities(), DiagonalDisplayMode::HideTransparent).unwrap();

        for i in 0..3 {
            assert_eq!(opaque.cells[i][i].value, None);
            assert_eq!(opaque.cells[i][i].color_bucket, ColorBucket::Opaque);
            assert_eq!(opaque.cells[i][i].text_tone, TextTone::None);
            assert_eq!(transparent.cells[i][i].value, None);
            assert_eq!(transparent.cells[i][i].color_bucket, ColorBucket::Transparent);
        }

        // Off-diagonal cells never depend on the mode.
        assert_eq!(opaque.cells[0][1], transparent.cells[0][1]);
        assert!(opaque.cells[0][1].value.is_some());
        assert!(!opaque.cells[0][1].is_diagonal);
    }

    #[test]
    fn follows_entity_order_not_matrix_order() {
        let mut reordered = entities();
        reordered.reverse();
        let matrix = matrix();
        let grid = present(&matrix, &reordered, DiagonalDisplayMode::ShowValue).unwrap();

        assert_eq!(grid.row_labels, vec!["XOM", "MSFT", "AAPL"]);
        assert_eq!(grid.cells[0][2].value, matrix.get("xom", "aapl"));
        assert_eq!(
            grid.row_performance,
            vec![
                PerformanceBucket::Loss,
                PerformanceBucket::SlightLoss,
                PerformanceBucket::StrongGain
            ]
        );
    }

    #[test]
    fn missing_entity_is_a_shape_mismatch() {
        let mut extra = entities();
        extra.push(Entity::new("nvda", "NVDA", 1.0));

        let err = present(&matrix(), &extra, DiagonalDisplayMode::ShowValue).unwrap_err();
        assert!(matches!(err, PresentationError::ShapeMismatch(_)));
    }

    #[test]
    fn grid_serializes_with_camel_case_keys() {
        let grid = present(&matrix(), &entities(), DiagonalDisplayMode::HideOpaque).unwrap();
        let json = serde_json::to_value(&grid).unwrap();

        assert!(json.get("rowLabels").is_some());
        assert_eq!(json["cells"][0][0]["colorBucket"], "opaque");
        assert_eq!(json["cells"][0][0]["value"], serde_json::Value::Null);
        assert_eq!(json["cells"][0][0]["isDiagonal"], true);
    }
}
