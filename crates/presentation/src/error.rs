use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PresentationError {
    /// The matrix does not cover every entity the grid is asked to label.
    #[error("Shape mismatch: {0}")]
    ShapeMismatch(String),
}
