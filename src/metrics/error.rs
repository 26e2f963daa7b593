use thiserror::Error;

pub type Result<T> = std::result::Result<T, MetricsError>;

#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("cannot compare label arrays of shape {prediction:?} and {reference:?}")]
    ShapeMismatch {
        prediction: Vec<usize>,
        reference: Vec<usize>,
    },
}
