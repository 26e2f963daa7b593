use crate::model::CoreError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, EditError>;

#[derive(Debug, Error)]
pub enum EditError {
    #[error("tool mask has shape {found:?} but the label slice has shape {expected:?}")]
    MaskShapeMismatch {
        expected: (usize, usize),
        found: (usize, usize),
    },

    #[error("label volume error: {0}")]
    Core(#[from] CoreError),
}
