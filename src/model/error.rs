use thiserror::Error;

use super::{Shape3, VolumeRole};

pub type Result<T> = std::result::Result<T, CoreError>;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("{role} volume shape {found:?} does not match image shape {expected:?}")]
    ShapeMismatch {
        role: VolumeRole,
        expected: Shape3,
        found: Shape3,
    },

    #[error("invalid dimension size 0 at axis {axis}")]
    ZeroSizedDimension { axis: usize },

    #[error("slice index {index} is out of range for a volume of depth {depth}")]
    DepthOutOfRange { index: usize, depth: usize },

    #[error("invalid label value {0}; expected 1 or 2")]
    InvalidLabel(u8),
}
