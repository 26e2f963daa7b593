use crate::model::CoreError;
use ndarray_npy::{ReadNpyError, WriteNpyError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, IoError>;

#[derive(Debug, Error)]
pub enum IoError {
    #[error("unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("unsupported array layout: {0}")]
    UnsupportedLayout(String),

    #[error("I/O failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("image encode failure: {0}")]
    Image(#[from] image::ImageError),

    #[error("npy decode failure: {0}")]
    ReadNpy(#[from] ReadNpyError),

    #[error("npy encode failure: {0}")]
    WriteNpy(#[from] WriteNpyError),

    #[error("metadata sidecar failure: {0}")]
    SerdeJson(#[from] serde_json::Error),

    #[error("core volume/metadata failure: {0}")]
    Core(#[from] CoreError),
}
