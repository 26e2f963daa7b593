use thiserror::Error;

pub type Result<T> = std::result::Result<T, RenderError>;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("{layer} layer has shape {found:?} but the base slice has shape {expected:?}")]
    LayerShapeMismatch {
        layer: &'static str,
        expected: (usize, usize),
        found: (usize, usize),
    },

    #[error("slice of shape {0:?} does not fit a raster")]
    RasterTooLarge((usize, usize)),
}
