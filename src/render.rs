mod color;
mod compositor;
mod error;
mod raster;

#[cfg(test)]
mod tests;

pub use color::{LabelPalette, rgba};
pub use compositor::{Compositor, Overlay, PreviewLayer};
pub use error::{RenderError, Result};
pub use raster::{blend_over, grayscale_to_rgba, present};
