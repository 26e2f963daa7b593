mod state;
mod transform;

#[cfg(test)]
mod tests;

pub use state::{DEFAULT_ZOOM_STEP, MIN_ZOOM, SourceRect, ViewState, ZoomStep};
pub use transform::{
    DisplaySize, FALLBACK_FIT_EXTENT, MIN_FIT_EXTENT, SizePolicy, ViewportFrame, compute_frame,
};
