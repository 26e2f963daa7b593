mod extract;
mod normalize;


pub use extract::{Rotation, extract_slice, oriented_shape, oriented_slice, oriented_slice_mut};
pub use normalize::{DEFAULT_GAMMA, IntensityWindow, NormalizationSettings, Normalizer};
