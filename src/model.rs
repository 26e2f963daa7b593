mod case;
mod error;
mod label;
mod metadata;
mod volume;

#[cfg(test)]
mod tests;

pub use case::CaseVolumes;
pub use error::{CoreError, Result};
pub use label::{LABELS, LabelId, Pixel, VolumeRole};
pub use metadata::VolumeMetadata;
pub use volume::{IntensityVolume, LabelVolume, Shape3, Volume};
