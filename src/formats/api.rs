use std::path::{Path, PathBuf};

use image::RgbaImage;

use crate::model::{CaseVolumes, IntensityVolume, LabelVolume};

use super::npy::{read_intensity, read_labels, write};
use super::util::{extension, read_metadata, write_metadata};
use super::{IoError, Result};

pub fn supported_formats() -> &'static [&'static str] {
    &["npy"]
}

fn require_npy(path: &Path) -> Result<()> {
    match extension(path)?.as_str() {
        "npy" => Ok(()),
        other => Err(IoError::UnsupportedFormat(other.to_string())),
    }
}

pub fn read_intensity_volume(path: impl AsRef<Path>) -> Result<IntensityVolume> {
    let path = path.as_ref();
    require_npy(path)?;
    let volume = IntensityVolume::new(read_intensity(path)?, read_metadata(path)?)?;
    log::debug!("read image {:?} from {}", volume.shape(), path.display());
    Ok(volume)
}

pub fn read_label_volume(path: impl AsRef<Path>) -> Result<LabelVolume> {
    let path = path.as_ref();
    require_npy(path)?;
    let volume = LabelVolume::new(read_labels(path)?, read_metadata(path)?)?;
    log::debug!("read labels {:?} from {}", volume.shape(), path.display());
    Ok(volume)
}

/// Writes the array and its metadata sidecar; returns the sidecar path.
pub fn write_label_volume(path: impl AsRef<Path>, volume: &LabelVolume) -> Result<PathBuf> {
    let path = path.as_ref();
    require_npy(path)?;
    write(path, &volume.data)?;
    write_metadata(path, &volume.metadata)
}

pub fn write_intensity_volume(path: impl AsRef<Path>, volume: &IntensityVolume) -> Result<PathBuf> {
    let path = path.as_ref();
    require_npy(path)?;
    write(path, &volume.data)?;
    write_metadata(path, &volume.metadata)
}

/// Loads an image and its optional label volumes into a shape-checked case.
pub fn load_case(
    image: impl AsRef<Path>,
    prediction: Option<&Path>,
    reference: Option<&Path>,
) -> Result<CaseVolumes> {
    let image = read_intensity_volume(image)?;
    let prediction = prediction.map(read_label_volume).transpose()?;
    let reference = reference.map(read_label_volume).transpose()?;
    Ok(CaseVolumes::new(image, prediction, reference)?)
}

pub fn save_panel_png(image: &RgbaImage, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    match extension(path)?.as_str() {
        "png" => {
            image.save(path)?;
            Ok(())
        }
        other => Err(IoError::UnsupportedFormat(other.to_string())),
    }
}
