use std::fs;
use std::path::{Path, PathBuf};

use crate::model::VolumeMetadata;

use super::{IoError, Result};

pub(crate) fn extension(path: &Path) -> Result<String> {
    let ext = path
        .extension()
        .and_then(|value| value.to_str())
        .map(|value| value.to_ascii_lowercase())
        .ok_or_else(|| IoError::UnsupportedFormat(path.to_string_lossy().to_string()))?;
    Ok(ext)
}

/// JSON sidecar holding the geometry of the array stored at `path`.
pub fn metadata_path(path: impl AsRef<Path>) -> PathBuf {
    path.as_ref().with_extension("json")
}

pub(crate) fn read_metadata(path: &Path) -> Result<VolumeMetadata> {
    let sidecar = metadata_path(path);
    if !sidecar.is_file() {
        return Ok(VolumeMetadata::with_source(path));
    }
    let mut metadata: VolumeMetadata = serde_json::from_str(&fs::read_to_string(&sidecar)?)?;
    metadata.source = Some(path.to_path_buf());
    Ok(metadata)
}

pub(crate) fn write_metadata(path: &Path, metadata: &VolumeMetadata) -> Result<PathBuf> {
    let sidecar = metadata_path(path);
    fs::write(&sidecar, serde_json::to_string_pretty(metadata)?)?;
    Ok(sidecar)
}
