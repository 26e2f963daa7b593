use std::path::{Path, PathBuf};

use crate::model::CaseVolumes;
use crate::session::ExportRequest;

use super::{Result, load_case, write_label_volume};

/// Hands fully materialized, shape-checked volumes to a session.
pub trait VolumeProvider {
    fn supports_extension(&self, extension: &str) -> bool;
    fn load(
        &self,
        image: &Path,
        prediction: Option<&Path>,
        reference: Option<&Path>,
    ) -> Result<CaseVolumes>;
}

/// Persists edited labels tagged with the geometry of their image.
pub trait LabelSink {
    fn supports_extension(&self, extension: &str) -> bool;
    fn export(&self, path: &Path, request: &ExportRequest) -> Result<PathBuf>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NpyCodec;

impl VolumeProvider for NpyCodec {
    fn supports_extension(&self, extension: &str) -> bool {
        extension.eq_ignore_ascii_case("npy")
    }

    fn load(
        &self,
        image: &Path,
        prediction: Option<&Path>,
        reference: Option<&Path>,
    ) -> Result<CaseVolumes> {
        load_case(image, prediction, reference)
    }
}

impl LabelSink for NpyCodec {
    fn supports_extension(&self, extension: &str) -> bool {
        extension.eq_ignore_ascii_case("npy")
    }

    fn export(&self, path: &Path, request: &ExportRequest) -> Result<PathBuf> {
        let mut labels = request.labels.clone();
        labels.metadata = request.metadata.clone();
        labels.metadata.source = Some(path.to_path_buf());
        let sidecar = write_label_volume(path, &labels)?;
        log::info!("exported labels to {}", path.display());
        Ok(sidecar)
    }
}
