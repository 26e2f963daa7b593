use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub const IDENTITY_AFFINE: [[f64; 4]; 4] = [
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0],
    [0.0, 0.0, 0.0, 1.0],
];

/// Orientation data carried alongside a volume so exported labels can be tagged with the
/// geometry of the scan they were drawn on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolumeMetadata {
    pub affine: [[f64; 4]; 4],
    pub spacing: [f32; 3],
    pub source: Option<PathBuf>,
    #[serde(default)]
    pub extras: BTreeMap<String, serde_json::Value>,
}

impl Default for VolumeMetadata {
    fn default() -> Self {
        Self {
            affine: IDENTITY_AFFINE,
            spacing: [1.0, 1.0, 1.0],
            source: None,
            extras: BTreeMap::new(),
        }
    }
}

impl VolumeMetadata {
    pub fn with_source(source: impl Into<PathBuf>) -> Self {
        Self {
            source: Some(source.into()),
            ..Self::default()
        }
    }
}
