use image::Rgba;
use serde::{Deserialize, Serialize};

use crate::model::LabelId;

pub fn rgba(channels: [u8; 4]) -> Rgba<u8> {
    Rgba(channels)
}

/// Fixed `(color, alpha)` table for every overlay class. Label 1 is drawn in the green
/// family and label 2 in the yellow/orange family in every mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelPalette {
    pub labels: [[u8; 4]; 2],
    pub false_positive: [[u8; 4]; 2],
    pub false_negative: [[u8; 4]; 2],
    pub preview: [[u8; 4]; 2],
    pub erase_preview: [u8; 4],
}

impl Default for LabelPalette {
    fn default() -> Self {
        Self {
            labels: [[0, 255, 0, 76], [255, 255, 0, 76]],
            false_positive: [[0, 255, 0, 100], [255, 255, 0, 100]],
            false_negative: [[34, 139, 34, 120], [255, 140, 0, 120]],
            preview: [[140, 255, 140, 170], [255, 255, 150, 170]],
            erase_preview: [255, 40, 40, 150],
        }
    }
}

impl LabelPalette {
    pub fn label(&self, label: LabelId) -> Rgba<u8> {
        rgba(self.labels[label.slot()])
    }

    pub fn false_positive(&self, label: LabelId) -> Rgba<u8> {
        rgba(self.false_positive[label.slot()])
    }

    pub fn false_negative(&self, label: LabelId) -> Rgba<u8> {
        rgba(self.false_negative[label.slot()])
    }

    pub fn preview(&self, label: LabelId) -> Rgba<u8> {
        rgba(self.preview[label.slot()])
    }

    pub fn erase_preview(&self) -> Rgba<u8> {
        rgba(self.erase_preview)
    }
}
