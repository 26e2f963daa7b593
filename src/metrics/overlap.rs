use ndarray::{ArrayView, Dimension, Zip};
use serde::{Deserialize, Serialize};

use crate::model::LabelId;

use super::{MetricsError, Result};

/// Voxel counts for one label value compared across two label arrays.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlapCounts {
    pub intersection: u64,
    pub union: u64,
    pub prediction: u64,
    pub reference: u64,
}

impl OverlapCounts {
    pub fn sum(&self) -> u64 {
        self.prediction + self.reference
    }

    /// `1.0` when neither side contains the label.
    pub fn dice(&self) -> f64 {
        match self.sum() {
            0 => 1.0,
            sum => 2.0 * self.intersection as f64 / sum as f64,
        }
    }

    /// `1.0` when neither side contains the label.
    pub fn iou(&self) -> f64 {
        match self.union {
            0 => 1.0,
            union => self.intersection as f64 / union as f64,
        }
    }

    fn record(mut self, in_prediction: bool, in_reference: bool) -> Self {
        self.prediction += u64::from(in_prediction);
        self.reference += u64::from(in_reference);
        self.intersection += u64::from(in_prediction && in_reference);
        self.union += u64::from(in_prediction || in_reference);
        self
    }

    fn merge(self, other: Self) -> Self {
        Self {
            intersection: self.intersection + other.intersection,
            union: self.union + other.union,
            prediction: self.prediction + other.prediction,
            reference: self.reference + other.reference,
        }
    }
}

/// Count `label` in both arrays in a single parallel pass. Works on whole volumes and on
/// single slices alike.
pub fn overlap_counts<D: Dimension>(
    prediction: ArrayView<'_, u8, D>,
    reference: ArrayView<'_, u8, D>,
    label: LabelId,
) -> Result<OverlapCounts> {
    if prediction.shape() != reference.shape() {
        return Err(MetricsError::ShapeMismatch {
            prediction: prediction.shape().to_vec(),
            reference: reference.shape().to_vec(),
        });
    }
    let value = label.value();
    Ok(Zip::from(prediction).and(reference).par_fold(
        OverlapCounts::default,
        |counts, &predicted, &expected| counts.record(predicted == value, expected == value),
        OverlapCounts::merge,
    ))
}
