use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::{LABELS, LabelId, LabelVolume};

use super::{OverlapCounts, Result, overlap_counts};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LabelOverlap {
    pub label: LabelId,
    pub dice: f64,
    pub iou: f64,
    pub intersection: u64,
    pub union: u64,
    pub sum: u64,
}

impl LabelOverlap {
    pub fn from_counts(label: LabelId, counts: &OverlapCounts) -> Self {
        Self {
            label,
            dice: counts.dice(),
            iou: counts.iou(),
            intersection: counts.intersection,
            union: counts.union,
            sum: counts.sum(),
        }
    }
}

/// Per-label overlap between a candidate segmentation and the reference. Labels are never
/// aggregated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsReport {
    pub labels: Vec<LabelOverlap>,
}

impl MetricsReport {
    pub fn get(&self, label: LabelId) -> Option<&LabelOverlap> {
        self.labels.iter().find(|entry| entry.label == label)
    }

    /// `Dice1:0.912 Dice2:0.850 | IoU1:0.838 IoU2:0.739`
    pub fn status_line(&self) -> String {
        let dice = self
            .labels
            .iter()
            .map(|entry| format!("Dice{}:{:.3}", entry.label, entry.dice))
            .collect::<Vec<_>>()
            .join(" ");
        let iou = self
            .labels
            .iter()
            .map(|entry| format!("IoU{}:{:.3}", entry.label, entry.iou))
            .collect::<Vec<_>>()
            .join(" ");
        format!("{dice} | {iou}")
    }
}

impl fmt::Display for MetricsReport {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.status_line())
    }
}

pub fn compare_labels(prediction: &LabelVolume, reference: &LabelVolume) -> Result<MetricsReport> {
    let labels = LABELS
        .iter()
        .map(|label| {
            overlap_counts(prediction.data.view(), reference.data.view(), *label)
                .map(|counts| LabelOverlap::from_counts(*label, &counts))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(MetricsReport { labels })
}
