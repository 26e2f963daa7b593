mod error;
mod overlap;
mod report;

#[cfg(test)]
mod tests;

pub use error::{MetricsError, Result};
pub use overlap::{OverlapCounts, overlap_counts};
pub use report::{LabelOverlap, MetricsReport, compare_labels};
