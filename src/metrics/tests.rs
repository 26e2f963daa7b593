use ndarray::{Array2, Array3, array};

use crate::model::{LabelId, LabelVolume};

use super::{MetricsError, compare_labels, overlap_counts};

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-12,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn absent_label_scores_perfectly() {
    let prediction = Array2::<u8>::zeros((4, 4));
    let reference = Array2::<u8>::zeros((4, 4));
    let counts =
        overlap_counts(prediction.view(), reference.view(), LabelId::One).expect("counts");
    assert_eq!(counts.sum(), 0);
    assert_eq!(counts.dice(), 1.0);
    assert_eq!(counts.iou(), 1.0);
}

#[test]
fn identical_masks_score_perfectly() {
    let mut prediction = Array2::<u8>::zeros((4, 4));
    for (row, col) in [(0, 0), (1, 1), (2, 2), (3, 3)] {
        prediction[[row, col]] = 1;
    }
    let reference = prediction.clone();
    let counts =
        overlap_counts(prediction.view(), reference.view(), LabelId::One).expect("counts");
    assert_eq!(counts.intersection, 4);
    assert_eq!(counts.union, 4);
    assert_eq!(counts.sum(), 8);
    assert_eq!(counts.dice(), 1.0);
    assert_eq!(counts.iou(), 1.0);
}

#[test]
fn partial_overlap() {
    let prediction = array![[1_u8, 1, 0]];
    let reference = array![[0_u8, 1, 1]];
    let counts =
        overlap_counts(prediction.view(), reference.view(), LabelId::One).expect("counts");
    assert_eq!(counts.intersection, 1);
    assert_eq!(counts.union, 3);
    assert_eq!(counts.sum(), 4);
    assert_close(counts.dice(), 0.5);
    assert_close(counts.iou(), 1.0 / 3.0);
}

#[test]
fn labels_are_scored_independently() {
    let mut prediction = Array3::<u8>::zeros((2, 2, 2));
    let mut reference = Array3::<u8>::zeros((2, 2, 2));
    prediction[[0, 0, 0]] = 1;
    reference[[0, 0, 0]] = 1;
    prediction[[1, 1, 1]] = 2;
    reference[[1, 0, 1]] = 2;

    let report = compare_labels(
        &LabelVolume::from_data(prediction).expect("prediction"),
        &LabelVolume::from_data(reference).expect("reference"),
    )
    .expect("report");

    let one = report.get(LabelId::One).expect("label 1");
    assert_eq!(one.dice, 1.0);
    let two = report.get(LabelId::Two).expect("label 2");
    assert_eq!(two.intersection, 0);
    assert_eq!(two.dice, 0.0);
    assert_eq!(two.iou, 0.0);
    assert_eq!(
        report.status_line(),
        "Dice1:1.000 Dice2:0.000 | IoU1:1.000 IoU2:0.000"
    );
}

#[test]
fn report_serializes_per_label_entries() {
    let volume = LabelVolume::from_data(Array3::<u8>::zeros((1, 1, 1))).expect("volume");
    let report = compare_labels(&volume, &volume).expect("report");
    let json = serde_json::to_value(&report).expect("json");
    assert_eq!(json["labels"][0]["label"], "One");
    assert_eq!(json["labels"][1]["dice"], 1.0);
}

#[test]
fn mismatched_shapes_are_rejected() {
    let prediction = Array2::<u8>::zeros((2, 3));
    let reference = Array2::<u8>::zeros((3, 2));
    let error = overlap_counts(prediction.view(), reference.view(), LabelId::Two)
        .expect_err("shape");
    assert!(matches!(error, MetricsError::ShapeMismatch { .. }));
}
