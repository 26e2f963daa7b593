use ndarray::Array3;

use super::{
    CaseVolumes, CoreError, IntensityVolume, LabelId, LabelVolume, VolumeMetadata, VolumeRole,
};

fn image(shape: (usize, usize, usize)) -> IntensityVolume {
    IntensityVolume::from_data(Array3::zeros(shape)).expect("image")
}

fn labels(shape: (usize, usize, usize)) -> LabelVolume {
    LabelVolume::from_data(Array3::zeros(shape)).expect("labels")
}

#[test]
fn metadata_roundtrip_json() {
    let mut metadata = VolumeMetadata::with_source("case_001_0000.npy");
    metadata.spacing = [0.8, 0.8, 2.5];
    metadata.affine[0][3] = -120.0;
    metadata
        .extras
        .insert("scanner".into(), serde_json::json!("synthetic"));
    let serialized = serde_json::to_string_pretty(&metadata).expect("serialize metadata");
    let restored: VolumeMetadata = serde_json::from_str(&serialized).expect("deserialize");
    assert_eq!(restored, metadata);
}

#[test]
fn zero_sized_volume_is_rejected() {
    let error = IntensityVolume::from_data(Array3::zeros((4, 0, 2))).expect_err("empty axis");
    assert!(matches!(error, CoreError::ZeroSizedDimension { axis: 1 }));
}

#[test]
fn case_rejects_mismatched_reference() {
    let error = CaseVolumes::new(
        image((4, 4, 3)),
        Some(labels((4, 4, 3))),
        Some(labels((4, 5, 3))),
    )
    .expect_err("mismatch");
    match error {
        CoreError::ShapeMismatch {
            role,
            expected,
            found,
        } => {
            assert_eq!(role, VolumeRole::Reference);
            assert_eq!(expected, [4, 4, 3]);
            assert_eq!(found, [4, 5, 3]);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn case_accepts_missing_labels() {
    let case = CaseVolumes::new(image((3, 2, 5)), None, None).expect("case");
    assert_eq!(case.depth(), 5);
    assert!(case.prediction().is_none());
    assert!(case.reference().is_none());
}

#[test]
fn depth_check_reports_range() {
    let volume = image((2, 2, 3));
    assert!(volume.check_depth(2).is_ok());
    assert!(matches!(
        volume.check_depth(3),
        Err(CoreError::DepthOutOfRange { index: 3, depth: 3 })
    ));
}

#[test]
fn label_counting_and_conversion() {
    let mut volume = labels((2, 2, 1));
    volume.data[[0, 0, 0]] = 1;
    volume.data[[1, 1, 0]] = 1;
    assert_eq!(volume.count_label(LabelId::One), 2);
    assert_eq!(volume.count_label(LabelId::Two), 0);
    assert_eq!(LabelId::try_from(2).expect("label"), LabelId::Two);
    assert!(LabelId::try_from(3).is_err());
}

#[test]
fn min_max_skips_non_finite_samples() {
    let mut volume = image((2, 1, 1));
    volume.data[[0, 0, 0]] = f32::NAN;
    volume.data[[1, 0, 0]] = 4.0;
    assert_eq!(volume.min_max(), Some((4.0, 4.0)));
}
