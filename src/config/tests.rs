use std::fs;

use crate::edit::ToolKind;
use crate::viewport::{DisplaySize, SizePolicy};

use super::{ConfigError, ViewerSettings, load_settings, save_settings};

#[test]
fn defaults_are_valid() {
    let settings = ViewerSettings::default();
    settings.validate().expect("defaults");
    assert_eq!(settings.undo_depth, 20);
    assert_eq!(settings.zoom_step, 1.1);
    assert_eq!(settings.normalization.subsample_stride, 2);
}

#[test]
fn partial_yaml_keeps_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("viewer.yaml");
    fs::write(
        &path,
        "gamma: 0.8\ntools:\n  tool: RegionFill\n  tolerance: 12.5\n",
    )
    .expect("write");

    let settings = load_settings(&path).expect("load");
    assert_eq!(settings.gamma, 0.8);
    assert_eq!(settings.tools.tool, ToolKind::RegionFill);
    assert_eq!(settings.tools.tolerance(), 12.5);
    assert_eq!(settings.tools.brush_diameter(), 5);
    assert_eq!(settings.dual_panel_height, 512);
}

#[test]
fn json_round_trip() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("viewer.json");
    let mut settings = ViewerSettings::default();
    settings.fit_to_window = true;
    settings.palette.erase_preview = [200, 0, 0, 255];
    save_settings(&path, &settings).expect("save");
    assert_eq!(load_settings(&path).expect("load"), settings);
}

#[test]
fn invalid_values_are_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("viewer.json");
    fs::write(&path, r#"{"gamma": 0.0}"#).expect("write");
    assert!(matches!(
        load_settings(&path),
        Err(ConfigError::Invalid { field: "gamma", .. })
    ));

    let mut settings = ViewerSettings::default();
    settings.normalization.low_percentile = 99.0;
    settings.normalization.high_percentile = 1.0;
    assert!(settings.validate().is_err());

    let mut settings = ViewerSettings::default();
    settings.zoom_step = 1.0;
    assert!(settings.validate().is_err());
}

#[test]
fn size_policy_follows_panel_count_and_fit_flag() {
    let mut settings = ViewerSettings::default();
    let container = Some(DisplaySize {
        width: 1000,
        height: 600,
    });
    assert_eq!(
        settings.size_policy(2, container),
        SizePolicy::FixedHeight(512)
    );
    assert_eq!(settings.size_policy(1, None), SizePolicy::FixedHeight(750));

    settings.fit_to_window = true;
    assert_eq!(
        settings.size_policy(2, container),
        SizePolicy::Fit {
            max_width: 480,
            max_height: 580
        }
    );
    assert_eq!(settings.size_policy(1, None), SizePolicy::FixedHeight(750));
}
