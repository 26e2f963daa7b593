use crate::model::Pixel;

use super::{
    DEFAULT_ZOOM_STEP, DisplaySize, SizePolicy, ViewState, ZoomStep, compute_frame,
};

const SOURCES: [(usize, usize); 5] = [(512, 512), (300, 120), (1, 1), (7, 3), (64, 200)];

#[test]
fn crop_stays_inside_source_for_any_zoom_and_pan() {
    let zooms = [1.0_f32, 1.1, 1.5, 2.0, 3.7, 10.0, 64.0];
    let pans = [0.0_f32, 0.01, 0.25, 0.5, 0.77, 0.99, 1.0];
    for (width, height) in SOURCES {
        for zoom in zooms {
            for pan_x in pans {
                for pan_y in pans {
                    let mut state = ViewState {
                        zoom,
                        pan_x,
                        pan_y,
                    };
                    let frame =
                        compute_frame(&mut state, (width, height), SizePolicy::FixedHeight(512));
                    assert!(
                        frame.crop.is_within(width, height),
                        "crop {:?} escapes {width}x{height} (zoom {zoom}, pan {pan_x},{pan_y})",
                        frame.crop
                    );
                    let (left, top, crop_w, crop_h) = frame.crop_pixels();
                    assert!(left + crop_w <= width as u32);
                    assert!(top + crop_h <= height as u32);
                }
            }
        }
    }
}

#[test]
fn invalid_zoom_and_pan_are_clamped() {
    let mut state = ViewState {
        zoom: 0.25,
        pan_x: f32::NAN,
        pan_y: 4.0,
    };
    let frame = compute_frame(&mut state, (100, 50), SizePolicy::FixedHeight(100));
    assert_eq!(state.zoom, 1.0);
    assert!((frame.crop.width - 100.0).abs() < 1e-4);
    assert!((frame.crop.height - 50.0).abs() < 1e-4);
    assert!(frame.crop.is_within(100, 50));
}

#[test]
fn roundtrip_maps_back_within_one_pixel() {
    let mut state = ViewState {
        zoom: 2.0,
        pan_x: 0.3,
        pan_y: 0.7,
    };
    let frame = compute_frame(&mut state, (128, 96), SizePolicy::FixedHeight(512))
        .centered_in(900.0, 700.0);
    let (left, top, crop_w, crop_h) = frame.crop_pixels();
    for py in (top..top + crop_h).step_by(5) {
        for px in (left..left + crop_w).step_by(5) {
            let (dx, dy) = frame.source_to_display(px as f32 + 0.5, py as f32 + 0.5);
            let pixel = frame.display_to_pixel(dx, dy).expect("inside display");
            assert!((pixel.x as i64 - px as i64).abs() <= 1);
            assert!((pixel.y as i64 - py as i64).abs() <= 1);
        }
    }
}

#[test]
fn points_outside_display_are_rejected() {
    let mut state = ViewState::new();
    let frame = compute_frame(
        &mut state,
        (300, 120),
        SizePolicy::Fit {
            max_width: 400,
            max_height: 400,
        },
    )
    .centered_in(600.0, 600.0);
    assert_eq!(
        frame.display,
        DisplaySize {
            width: 400,
            height: 160
        }
    );
    assert_eq!(frame.offset_x, 100.0);
    assert_eq!(frame.offset_y, 220.0);
    assert!(frame.display_to_pixel(10.0, 10.0).is_none());
    assert!(frame.display_to_pixel(100.0 + 400.0, 230.0).is_none());
    assert_eq!(frame.display_to_pixel(100.0, 220.0), Some(Pixel::new(0, 0)));
    assert_eq!(
        frame.display_to_pixel(100.0 + 399.9, 220.0 + 159.9),
        Some(Pixel::new(299, 119))
    );
}

#[test]
fn size_policies_preserve_aspect() {
    assert_eq!(
        SizePolicy::FixedHeight(512).display_size(300, 120),
        DisplaySize {
            width: 1280,
            height: 512
        }
    );
    assert_eq!(
        SizePolicy::Fit {
            max_width: 400,
            max_height: 300
        }
        .display_size(100, 200),
        DisplaySize {
            width: 150,
            height: 300
        }
    );
    assert_eq!(
        SizePolicy::Fit {
            max_width: 5,
            max_height: 8
        }
        .display_size(64, 64),
        DisplaySize {
            width: 400,
            height: 400
        }
    );
}

#[test]
fn zoom_is_multiplicative_and_floored() {
    let mut state = ViewState::new();
    state.zoom_step(ZoomStep::Out, DEFAULT_ZOOM_STEP);
    assert_eq!(state.zoom, 1.0);

    state.zoom_step(ZoomStep::In, DEFAULT_ZOOM_STEP);
    state.zoom_step(ZoomStep::In, DEFAULT_ZOOM_STEP);
    assert!((state.zoom - 1.21).abs() < 1e-5);

    state.zoom_step(ZoomStep::Out, DEFAULT_ZOOM_STEP);
    assert!((state.zoom - 1.1).abs() < 1e-5);

    state.zoom_step(ZoomStep::In, 0.5);
    assert!((state.zoom - 1.21).abs() < 1e-5);
}

#[test]
fn zoom_out_near_edge_snaps_pan_back() {
    let mut state = ViewState {
        zoom: 4.0,
        pan_x: 0.95,
        pan_y: 0.02,
    };
    compute_frame(&mut state, (100, 100), SizePolicy::FixedHeight(100));
    assert!((state.pan_x - 0.875).abs() < 1e-5);
    assert!((state.pan_y - 0.125).abs() < 1e-5);

    state.set_zoom(1.0);
    let frame = compute_frame(&mut state, (100, 100), SizePolicy::FixedHeight(100));
    assert!((state.pan_x - 0.5).abs() < 1e-5);
    assert!((state.pan_y - 0.5).abs() < 1e-5);
    assert_eq!(frame.crop.x, 0.0);
    assert_eq!(frame.crop.y, 0.0);
}

#[test]
fn dragging_right_moves_window_left() {
    let mut state = ViewState {
        zoom: 2.0,
        pan_x: 0.5,
        pan_y: 0.5,
    };
    let display = DisplaySize {
        width: 200,
        height: 200,
    };
    state.pan_by((20.0, -40.0), display, 100, 100);
    assert!((state.pan_x - 0.45).abs() < 1e-5);
    assert!((state.pan_y - 0.6).abs() < 1e-5);

    state.pan_by((10_000.0, 0.0), display, 100, 100);
    assert!((state.pan_x - 0.25).abs() < 1e-5);
}

#[test]
fn pan_ignores_empty_display() {
    let mut state = ViewState {
        zoom: 3.0,
        pan_x: 0.4,
        pan_y: 0.4,
    };
    state.pan_by((5.0, 5.0), DisplaySize::default(), 10, 10);
    assert_eq!(state.pan_x, 0.4);
}
