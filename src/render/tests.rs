use image::{Rgba, RgbaImage};
use ndarray::{Array2, array};

use crate::model::LabelId;
use crate::viewport::{SizePolicy, ViewState, compute_frame};

use super::{
    Compositor, LabelPalette, Overlay, PreviewLayer, RenderError, blend_over, grayscale_to_rgba,
    present,
};

const GRAY: Rgba<u8> = Rgba([100, 100, 100, 255]);

fn flat_base(rows: usize, cols: usize) -> Array2<u8> {
    Array2::from_elem((rows, cols), 100)
}

#[test]
fn base_layer_is_opaque_gray() {
    let gray = array![[0_u8, 128], [255, 7]];
    let raster = grayscale_to_rgba(gray.view()).expect("raster");
    assert_eq!(raster.dimensions(), (2, 2));
    assert_eq!(*raster.get_pixel(1, 0), Rgba([128, 128, 128, 255]));
    assert_eq!(*raster.get_pixel(0, 1), Rgba([255, 255, 255, 255]));
}

#[test]
fn alpha_over_on_opaque_background() {
    let blended = blend_over(GRAY, Rgba([0, 255, 0, 76]));
    assert_eq!(blended, Rgba([70, 146, 70, 255]));
    assert_eq!(blend_over(GRAY, Rgba([255, 0, 0, 0])), GRAY);
    assert_eq!(blend_over(GRAY, Rgba([1, 2, 3, 255])), Rgba([1, 2, 3, 255]));
}

#[test]
fn persisted_labels_use_palette_colors() {
    let palette = LabelPalette::default();
    let compositor = Compositor::new(&palette);
    let labels = array![[0_u8, 1], [2, 3]];
    let base = flat_base(2, 2);
    let raster = compositor
        .compose(base.view(), &Overlay::Labels(labels.view()), None)
        .expect("compose");
    assert_eq!(*raster.get_pixel(0, 0), GRAY);
    assert_eq!(
        *raster.get_pixel(1, 0),
        blend_over(GRAY, palette.label(LabelId::One))
    );
    assert_eq!(
        *raster.get_pixel(0, 1),
        blend_over(GRAY, palette.label(LabelId::Two))
    );
    assert_eq!(*raster.get_pixel(1, 1), GRAY);
}

#[test]
fn diff_layer_classifies_errors_per_label() {
    let palette = LabelPalette::default();
    let compositor = Compositor::new(&palette);
    let prediction = array![[1_u8, 0, 1, 2, 1, 0]];
    let reference = array![[1_u8, 1, 0, 2, 2, 2]];
    let base = flat_base(1, 6);
    let raster = compositor
        .compose(
            base.view(),
            &Overlay::Diff {
                prediction: prediction.view(),
                reference: reference.view(),
            },
            None,
        )
        .expect("compose");
    assert_eq!(*raster.get_pixel(0, 0), GRAY);
    assert_eq!(
        *raster.get_pixel(1, 0),
        blend_over(GRAY, palette.false_negative(LabelId::One))
    );
    assert_eq!(
        *raster.get_pixel(2, 0),
        blend_over(GRAY, palette.false_positive(LabelId::One))
    );
    assert_eq!(*raster.get_pixel(3, 0), GRAY);
    assert_eq!(
        *raster.get_pixel(4, 0),
        blend_over(GRAY, palette.false_negative(LabelId::Two))
    );
    assert_eq!(
        *raster.get_pixel(5, 0),
        blend_over(GRAY, palette.false_negative(LabelId::Two))
    );
}

#[test]
fn preview_is_blended_above_labels() {
    let palette = LabelPalette::default();
    let compositor = Compositor::new(&palette);
    let labels = array![[1_u8, 1], [0, 0]];
    let mask = array![[true, false], [true, false]];
    let preview = PreviewLayer {
        mask: mask.view(),
        color: palette.preview(LabelId::Two),
    };
    let base = flat_base(2, 2);
    let raster = compositor
        .compose(base.view(), &Overlay::Labels(labels.view()), Some(&preview))
        .expect("compose");
    let labelled = blend_over(GRAY, palette.label(LabelId::One));
    assert_eq!(*raster.get_pixel(0, 0), blend_over(labelled, preview.color));
    assert_eq!(*raster.get_pixel(1, 0), labelled);
    assert_eq!(*raster.get_pixel(0, 1), blend_over(GRAY, preview.color));
    assert_eq!(*raster.get_pixel(1, 1), GRAY);
}

#[test]
fn misaligned_layer_is_rejected() {
    let palette = LabelPalette::default();
    let labels = Array2::<u8>::zeros((3, 2));
    let base = flat_base(2, 3);
    let error = Compositor::new(&palette)
        .compose(base.view(), &Overlay::Labels(labels.view()), None)
        .expect_err("shape");
    assert!(matches!(
        error,
        RenderError::LayerShapeMismatch {
            layer: "label",
            expected: (2, 3),
            found: (3, 2)
        }
    ));
}

#[test]
fn present_crops_and_resizes_to_display() {
    let raster = RgbaImage::from_fn(4, 2, |x, _| Rgba([x as u8 * 60, 0, 0, 255]));
    let mut state = ViewState::new();
    let frame = compute_frame(&mut state, (4, 2), SizePolicy::FixedHeight(2));
    assert_eq!(present(&raster, &frame), raster);

    let raster = RgbaImage::from_pixel(8, 8, GRAY);
    let mut state = ViewState {
        zoom: 2.0,
        pan_x: 0.5,
        pan_y: 0.5,
    };
    let frame = compute_frame(&mut state, (8, 8), SizePolicy::FixedHeight(32));
    assert_eq!(frame.crop_pixels(), (2, 2, 4, 4));
    let shown = present(&raster, &frame);
    assert_eq!(shown.dimensions(), (32, 32));
    assert_eq!(*shown.get_pixel(16, 16), GRAY);
}
