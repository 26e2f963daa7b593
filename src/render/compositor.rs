use image::{Rgba, RgbaImage};
use ndarray::ArrayView2;

use crate::model::{LABELS, LabelId};

use super::{LabelPalette, RenderError, Result, blend_over, grayscale_to_rgba};

/// The middle layer of a panel. Persisted labels and the diff map exclude each other.
#[derive(Debug, Clone)]
pub enum Overlay<'a> {
    None,
    Labels(ArrayView2<'a, u8>),
    Diff {
        prediction: ArrayView2<'a, u8>,
        reference: ArrayView2<'a, u8>,
    },
}

/// Pixels the hovered or dragged tool would touch.
#[derive(Debug, Clone)]
pub struct PreviewLayer<'a> {
    pub mask: ArrayView2<'a, bool>,
    pub color: Rgba<u8>,
}

/// Blends base, overlay and preview in that fixed order.
#[derive(Debug, Clone, Copy)]
pub struct Compositor<'p> {
    palette: &'p LabelPalette,
}

impl<'p> Compositor<'p> {
    pub fn new(palette: &'p LabelPalette) -> Self {
        Self { palette }
    }

    pub fn compose(
        &self,
        base: ArrayView2<'_, u8>,
        overlay: &Overlay<'_>,
        preview: Option<&PreviewLayer<'_>>,
    ) -> Result<RgbaImage> {
        let expected = base.dim();
        let mut raster = grayscale_to_rgba(base)?;

        match overlay {
            Overlay::None => {}
            Overlay::Labels(labels) => {
                check_shape("label", expected, labels.dim())?;
                paint(&mut raster, |row, col| {
                    self.label_color(labels[[row, col]])
                });
            }
            Overlay::Diff {
                prediction,
                reference,
            } => {
                check_shape("prediction", expected, prediction.dim())?;
                check_shape("reference", expected, reference.dim())?;
                paint(&mut raster, |row, col| {
                    self.diff_color(prediction[[row, col]], reference[[row, col]])
                });
            }
        }

        if let Some(preview) = preview {
            check_shape("preview", expected, preview.mask.dim())?;
            paint(&mut raster, |row, col| {
                preview.mask[[row, col]].then_some(preview.color)
            });
        }

        Ok(raster)
    }

    fn label_color(&self, value: u8) -> Option<Rgba<u8>> {
        LabelId::try_from(value)
            .ok()
            .map(|label| self.palette.label(label))
    }

    /// One class per pixel; where a pixel is an error for both labels the label 2 class
    /// wins, false negatives over false positives.
    fn diff_color(&self, prediction: u8, reference: u8) -> Option<Rgba<u8>> {
        let mut color = None;
        for label in LABELS {
            let value = label.value();
            let in_prediction = prediction == value;
            let in_reference = reference == value;
            if in_prediction && !in_reference {
                color = Some(self.palette.false_positive(label));
            }
            if in_reference && !in_prediction {
                color = Some(self.palette.false_negative(label));
            }
        }
        color
    }
}

fn check_shape(
    layer: &'static str,
    expected: (usize, usize),
    found: (usize, usize),
) -> Result<()> {
    if expected == found {
        Ok(())
    } else {
        Err(RenderError::LayerShapeMismatch {
            layer,
            expected,
            found,
        })
    }
}

fn paint(raster: &mut RgbaImage, mut color_at: impl FnMut(usize, usize) -> Option<Rgba<u8>>) {
    for (x, y, pixel) in raster.enumerate_pixels_mut() {
        if let Some(color) = color_at(y as usize, x as usize) {
            *pixel = blend_over(*pixel, color);
        }
    }
}
