use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};
use ndarray::ArrayView2;

use crate::viewport::ViewportFrame;

use super::{RenderError, Result};

pub fn grayscale_to_rgba(gray: ArrayView2<'_, u8>) -> Result<RgbaImage> {
    let (rows, cols) = gray.dim();
    let width = u32::try_from(cols).map_err(|_| RenderError::RasterTooLarge((rows, cols)))?;
    let height = u32::try_from(rows).map_err(|_| RenderError::RasterTooLarge((rows, cols)))?;
    Ok(RgbaImage::from_fn(width, height, |x, y| {
        let value = gray[[y as usize, x as usize]];
        Rgba([value, value, value, u8::MAX])
    }))
}

/// Porter-Duff "over" of `src` onto `dst`.
pub fn blend_over(dst: Rgba<u8>, src: Rgba<u8>) -> Rgba<u8> {
    let src_alpha = f32::from(src[3]) / 255.0;
    if src_alpha <= 0.0 {
        return dst;
    }
    let dst_alpha = f32::from(dst[3]) / 255.0;
    let out_alpha = src_alpha + dst_alpha * (1.0 - src_alpha);
    let mut out = [0_u8; 4];
    for channel in 0..3 {
        let value = (f32::from(src[channel]) * src_alpha
            + f32::from(dst[channel]) * dst_alpha * (1.0 - src_alpha))
            / out_alpha;
        out[channel] = value.round().clamp(0.0, 255.0) as u8;
    }
    out[3] = (out_alpha * 255.0).round().clamp(0.0, 255.0) as u8;
    Rgba(out)
}

/// Crops the composited slice to the frame's field of view and resamples it to the display
/// size.
pub fn present(raster: &RgbaImage, frame: &ViewportFrame) -> RgbaImage {
    let (left, top, width, height) = frame.crop_pixels();
    let cropped = imageops::crop_imm(raster, left, top, width, height).to_image();
    if cropped.dimensions() == (frame.display.width, frame.display.height) {
        return cropped;
    }
    imageops::resize(
        &cropped,
        frame.display.width,
        frame.display.height,
        FilterType::Lanczos3,
    )
}
