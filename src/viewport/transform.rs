use serde::{Deserialize, Serialize};

use crate::model::Pixel;

use super::{SourceRect, ViewState};

/// Fit containers at or below this extent are treated as not yet laid out.
pub const MIN_FIT_EXTENT: u32 = 10;
pub const FALLBACK_FIT_EXTENT: u32 = 400;

/// How the displayed size of a panel is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SizePolicy {
    /// Fixed display height; width follows the source aspect ratio.
    FixedHeight(u32),
    /// Contain-fit inside a `max_width` x `max_height` container.
    Fit { max_width: u32, max_height: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DisplaySize {
    pub width: u32,
    pub height: u32,
}

impl SizePolicy {
    pub fn display_size(self, image_width: usize, image_height: usize) -> DisplaySize {
        let aspect = image_width.max(1) as f32 / image_height.max(1) as f32;
        match self {
            Self::FixedHeight(height) => {
                let height = height.max(1);
                DisplaySize {
                    width: round_extent(height as f32 * aspect),
                    height,
                }
            }
            Self::Fit {
                max_width,
                max_height,
            } => {
                let max_w = usable_extent(max_width);
                let max_h = usable_extent(max_height);
                let container_aspect = max_w as f32 / max_h as f32;
                if aspect > container_aspect {
                    DisplaySize {
                        width: max_w,
                        height: round_extent(max_w as f32 / aspect),
                    }
                } else {
                    DisplaySize {
                        width: round_extent(max_h as f32 * aspect),
                        height: max_h,
                    }
                }
            }
        }
    }
}

fn usable_extent(extent: u32) -> u32 {
    if extent <= MIN_FIT_EXTENT {
        FALLBACK_FIT_EXTENT
    } else {
        extent
    }
}

fn round_extent(value: f32) -> u32 {
    (value.round() as u32).max(1)
}

/// Result of the forward viewport mapping: the crop taken from the source image and the
/// size it is displayed at. Keeps everything the inverse mapping needs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportFrame {
    pub source_width: usize,
    pub source_height: usize,
    pub crop: SourceRect,
    pub display: DisplaySize,
    pub offset_x: f32,
    pub offset_y: f32,
}

/// Computes the clamped crop and display size for `state`, writing the clamped pan center
/// back into it.
pub fn compute_frame(
    state: &mut ViewState,
    source: (usize, usize),
    policy: SizePolicy,
) -> ViewportFrame {
    let (image_width, image_height) = source;
    let crop = state.field_of_view(image_width, image_height);
    ViewportFrame {
        source_width: image_width.max(1),
        source_height: image_height.max(1),
        crop,
        display: policy.display_size(image_width, image_height),
        offset_x: 0.0,
        offset_y: 0.0,
    }
}

impl ViewportFrame {
    /// Places the displayed image at the center of a larger drawing surface.
    pub fn centered_in(mut self, surface_width: f32, surface_height: f32) -> Self {
        self.offset_x = ((surface_width - self.display.width as f32) * 0.5).max(0.0);
        self.offset_y = ((surface_height - self.display.height as f32) * 0.5).max(0.0);
        self
    }

    /// Maps a surface point to continuous source coordinates, or `None` when it falls
    /// outside the displayed image.
    pub fn display_to_source(&self, x: f32, y: f32) -> Option<(f32, f32)> {
        let rel_x = x - self.offset_x;
        let rel_y = y - self.offset_y;
        let disp_w = self.display.width as f32;
        let disp_h = self.display.height as f32;
        if !(rel_x >= 0.0 && rel_x < disp_w && rel_y >= 0.0 && rel_y < disp_h) {
            return None;
        }
        let u = rel_x / disp_w;
        let v = rel_y / disp_h;
        Some((
            self.crop.x + u * self.crop.width,
            self.crop.y + v * self.crop.height,
        ))
    }

    pub fn display_to_pixel(&self, x: f32, y: f32) -> Option<Pixel> {
        let (source_x, source_y) = self.display_to_source(x, y)?;
        let column = source_x.floor();
        let row = source_y.floor();
        if column < 0.0 || row < 0.0 {
            return None;
        }
        let (column, row) = (column as usize, row as usize);
        if column >= self.source_width || row >= self.source_height {
            return None;
        }
        Some(Pixel::new(column, row))
    }

    /// Forward mapping of a continuous source point onto the drawing surface.
    pub fn source_to_display(&self, source_x: f32, source_y: f32) -> (f32, f32) {
        let u = if self.crop.width > 0.0 {
            (source_x - self.crop.x) / self.crop.width
        } else {
            0.0
        };
        let v = if self.crop.height > 0.0 {
            (source_y - self.crop.y) / self.crop.height
        } else {
            0.0
        };
        (
            self.offset_x + u * self.display.width as f32,
            self.offset_y + v * self.display.height as f32,
        )
    }

    /// Integer crop box `(left, top, width, height)` that stays inside the source image.
    pub fn crop_pixels(&self) -> (u32, u32, u32, u32) {
        let max_w = self.source_width as u32;
        let max_h = self.source_height as u32;
        let left = (self.crop.x.round().max(0.0) as u32).min(max_w - 1);
        let top = (self.crop.y.round().max(0.0) as u32).min(max_h - 1);
        let width = (self.crop.width.round() as u32).clamp(1, max_w - left);
        let height = (self.crop.height.round() as u32).clamp(1, max_h - top);
        (left, top, width, height)
    }
}
