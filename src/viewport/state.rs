use serde::{Deserialize, Serialize};

use super::DisplaySize;

pub const MIN_ZOOM: f32 = 1.0;
pub const DEFAULT_ZOOM_STEP: f32 = 1.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomStep {
    In,
    Out,
}

/// A rectangle in source pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SourceRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl SourceRect {
    pub fn full(image_width: usize, image_height: usize) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: image_width.max(1) as f32,
            height: image_height.max(1) as f32,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    pub fn is_within(&self, image_width: usize, image_height: usize) -> bool {
        const SLACK: f32 = 1e-3;
        let image_w = image_width.max(1) as f32;
        let image_h = image_height.max(1) as f32;
        self.width > 0.0
            && self.height > 0.0
            && self.x >= -SLACK
            && self.y >= -SLACK
            && self.right() <= image_w + SLACK
            && self.bottom() <= image_h + SLACK
    }
}

/// Zoom level and pan center of one open volume. The pan center is stored as a fraction of
/// the source extent so it survives rotation and resizing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    pub zoom: f32,
    pub pan_x: f32,
    pub pan_y: f32,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            zoom: MIN_ZOOM,
            pan_x: 0.5,
            pan_y: 0.5,
        }
    }
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn set_zoom(&mut self, zoom: f32) {
        self.zoom = if zoom.is_finite() {
            zoom.max(MIN_ZOOM)
        } else {
            MIN_ZOOM
        };
    }

    /// One discrete zoom tick. `factor` falls back to [`DEFAULT_ZOOM_STEP`] unless it is a
    /// finite value above one.
    pub fn zoom_step(&mut self, step: ZoomStep, factor: f32) {
        let factor = if factor.is_finite() && factor > 1.0 {
            factor
        } else {
            DEFAULT_ZOOM_STEP
        };
        let next = match step {
            ZoomStep::In => self.zoom * factor,
            ZoomStep::Out => self.zoom / factor,
        };
        self.set_zoom(next);
    }

    /// Clamps the field of view into the source bounds and writes the clamped center back
    /// into the pan fields.
    pub fn field_of_view(&mut self, image_width: usize, image_height: usize) -> SourceRect {
        self.sanitize();
        let image_w = image_width.max(1) as f32;
        let image_h = image_height.max(1) as f32;
        let fov_w = image_w / self.zoom;
        let fov_h = image_h / self.zoom;

        let left = clamp_axis(self.pan_x * image_w - fov_w * 0.5, fov_w, image_w);
        let top = clamp_axis(self.pan_y * image_h - fov_h * 0.5, fov_h, image_h);

        self.pan_x = (left + fov_w * 0.5) / image_w;
        self.pan_y = (top + fov_h * 0.5) / image_h;

        SourceRect {
            x: left,
            y: top,
            width: fov_w,
            height: fov_h,
        }
    }

    /// Drag by `(dx, dy)` display pixels. Dragging right moves the visible window left.
    pub fn pan_by(
        &mut self,
        delta: (f32, f32),
        display: DisplaySize,
        image_width: usize,
        image_height: usize,
    ) {
        if display.width == 0 || display.height == 0 {
            return;
        }
        self.sanitize();
        let (dx, dy) = delta;
        if dx.is_finite() {
            self.pan_x -= (dx / display.width as f32) / self.zoom;
        }
        if dy.is_finite() {
            self.pan_y -= (dy / display.height as f32) / self.zoom;
        }
        self.field_of_view(image_width, image_height);
    }

    fn sanitize(&mut self) {
        self.set_zoom(self.zoom);
        self.pan_x = if self.pan_x.is_finite() {
            self.pan_x.clamp(0.0, 1.0)
        } else {
            0.5
        };
        self.pan_y = if self.pan_y.is_finite() {
            self.pan_y.clamp(0.0, 1.0)
        } else {
            0.5
        };
    }
}

fn clamp_axis(start: f32, extent: f32, limit: f32) -> f32 {
    let mut start = start;
    if start < 0.0 {
        start = 0.0;
    }
    if start + extent > limit {
        start = limit - extent;
    }
    start
}
