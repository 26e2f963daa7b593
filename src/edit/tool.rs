use std::collections::VecDeque;

use ndarray::{Array2, ArrayView2};
use serde::{Deserialize, Serialize};

use crate::model::{LabelId, Pixel};

const NEIGHBORS_4: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ToolKind {
    #[default]
    Paint,
    Erase,
    RegionFill,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolParams {
    pub tool: ToolKind,
    pub active_label: LabelId,
    /// Region fill writes background instead of the active label.
    pub fill_erases: bool,
    brush_diameter: u32,
    tolerance: f32,
}

impl Default for ToolParams {
    fn default() -> Self {
        Self {
            tool: ToolKind::Paint,
            active_label: LabelId::One,
            fill_erases: false,
            brush_diameter: 5,
            tolerance: 0.0,
        }
    }
}

impl ToolParams {
    pub fn new(tool: ToolKind, active_label: LabelId) -> Self {
        Self {
            tool,
            active_label,
            ..Self::default()
        }
    }

    pub fn brush_diameter(&self) -> u32 {
        self.brush_diameter.max(1)
    }

    pub fn set_brush_diameter(&mut self, diameter: u32) {
        self.brush_diameter = diameter.max(1);
    }

    pub fn tolerance(&self) -> f32 {
        sanitize_tolerance(self.tolerance)
    }

    pub fn set_tolerance(&mut self, tolerance: f32) {
        self.tolerance = sanitize_tolerance(tolerance);
    }

    pub fn is_erasing(&self) -> bool {
        match self.tool {
            ToolKind::Paint => false,
            ToolKind::Erase => true,
            ToolKind::RegionFill => self.fill_erases,
        }
    }

    /// Label value written at every masked pixel.
    pub fn target_value(&self) -> u8 {
        if self.is_erasing() {
            0
        } else {
            self.active_label.value()
        }
    }
}

fn sanitize_tolerance(tolerance: f32) -> f32 {
    if tolerance.is_finite() {
        tolerance.max(0.0)
    } else {
        0.0
    }
}

/// Pixels affected by applying `params` at `anchor`. An anchor outside the slice yields an
/// empty mask.
pub fn tool_mask(params: &ToolParams, intensity: ArrayView2<'_, f32>, anchor: Pixel) -> Array2<bool> {
    match params.tool {
        ToolKind::Paint | ToolKind::Erase => {
            disk_mask(intensity.dim(), anchor, params.brush_diameter())
        }
        ToolKind::RegionFill => region_fill_mask(intensity, anchor, params.tolerance()),
    }
}

/// Filled disk of radius `diameter / 2` centered on `center`.
pub fn disk_mask(shape: (usize, usize), center: Pixel, diameter: u32) -> Array2<bool> {
    let (rows, cols) = shape;
    let mut mask = Array2::from_elem(shape, false);
    if center.y >= rows || center.x >= cols {
        return mask;
    }
    let radius = f64::from(diameter.max(1)) / 2.0;
    let radius_sq = radius * radius;
    let reach = radius.floor() as usize;
    let row_end = (center.y + reach).min(rows - 1);
    let col_end = (center.x + reach).min(cols - 1);
    for row in center.y.saturating_sub(reach)..=row_end {
        let dy = row as f64 - center.y as f64;
        for col in center.x.saturating_sub(reach)..=col_end {
            let dx = col as f64 - center.x as f64;
            if dx * dx + dy * dy <= radius_sq {
                mask[[row, col]] = true;
            }
        }
    }
    mask
}

/// 4-connected flood fill from `seed` over pixels within `tolerance` of the seed
/// intensity. The seed is always part of the result.
pub fn region_fill_mask(intensity: ArrayView2<'_, f32>, seed: Pixel, tolerance: f32) -> Array2<bool> {
    let (rows, cols) = intensity.dim();
    let mut mask = Array2::from_elem((rows, cols), false);
    if seed.y >= rows || seed.x >= cols {
        return mask;
    }
    let tolerance = sanitize_tolerance(tolerance);
    let seed_value = intensity[seed.index()];
    let ceiling = rows * cols;

    let mut visited = Array2::from_elem((rows, cols), false);
    let mut queue = VecDeque::new();
    visited[seed.index()] = true;
    mask[seed.index()] = true;
    queue.push_back(seed.index());
    let mut reached = 1usize;

    while let Some((row, col)) = queue.pop_front() {
        if reached >= ceiling {
            break;
        }
        for (d_row, d_col) in NEIGHBORS_4 {
            let (Some(next_row), Some(next_col)) =
                (row.checked_add_signed(d_row), col.checked_add_signed(d_col))
            else {
                continue;
            };
            if next_row >= rows || next_col >= cols || visited[[next_row, next_col]] {
                continue;
            }
            visited[[next_row, next_col]] = true;
            if (intensity[[next_row, next_col]] - seed_value).abs() <= tolerance {
                mask[[next_row, next_col]] = true;
                reached += 1;
                queue.push_back((next_row, next_col));
            }
        }
    }
    mask
}
