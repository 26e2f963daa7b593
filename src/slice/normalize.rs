use ndarray::{Array2, ArrayView2, Zip, s};
use rayon::slice::ParallelSliceMut;
use serde::{Deserialize, Serialize};

use crate::model::IntensityVolume;

pub const DEFAULT_GAMMA: f32 = 1.0;

/// How the global intensity window is estimated from a loaded volume.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizationSettings {
    pub low_percentile: f32,
    pub high_percentile: f32,
    /// Every `subsample_stride`-th voxel along each axis takes part in the estimate.
    pub subsample_stride: usize,
}

impl Default for NormalizationSettings {
    fn default() -> Self {
        Self {
            low_percentile: 0.5,
            high_percentile: 99.5,
            subsample_stride: 2,
        }
    }
}

/// Global `[low, high]` clip window mapped onto the 8-bit display range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntensityWindow {
    low: f32,
    high: f32,
}

impl IntensityWindow {
    /// `None` unless both bounds are finite and `low <= high`.
    pub fn new(low: f32, high: f32) -> Option<Self> {
        if low.is_finite() && high.is_finite() && low <= high {
            Some(Self { low, high })
        } else {
            None
        }
    }

    pub fn from_level_width(level: f32, width: f32) -> Option<Self> {
        if width > 0.0 {
            Self::new(level - width / 2.0, level + width / 2.0)
        } else {
            None
        }
    }

    /// Percentile window over a strided subsample of `volume`. Falls back to the plain
    /// min/max when no percentile can be taken, and widens an empty range to one unit.
    pub fn from_volume(volume: &IntensityVolume, settings: &NormalizationSettings) -> Self {
        let stride = settings.subsample_stride.max(1) as isize;
        let sample = volume.data.slice(s![..;stride, ..;stride, ..;stride]);
        let bounds = percentile_bounds(
            sample.iter().copied(),
            settings.low_percentile,
            settings.high_percentile,
        );
        let (low, high) = match bounds {
            Some(bounds) => bounds,
            None => {
                log::warn!("percentile window unavailable; using the volume min/max");
                volume.min_max().unwrap_or((0.0, 1.0))
            }
        };
        let high = if high <= low {
            log::debug!("degenerate intensity range at {low}; widening to one unit");
            low + 1.0
        } else {
            high
        };
        Self { low, high }
    }

    #[inline]
    pub fn low(&self) -> f32 {
        self.low
    }

    #[inline]
    pub fn high(&self) -> f32 {
        self.high
    }

    #[inline]
    pub fn level(&self) -> f32 {
        (self.low + self.high) / 2.0
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.high - self.low
    }

    pub fn is_degenerate(&self) -> bool {
        self.high <= self.low
    }

    /// Window/level drag: horizontal motion widens the window (never below one unit),
    /// vertical motion lowers the level.
    pub fn dragged(self, dx: f32, dy: f32) -> Self {
        let width = (self.width() + dx).max(1.0);
        let level = self.level() - dy;
        Self {
            low: level - width / 2.0,
            high: level + width / 2.0,
        }
    }
}

fn percentile_bounds(
    values: impl Iterator<Item = f32>,
    low_percentile: f32,
    high_percentile: f32,
) -> Option<(f32, f32)> {
    let valid = (0.0..=100.0).contains(&low_percentile)
        && (0.0..=100.0).contains(&high_percentile)
        && low_percentile <= high_percentile;
    if !valid {
        return None;
    }
    let mut sorted = values.filter(|value| value.is_finite()).collect::<Vec<_>>();
    if sorted.is_empty() {
        return None;
    }
    sorted.par_sort_unstable_by(f32::total_cmp);
    Some((
        percentile(&sorted, low_percentile),
        percentile(&sorted, high_percentile),
    ))
}

/// Linear interpolation between closest ranks of an ascending slice.
fn percentile(sorted: &[f32], percent: f32) -> f32 {
    let rank = f64::from(percent) / 100.0 * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let fraction = (rank - lower as f64) as f32;
    sorted[lower] + (sorted[upper] - sorted[lower]) * fraction
}

/// Clip, linear scale to `[0, 255]`, then gamma curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normalizer {
    window: IntensityWindow,
    gamma: f32,
}

impl Normalizer {
    pub fn new(window: IntensityWindow) -> Self {
        Self {
            window,
            gamma: DEFAULT_GAMMA,
        }
    }

    pub fn with_gamma(mut self, gamma: f32) -> Option<Self> {
        self.set_gamma(gamma).then_some(self)
    }

    /// Rejects gamma values outside `(0, inf)` and keeps the previous one.
    pub fn set_gamma(&mut self, gamma: f32) -> bool {
        if gamma.is_finite() && gamma > 0.0 {
            self.gamma = gamma;
            true
        } else {
            false
        }
    }

    pub fn gamma(&self) -> f32 {
        self.gamma
    }

    pub fn window(&self) -> IntensityWindow {
        self.window
    }

    pub fn set_window(&mut self, window: IntensityWindow) {
        self.window = window;
    }

    pub fn normalize_value(&self, value: f32) -> u8 {
        if self.window.is_degenerate() || value.is_nan() {
            return 0;
        }
        let IntensityWindow { low, high } = self.window;
        let unit = (value.clamp(low, high) - low) / (high - low);
        let corrected = if self.gamma == 1.0 {
            unit
        } else {
            unit.powf(1.0 / self.gamma)
        };
        (corrected * 255.0).clamp(0.0, 255.0) as u8
    }

    pub fn normalize_slice(&self, slice: ArrayView2<'_, f32>) -> Array2<u8> {
        Zip::from(slice).par_map_collect(|value| self.normalize_value(*value))
    }
}
