use serde::{Deserialize, Serialize};

use crate::edit::{DEFAULT_UNDO_DEPTH, ToolParams};
use crate::render::LabelPalette;
use crate::slice::{DEFAULT_GAMMA, NormalizationSettings};
use crate::viewport::{DEFAULT_ZOOM_STEP, DisplaySize, SizePolicy};

use super::{ConfigError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerSettings {
    pub gamma: f32,
    pub zoom_step: f32,
    pub undo_depth: usize,
    /// Display height of each panel when two panels are shown side by side.
    pub dual_panel_height: u32,
    pub single_panel_height: u32,
    pub fit_to_window: bool,
    /// Pixels kept free around each panel in fit mode.
    pub fit_margin: u32,
    pub normalization: NormalizationSettings,
    pub tools: ToolParams,
    pub palette: LabelPalette,
}

impl Default for ViewerSettings {
    fn default() -> Self {
        Self {
            gamma: DEFAULT_GAMMA,
            zoom_step: DEFAULT_ZOOM_STEP,
            undo_depth: DEFAULT_UNDO_DEPTH,
            dual_panel_height: 512,
            single_panel_height: 750,
            fit_to_window: false,
            fit_margin: 20,
            normalization: NormalizationSettings::default(),
            tools: ToolParams::default(),
            palette: LabelPalette::default(),
        }
    }
}

impl ViewerSettings {
    pub fn validate(&self) -> Result<()> {
        if !(self.gamma.is_finite() && self.gamma > 0.0) {
            return Err(invalid("gamma", format!("must be positive, got {}", self.gamma)));
        }
        if !(self.zoom_step.is_finite() && self.zoom_step > 1.0) {
            return Err(invalid(
                "zoom_step",
                format!("must be greater than 1, got {}", self.zoom_step),
            ));
        }
        if self.undo_depth == 0 {
            return Err(invalid("undo_depth", "must be at least 1".to_string()));
        }
        if self.dual_panel_height == 0 || self.single_panel_height == 0 {
            return Err(invalid("panel_height", "must be at least 1".to_string()));
        }

        let norm = &self.normalization;
        let in_range = |value: f32| (0.0..=100.0).contains(&value);
        if !(in_range(norm.low_percentile)
            && in_range(norm.high_percentile)
            && norm.low_percentile <= norm.high_percentile)
        {
            return Err(invalid(
                "normalization",
                format!(
                    "percentiles must be ordered within [0, 100], got {} and {}",
                    norm.low_percentile, norm.high_percentile
                ),
            ));
        }
        if norm.subsample_stride == 0 {
            return Err(invalid(
                "normalization.subsample_stride",
                "must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Size policy for `panels` panels sharing a container of `container` pixels.
    pub fn size_policy(&self, panels: usize, container: Option<DisplaySize>) -> SizePolicy {
        let panels = panels.max(1);
        match container {
            Some(container) if self.fit_to_window => SizePolicy::Fit {
                max_width: (container.width / panels as u32).saturating_sub(self.fit_margin),
                max_height: container.height.saturating_sub(self.fit_margin),
            },
            _ if panels > 1 => SizePolicy::FixedHeight(self.dual_panel_height),
            _ => SizePolicy::FixedHeight(self.single_panel_height),
        }
    }
}

fn invalid(field: &'static str, reason: String) -> ConfigError {
    ConfigError::Invalid { field, reason }
}
