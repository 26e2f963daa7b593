use serde::{Deserialize, Serialize};

use crate::model::CaseVolumes;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    /// Prediction panel next to the reference panel.
    Dual,
    #[default]
    Prediction,
    Reference,
    Diff,
    Edit,
}

/// What a single panel shows on top of the grayscale slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelContent {
    Prediction,
    Reference,
    Diff,
    Edit,
}

impl DisplayMode {
    pub const ALL: [Self; 5] = [
        Self::Dual,
        Self::Prediction,
        Self::Reference,
        Self::Diff,
        Self::Edit,
    ];

    pub fn panels(self) -> &'static [PanelContent] {
        match self {
            Self::Dual => &[PanelContent::Prediction, PanelContent::Reference],
            Self::Prediction => &[PanelContent::Prediction],
            Self::Reference => &[PanelContent::Reference],
            Self::Diff => &[PanelContent::Diff],
            Self::Edit => &[PanelContent::Edit],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Capabilities {
    pub can_show_reference: bool,
    pub can_show_diff: bool,
    pub can_edit: bool,
}

impl Capabilities {
    pub fn allows(&self, mode: DisplayMode) -> bool {
        match mode {
            DisplayMode::Dual | DisplayMode::Prediction => true,
            DisplayMode::Reference => self.can_show_reference,
            DisplayMode::Diff => self.can_show_diff,
            DisplayMode::Edit => self.can_edit,
        }
    }

    pub fn available_modes(&self) -> Vec<DisplayMode> {
        DisplayMode::ALL
            .into_iter()
            .filter(|mode| self.allows(*mode))
            .collect()
    }
}

/// Controls the presentation layer may enable for `case`.
pub fn capabilities(case: &CaseVolumes) -> Capabilities {
    let has_reference = case.reference().is_some();
    Capabilities {
        can_show_reference: has_reference,
        can_show_diff: has_reference && case.prediction().is_some(),
        can_edit: true,
    }
}
