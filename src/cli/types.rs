use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;

use crate::session::DisplayMode;

#[derive(Debug, Parser)]
#[command(
    name = "segview",
    version,
    about = "Inspect, compare and render slices of 3D segmentation volumes"
)]
pub(super) struct Cli {
    /// Viewer settings file (YAML or JSON).
    #[arg(long, global = true)]
    pub(super) config: Option<PathBuf>,

    #[command(subcommand)]
    pub(super) command: Commands,
}

#[derive(Debug, Subcommand)]
pub(super) enum Commands {
    /// Shape, value range and display window of an image volume.
    Info { input: PathBuf },
    /// Per-label Dice and IoU between two label volumes.
    Metrics {
        #[arg(long)]
        prediction: PathBuf,
        #[arg(long)]
        reference: PathBuf,
    },
    /// Render the panels of one slice to PNG. A second panel is written with a `_right`
    /// suffix.
    Render {
        #[arg(long)]
        image: PathBuf,
        #[arg(long)]
        prediction: Option<PathBuf>,
        #[arg(long)]
        reference: Option<PathBuf>,
        /// Defaults to the middle slice.
        #[arg(long)]
        slice: Option<usize>,
        #[arg(long, value_enum, default_value_t = ModeArg::Prediction)]
        mode: ModeArg,
        #[arg(long)]
        gamma: Option<f32>,
        /// Clockwise quarter turns.
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        rotate: i32,
        #[arg(long, default_value_t = 1.0)]
        zoom: f32,
        /// Panel height in pixels; defaults to the configured panel height.
        #[arg(long)]
        height: Option<u32>,
        #[arg(long)]
        output: PathBuf,
    },
    /// Write the effective settings to a YAML or JSON file.
    ExportConfig { path: PathBuf },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(super) enum ModeArg {
    Dual,
    Prediction,
    Reference,
    Diff,
    Edit,
}

impl From<ModeArg> for DisplayMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Dual => Self::Dual,
            ModeArg::Prediction => Self::Prediction,
            ModeArg::Reference => Self::Reference,
            ModeArg::Diff => Self::Diff,
            ModeArg::Edit => Self::Edit,
        }
    }
}

#[derive(Debug, Serialize)]
pub(super) struct VolumeInfo {
    pub(super) shape: [usize; 3],
    pub(super) spacing: [f32; 3],
    pub(super) source: Option<String>,
    pub(super) min: Option<f32>,
    pub(super) max: Option<f32>,
    pub(super) window_low: f32,
    pub(super) window_high: f32,
}

#[derive(Debug, Serialize)]
pub(super) struct RenderSummary {
    pub(super) slice: usize,
    pub(super) mode: DisplayMode,
    pub(super) written: Vec<PathBuf>,
    pub(super) skipped: Vec<usize>,
}
