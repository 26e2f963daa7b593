use std::path::{Path, PathBuf};

use clap::Parser;
use serde_json::json;

use crate::config::{ViewerSettings, load_settings, save_settings};
use crate::formats::{NpyCodec, VolumeProvider, read_intensity_volume, read_label_volume, save_panel_png};
use crate::metrics::compare_labels;
use crate::session::Session;
use crate::slice::IntensityWindow;
use crate::viewport::SizePolicy;

use super::types::{Cli, Commands, RenderSummary, VolumeInfo};

pub fn run_cli() -> Result<(), String> {
    let cli = Cli::parse();
    let settings = match &cli.config {
        Some(path) => load_settings(path).map_err(|error| error.to_string())?,
        None => ViewerSettings::default(),
    };

    match cli.command {
        Commands::Info { input } => {
            let volume = read_intensity_volume(&input).map_err(|error| error.to_string())?;
            let window = IntensityWindow::from_volume(&volume, &settings.normalization);
            let (min, max) = volume.min_max().unzip();
            let info = VolumeInfo {
                shape: volume.shape(),
                spacing: volume.metadata.spacing,
                source: volume
                    .metadata
                    .source
                    .as_ref()
                    .map(|path| path.display().to_string()),
                min,
                max,
                window_low: window.low(),
                window_high: window.high(),
            };
            println!(
                "{}",
                serde_json::to_string_pretty(&info).map_err(|error| error.to_string())?
            );
        }
        Commands::Metrics {
            prediction,
            reference,
        } => {
            let prediction = read_label_volume(&prediction).map_err(|error| error.to_string())?;
            let reference = read_label_volume(&reference).map_err(|error| error.to_string())?;
            let report =
                compare_labels(&prediction, &reference).map_err(|error| error.to_string())?;
            log::info!("{}", report.status_line());
            println!(
                "{}",
                serde_json::to_string_pretty(&report).map_err(|error| error.to_string())?
            );
        }
        Commands::Render {
            image,
            prediction,
            reference,
            slice,
            mode,
            gamma,
            rotate,
            zoom,
            height,
            output,
        } => {
            let case = NpyCodec
                .load(&image, prediction.as_deref(), reference.as_deref())
                .map_err(|error| error.to_string())?;
            let mut session = Session::open(case, settings).map_err(|error| error.to_string())?;

            if let Some(index) = slice {
                if index >= session.case().depth() {
                    return Err(format!(
                        "slice {index} is out of range for depth {}",
                        session.case().depth()
                    ));
                }
                session.set_slice(index);
            }
            if !session.set_display_mode(mode.into()) {
                return Err(format!(
                    "mode {mode:?} needs volumes that were not provided"
                ));
            }
            if let Some(gamma) = gamma {
                if !session.set_gamma(gamma) {
                    return Err(format!("gamma must be positive, got {gamma}"));
                }
            }
            for _ in 0..rotate.rem_euclid(4) {
                session.rotate(true);
            }
            session.set_zoom(zoom);

            let panels = session.panels().len();
            let policy = match height {
                Some(height) => SizePolicy::FixedHeight(height),
                None => session.settings().size_policy(panels, None),
            };
            let mut summary = RenderSummary {
                slice: session.slice_index(),
                mode: session.mode(),
                written: Vec::new(),
                skipped: Vec::new(),
            };
            for panel in 0..panels {
                let rendered = session
                    .render_panel(panel, policy)
                    .map_err(|error| error.to_string())?;
                match rendered {
                    Some(rendered) => {
                        let path = panel_path(&output, panel);
                        save_panel_png(&rendered.image, &path)
                            .map_err(|error| error.to_string())?;
                        summary.written.push(path);
                    }
                    None => {
                        log::warn!("panel {panel} has no data to show; skipped");
                        summary.skipped.push(panel);
                    }
                }
            }
            println!(
                "{}",
                serde_json::to_string_pretty(&summary).map_err(|error| error.to_string())?
            );
        }
        Commands::ExportConfig { path } => {
            save_settings(&path, &settings).map_err(|error| error.to_string())?;
            println!("{}", json!({"status": "ok", "output": path}));
        }
    }

    Ok(())
}

/// `out.png` for the first panel, `out_right.png` for the second.
fn panel_path(output: &Path, panel: usize) -> PathBuf {
    if panel == 0 {
        return output.to_path_buf();
    }
    let stem = output
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "panel".to_string());
    let extension = output
        .extension()
        .map(|ext| ext.to_string_lossy().into_owned())
        .unwrap_or_else(|| "png".to_string());
    output.with_file_name(format!("{stem}_right.{extension}"))
}
