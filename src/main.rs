use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use eframe::egui;

use training_trends::app::TrainingTrendsApp;
use training_trends::config::{AlignmentPolicy, ParseMode, PipelineConfig};
use training_trends::data::loader::load_grid;
use training_trends::pipeline;
use training_trends::state::AppState;

/// Plot weekly training metrics with trend lines and report how they correlate
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Training log grid (.csv, .json or .parquet)
    input: Option<PathBuf>,

    /// TOML file with pipeline settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Index of the first sampled row (overrides config)
    #[arg(long)]
    start_offset: Option<usize>,

    /// Take every Nth row (overrides config)
    #[arg(long)]
    stride: Option<usize>,

    /// Drop unparseable cells instead of aborting
    #[arg(long)]
    lenient: bool,

    /// Correlate series of different length over their common prefix
    #[arg(long)]
    truncate: bool,

    /// Write the figure description as JSON
    #[arg(long)]
    figure_out: Option<PathBuf>,

    /// Print the report and exit without opening a window
    #[arg(long)]
    no_gui: bool,
}

impl Args {
    fn pipeline_config(&self) -> Result<PipelineConfig> {
        let mut config = match &self.config {
            Some(path) => PipelineConfig::from_toml_file(path)?,
            None => PipelineConfig::default(),
        };
        if let Some(start_offset) = self.start_offset {
            config.start_offset = start_offset;
        }
        if let Some(stride) = self.stride {
            config.stride = stride;
        }
        if self.lenient {
            config.mode = ParseMode::Lenient;
        }
        if self.truncate {
            config.alignment = AlignmentPolicy::Truncate;
        }
        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = args.pipeline_config()?;

    let state = match &args.input {
        Some(path) => {
            let grid = load_grid(path)?;
            let output = pipeline::run(&grid, &config)
                .with_context(|| format!("processing {}", path.display()))?;

            print!("{}", output.correlations);

            if let Some(out_path) = &args.figure_out {
                output.figure.write_json(out_path)?;
                log::info!("Wrote figure to {}", out_path.display());
            }

            AppState::with_output(config, path.clone(), grid, output)
        }
        None if args.no_gui => bail!("--no-gui needs an input file"),
        None => AppState::new(config),
    };

    if args.no_gui {
        return Ok(());
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Training Trends",
        options,
        Box::new(move |cc| {
            cc.egui_ctx.set_visuals(egui::Visuals::light());
            Ok(Box::new(TrainingTrendsApp::new(state)))
        }),
    )
    .map_err(|e| anyhow::anyhow!("viewer failed: {e}"))
}
