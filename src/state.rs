use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::color::MetricColors;
use crate::config::{ParseMode, PipelineConfig};
use crate::data::loader::load_grid;
use crate::data::model::{MetricLabel, RawRow};
use crate::pipeline::{self, PipelineOutput};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Pipeline settings; edits trigger a re-run.
    pub config: PipelineConfig,

    /// File the current grid came from.
    pub source_path: Option<PathBuf>,

    /// Raw grid as loaded (None until user loads a file).
    pub grid: Option<Vec<RawRow>>,

    /// Result of the last successful run.
    pub output: Option<PipelineOutput>,

    /// Metrics currently drawn on the plot.
    pub visible: BTreeSet<MetricLabel>,

    pub colors: MetricColors,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(PipelineConfig::default())
    }
}

impl AppState {
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            config,
            source_path: None,
            grid: None,
            output: None,
            visible: MetricLabel::ALL.into_iter().collect(),
            colors: MetricColors::default(),
            status_message: None,
        }
    }

    /// State for a grid that was already loaded and processed.
    pub fn with_output(
        config: PipelineConfig,
        source_path: PathBuf,
        grid: Vec<RawRow>,
        output: PipelineOutput,
    ) -> Self {
        Self {
            source_path: Some(source_path),
            grid: Some(grid),
            output: Some(output),
            ..Self::new(config)
        }
    }

    /// Load a grid from disk and run the pipeline over it.
    pub fn load_path(&mut self, path: &Path) {
        match load_grid(path) {
            Ok(grid) => {
                self.source_path = Some(path.to_path_buf());
                self.grid = Some(grid);
                self.output = None;
                self.rerun();
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Re-run the pipeline on the loaded grid with the current config.
    /// A failed run keeps the previous output of the same grid on screen.
    pub fn rerun(&mut self) {
        let Some(grid) = &self.grid else {
            return;
        };
        match pipeline::run(grid, &self.config) {
            Ok(output) => {
                self.output = Some(output);
                self.status_message = None;
            }
            Err(e) => {
                log::error!("Pipeline failed: {e}");
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    pub fn set_mode(&mut self, mode: ParseMode) {
        if self.config.mode != mode {
            self.config.mode = mode;
            self.rerun();
        }
    }

    /// Show or hide a metric (and its trend).
    pub fn toggle_metric(&mut self, label: MetricLabel) {
        if !self.visible.remove(&label) {
            self.visible.insert(label);
        }
    }

    pub fn is_visible(&self, label: MetricLabel) -> bool {
        self.visible.contains(&label)
    }
}
