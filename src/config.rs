//! Pipeline configuration.
//!
//! Every knob of the cleaning pipeline lives here so nothing about the sheet
//! layout is hardcoded: the sampling rule, the column table, the sentinel set
//! and the two error policies. Loaded from TOML; missing keys fall back to the
//! defaults of the reference training log.

use std::collections::BTreeSet;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::data::model::MetricLabel;
use crate::error::{PipelineError, Result};

/// How cells that fail to parse are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParseMode {
    /// A bad cell aborts the run.
    #[default]
    Strict,
    /// A bad cell is dropped like a sentinel.
    Lenient,
}

/// How two series of different length are paired for a correlation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlignmentPolicy {
    /// Skip the pair with a length-mismatch omission.
    #[default]
    Fail,
    /// Pair the first `min(len_a, len_b)` values.
    Truncate,
}

/// One entry of the column table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMapping {
    pub label: MetricLabel,
    /// 0-based column position within a row.
    pub index: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// 0-based index of the first sampled row.
    pub start_offset: usize,
    /// Take every `stride`-th row from `start_offset` on.
    pub stride: usize,
    /// Column table, one entry per label.
    pub columns: Vec<ColumnMapping>,
    /// Trimmed cell values meaning "no data".
    pub sentinels: Vec<String>,
    pub mode: ParseMode,
    pub alignment: AlignmentPolicy,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            start_offset: 9,
            stride: 8,
            columns: vec![
                ColumnMapping { label: MetricLabel::Distance, index: 8 },
                ColumnMapping { label: MetricLabel::HeartRate, index: 13 },
                ColumnMapping { label: MetricLabel::Rating, index: 14 },
                ColumnMapping { label: MetricLabel::Sleep, index: 15 },
            ],
            sentinels: vec!["0".to_string(), "#DIV/0!".to_string(), String::new()],
            mode: ParseMode::Strict,
            alignment: AlignmentPolicy::Fail,
        }
    }
}

impl PipelineConfig {
    /// Read a TOML config file. Keys left out keep their defaults.
    pub fn from_toml_file(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        let config: PipelineConfig = toml::from_str(&text)
            .with_context(|| format!("parsing config file {}", path.display()))?;
        Ok(config)
    }

    /// Check the invariants the pipeline relies on.
    pub fn validate(&self) -> Result<()> {
        if self.stride == 0 {
            return Err(PipelineError::Config("stride must be at least 1".into()));
        }

        let mut seen = BTreeSet::new();
        for mapping in &self.columns {
            if !seen.insert(mapping.label) {
                return Err(PipelineError::Config(format!(
                    "{} is mapped more than once",
                    mapping.label
                )));
            }
        }
        if let Some(missing) = MetricLabel::ALL.iter().find(|l| !seen.contains(*l)) {
            return Err(PipelineError::Config(format!("{missing} has no column")));
        }
        Ok(())
    }

    /// Column index for `label`, if mapped.
    pub fn column_for(&self, label: MetricLabel) -> Option<usize> {
        self.columns
            .iter()
            .find(|m| m.label == label)
            .map(|m| m.index)
    }

    /// Column indices in label order.
    pub fn ordered_columns(&self) -> Vec<(MetricLabel, usize)> {
        MetricLabel::ALL
            .iter()
            .filter_map(|&l| self.column_for(l).map(|i| (l, i)))
            .collect()
    }
}
