use crate::analysis::correlation::{correlate_all, CorrelationReport};
use crate::analysis::trend::{fit_trend, TrendLine};
use crate::config::{ParseMode, PipelineConfig};
use crate::data::extract::extract_cells;
use crate::data::model::{MetricLabel, MetricSeriesStore, RawRow};
use crate::data::normalize::normalize_cell;
use crate::data::sampler::sample_rows;
use crate::error::{PipelineError, Result};
use crate::figure::Figure;

// ---------------------------------------------------------------------------
// Pipeline: grid → sampled rows → cells → values → series → outputs
// ---------------------------------------------------------------------------

/// Everything one run produces.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOutput {
    /// Number of rows the sampler picked.
    pub sampled_rows: usize,
    pub series: MetricSeriesStore,
    /// Trends for every metric with at least two values, in label order.
    pub trends: Vec<TrendLine>,
    /// Metrics whose trend was skipped, with the reason.
    pub trend_omissions: Vec<PipelineError>,
    pub correlations: CorrelationReport,
    pub figure: Figure,
}

impl PipelineOutput {
    pub fn trend(&self, label: MetricLabel) -> Option<&TrendLine> {
        self.trends.iter().find(|t| t.label == label)
    }
}

/// Run the whole pipeline over a fetched grid.
///
/// Fails on invalid configuration, on a sampled row too short for the column
/// table, and (in strict mode) on any unparseable cell. Trend and correlation
/// problems are reported in the output instead.
pub fn run(grid: &[RawRow], config: &PipelineConfig) -> Result<PipelineOutput> {
    config.validate()?;

    let (series, sampled_rows) = build_series(grid, config)?;

    let mut trends = Vec::new();
    let mut trend_omissions = Vec::new();
    for label in MetricLabel::ALL {
        match fit_trend(label, series.series(label)) {
            Ok(trend) => trends.push(trend),
            Err(e) => {
                log::warn!("Skipping trend: {e}");
                trend_omissions.push(e);
            }
        }
    }

    let correlations = correlate_all(&series, config.alignment);
    let figure = Figure::build(&series, &trends);

    log::info!(
        "Pipeline done: {} rows in grid, {sampled_rows} sampled, series lengths {:?}",
        grid.len(),
        series.iter().map(|(l, s)| (l, s.len())).collect::<Vec<_>>()
    );

    Ok(PipelineOutput {
        sampled_rows,
        series,
        trends,
        trend_omissions,
        correlations,
        figure,
    })
}

/// Sample, extract and normalize `grid` into per-metric series.
/// Returns the store and the number of sampled rows.
pub fn build_series(grid: &[RawRow], config: &PipelineConfig) -> Result<(MetricSeriesStore, usize)> {
    let columns = config.ordered_columns();
    let sampled = sample_rows(grid, config.start_offset, config.stride);
    let mut store = MetricSeriesStore::new();

    for row in &sampled {
        for cell in extract_cells(row, &columns)? {
            match normalize_cell(cell.value, &config.sentinels) {
                Ok(Some(value)) => store.append(cell.label, value),
                Ok(None) => {
                    log::debug!("row {}: {} is empty ({:?})", row.index, cell.label, cell.value);
                }
                Err(reason) => {
                    let err = PipelineError::Format {
                        row: row.index,
                        column: cell.column,
                        label: cell.label,
                        value: cell.value.to_string(),
                        reason,
                    };
                    match config.mode {
                        ParseMode::Strict => return Err(err),
                        ParseMode::Lenient => log::debug!("Dropping cell: {err}"),
                    }
                }
            }
        }
    }

    Ok((store, sampled.len()))
}
