use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// MetricLabel – the fixed set of tracked metrics
// ---------------------------------------------------------------------------

/// One of the four metrics recorded per training session.
///
/// The declaration order is the label order used everywhere: column table,
/// series store iteration, plot traces and correlation pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricLabel {
    Distance,
    HeartRate,
    Rating,
    Sleep,
}

impl MetricLabel {
    /// All labels in label order.
    pub const ALL: [MetricLabel; 4] = [
        MetricLabel::Distance,
        MetricLabel::HeartRate,
        MetricLabel::Rating,
        MetricLabel::Sleep,
    ];

    /// Human-readable name, as the training log spells it.
    pub fn display_name(self) -> &'static str {
        match self {
            MetricLabel::Distance => "Distance",
            MetricLabel::HeartRate => "Heart Rate",
            MetricLabel::Rating => "Rating",
            MetricLabel::Sleep => "Sleep",
        }
    }

    /// Every unordered pair of distinct labels, in label order.
    pub fn pairs() -> Vec<(MetricLabel, MetricLabel)> {
        let mut out = Vec::with_capacity(6);
        for (i, &a) in Self::ALL.iter().enumerate() {
            for &b in &Self::ALL[i + 1..] {
                out.push((a, b));
            }
        }
        out
    }
}

impl fmt::Display for MetricLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

// ---------------------------------------------------------------------------
// Rows
// ---------------------------------------------------------------------------

/// One spreadsheet row: ordered string cells, exactly as fetched.
pub type RawRow = Vec<String>;

/// A row picked by the sampler, borrowed from the grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampledRow<'a> {
    /// 0-based position of the row in the full grid.
    pub index: usize,
    pub cells: &'a [String],
}

// ---------------------------------------------------------------------------
// MetricSeriesStore – one ordered sequence per label
// ---------------------------------------------------------------------------

/// Append-only per-metric sequences of normalized values.
///
/// Invalid cells are never appended, so series lengths may differ between
/// labels. Order within a series follows row order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricSeriesStore {
    series: BTreeMap<MetricLabel, Vec<f64>>,
}

impl Default for MetricSeriesStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricSeriesStore {
    /// A store with an empty series for every label.
    pub fn new() -> Self {
        Self {
            series: MetricLabel::ALL.iter().map(|&l| (l, Vec::new())).collect(),
        }
    }

    /// Push a value to the end of `label`'s series. Values must be finite.
    pub fn append(&mut self, label: MetricLabel, value: f64) {
        debug_assert!(value.is_finite(), "non-finite value for {label}");
        self.series.entry(label).or_default().push(value);
    }

    /// The series for `label`.
    pub fn series(&self, label: MetricLabel) -> &[f64] {
        self.series.get(&label).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of values held for `label`.
    pub fn len(&self, label: MetricLabel) -> usize {
        self.series(label).len()
    }

    /// Whether every series is empty.
    pub fn is_empty(&self) -> bool {
        self.series.values().all(Vec::is_empty)
    }

    /// `(label, series)` in label order.
    pub fn iter(&self) -> impl Iterator<Item = (MetricLabel, &[f64])> {
        self.series.iter().map(|(&l, v)| (l, v.as_slice()))
    }
}
