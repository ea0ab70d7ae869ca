//! Renderer-independent description of the training chart.
//!
//! The pipeline returns a [`Figure`]; the viewer draws it with `egui_plot`,
//! and `--figure-out` dumps it as JSON for other tools.

use std::path::Path;

use anyhow::Context;
use serde::Serialize;

use crate::analysis::trend::TrendLine;
use crate::data::model::{MetricLabel, MetricSeriesStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceKind {
    /// Raw metric values: line with point markers.
    LinesMarkers,
    /// Fitted trend: dashed line, no markers.
    DashedLine,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    Light,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LegendPosition {
    TopLeft,
}

/// One plotted series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trace {
    pub name: String,
    pub label: MetricLabel,
    pub kind: TraceKind,
    /// `[week index, value]`.
    pub points: Vec<[f64; 2]>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Figure {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub theme: Theme,
    pub legend: LegendPosition,
    /// Metric traces in label order, then trend traces in label order.
    pub traces: Vec<Trace>,
}

impl Figure {
    /// Build the chart from the cleaned series and whichever trends could be
    /// fitted. Metrics share one y axis; values are not rescaled.
    pub fn build(store: &MetricSeriesStore, trends: &[TrendLine]) -> Self {
        let mut traces: Vec<Trace> = store
            .iter()
            .map(|(label, series)| Trace {
                name: label.display_name().to_string(),
                label,
                kind: TraceKind::LinesMarkers,
                points: indexed(series),
            })
            .collect();

        for label in MetricLabel::ALL {
            if let Some(trend) = trends.iter().find(|t| t.label == label) {
                traces.push(Trace {
                    name: format!("{label} Trend"),
                    label,
                    kind: TraceKind::DashedLine,
                    points: indexed(&trend.values),
                });
            }
        }

        Figure {
            title: "Training Data Over Time".to_string(),
            x_label: "Weeks".to_string(),
            y_label: "Values".to_string(),
            theme: Theme::Light,
            legend: LegendPosition::TopLeft,
            traces,
        }
    }

    /// Traces belonging to `label` (data first, then trend).
    pub fn traces_for(&self, label: MetricLabel) -> impl Iterator<Item = &Trace> {
        self.traces.iter().filter(move |t| t.label == label)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn write_json(&self, path: &Path) -> anyhow::Result<()> {
        let json = self.to_json().context("serializing figure")?;
        std::fs::write(path, json)
            .with_context(|| format!("writing figure to {}", path.display()))
    }
}

fn indexed(values: &[f64]) -> Vec<[f64; 2]> {
    values
        .iter()
        .enumerate()
        .map(|(i, &v)| [i as f64, v])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::trend::fit_trend;

    fn store() -> MetricSeriesStore {
        let mut store = MetricSeriesStore::new();
        for v in [1.0, 2.0, 4.0] {
            store.append(MetricLabel::Distance, v);
        }
        store.append(MetricLabel::Sleep, 8.0);
        store
    }

    #[test]
    fn test_trace_order_and_names() {
        let store = store();
        let trends = vec![fit_trend(MetricLabel::Distance, store.series(MetricLabel::Distance)).unwrap()];
        let fig = Figure::build(&store, &trends);

        let names: Vec<&str> = fig.traces.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Distance", "Heart Rate", "Rating", "Sleep", "Distance Trend"]
        );
        assert_eq!(fig.traces[4].kind, TraceKind::DashedLine);
        assert_eq!(fig.traces[0].points, vec![[0.0, 1.0], [1.0, 2.0], [2.0, 4.0]]);
        assert_eq!(fig.traces_for(MetricLabel::Distance).count(), 2);
        assert_eq!(fig.traces_for(MetricLabel::Sleep).count(), 1);
    }

    #[test]
    fn test_json_layout() {
        let fig = Figure::build(&store(), &[]);
        let json: serde_json::Value = serde_json::from_str(&fig.to_json().unwrap()).unwrap();
        assert_eq!(json["title"], "Training Data Over Time");
        assert_eq!(json["theme"], "light");
        assert_eq!(json["legend"], "top_left");
        assert_eq!(json["traces"][0]["kind"], "lines_markers");
        assert_eq!(json["traces"][1]["label"], "heart_rate");
    }
}
