//! Degree-1 least-squares trend over a metric series.

use serde::Serialize;

use crate::data::model::MetricLabel;
use crate::error::{PipelineError, Result};

/// A fitted line `y = slope * x + intercept` with x = sample index,
/// evaluated at every index of the source series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendLine {
    pub label: MetricLabel,
    pub slope: f64,
    pub intercept: f64,
    /// Fitted values, same length as the series.
    pub values: Vec<f64>,
}

/// Fit a trend to `series` against x = 0..len.
///
/// Fewer than two points yields [`PipelineError::InsufficientData`].
pub fn fit_trend(label: MetricLabel, series: &[f64]) -> Result<TrendLine> {
    if series.len() < 2 {
        return Err(PipelineError::InsufficientData {
            label,
            needed: 2,
            found: series.len(),
        });
    }

    let n = series.len() as f64;
    let sum_x: f64 = (0..series.len()).map(|x| x as f64).sum();
    let sum_y: f64 = series.iter().sum();
    let sum_xy: f64 = series.iter().enumerate().map(|(x, y)| x as f64 * y).sum();
    let sum_xx: f64 = (0..series.len()).map(|x| (x as f64).powi(2)).sum();

    // x values are distinct integers, so the denominator is positive for n >= 2.
    let denom = n * sum_xx - sum_x * sum_x;
    let slope = (n * sum_xy - sum_x * sum_y) / denom;
    let intercept = (sum_y - slope * sum_x) / n;

    let values = (0..series.len())
        .map(|x| slope * x as f64 + intercept)
        .collect();

    Ok(TrendLine {
        label,
        slope,
        intercept,
        values,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_perfect_line_is_recovered() {
        let series = [1.0, 3.0, 5.0, 7.0];
        let trend = fit_trend(MetricLabel::Distance, &series).unwrap();
        assert!(approx(trend.slope, 2.0));
        assert!(approx(trend.intercept, 1.0));
        for (fit, y) in trend.values.iter().zip(series) {
            assert!(approx(*fit, y));
        }
    }

    #[test]
    fn test_noisy_fit() {
        // numpy.polyfit([0,1,2,3,4], [2,4,5,4,5], 1) -> [0.6, 2.8]
        let trend = fit_trend(MetricLabel::Rating, &[2.0, 4.0, 5.0, 4.0, 5.0]).unwrap();
        assert!(approx(trend.slope, 0.6));
        assert!(approx(trend.intercept, 2.8));
        assert_eq!(trend.values.len(), 5);
        assert!(approx(trend.values[4], 5.2));
    }

    #[test]
    fn test_constant_series_gives_flat_line() {
        let trend = fit_trend(MetricLabel::Sleep, &[7.0, 7.0, 7.0]).unwrap();
        assert!(approx(trend.slope, 0.0));
        assert!(trend.values.iter().all(|v| approx(*v, 7.0)));
    }

    #[test]
    fn test_short_series_is_insufficient() {
        for series in [&[][..], &[4.0][..]] {
            let err = fit_trend(MetricLabel::HeartRate, series).unwrap_err();
            assert_eq!(
                err,
                PipelineError::InsufficientData {
                    label: MetricLabel::HeartRate,
                    needed: 2,
                    found: series.len(),
                }
            );
            assert!(!err.is_fatal());
        }
    }
}
