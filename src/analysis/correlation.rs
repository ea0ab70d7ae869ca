//! Pairwise Pearson correlation between metric series, plus the text report.

use std::fmt;

use crate::config::AlignmentPolicy;
use crate::data::model::{MetricLabel, MetricSeriesStore};
use crate::error::{PipelineError, Result};

/// Outcome for one unordered pair of labels.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationPair {
    pub a: MetricLabel,
    pub b: MetricLabel,
    /// Coefficient in [-1, 1], or why it could not be computed.
    pub coefficient: Result<f64>,
}

impl fmt::Display for CorrelationPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.coefficient {
            Ok(r) => write!(f, "Correlation between {} and {}: {r:.2}", self.a, self.b),
            Err(e) => write!(f, "Correlation between {} and {}: n/a ({e})", self.a, self.b),
        }
    }
}

/// All six pairs in label order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CorrelationReport {
    pub pairs: Vec<CorrelationPair>,
}

impl CorrelationReport {
    /// Pairs that could not be computed.
    pub fn omissions(&self) -> impl Iterator<Item = &CorrelationPair> {
        self.pairs.iter().filter(|p| p.coefficient.is_err())
    }
}

impl fmt::Display for CorrelationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Correlation Coefficients:")?;
        for pair in &self.pairs {
            writeln!(f, "{pair}")?;
        }
        Ok(())
    }
}

/// Correlate every unordered pair of labels in `store`.
pub fn correlate_all(store: &MetricSeriesStore, policy: AlignmentPolicy) -> CorrelationReport {
    let pairs = MetricLabel::pairs()
        .into_iter()
        .map(|(a, b)| {
            let coefficient = correlate(a, store.series(a), b, store.series(b), policy);
            if let Err(e) = &coefficient {
                log::warn!("Skipping correlation {a} / {b}: {e}");
            }
            CorrelationPair { a, b, coefficient }
        })
        .collect();
    CorrelationReport { pairs }
}

/// Pearson correlation of two series under an alignment policy.
pub fn correlate(
    label_a: MetricLabel,
    a: &[f64],
    label_b: MetricLabel,
    b: &[f64],
    policy: AlignmentPolicy,
) -> Result<f64> {
    for (label, series) in [(label_a, a), (label_b, b)] {
        if series.is_empty() {
            return Err(PipelineError::InsufficientData {
                label,
                needed: 1,
                found: 0,
            });
        }
    }

    let n = if a.len() == b.len() {
        a.len()
    } else {
        match policy {
            AlignmentPolicy::Fail => {
                return Err(PipelineError::LengthMismatch {
                    a: label_a,
                    b: label_b,
                    len_a: a.len(),
                    len_b: b.len(),
                });
            }
            AlignmentPolicy::Truncate => {
                let n = a.len().min(b.len());
                log::info!(
                    "Truncating {label_a} ({}) and {label_b} ({}) to {n} values",
                    a.len(),
                    b.len()
                );
                n
            }
        }
    };

    pearson(label_a, &a[..n], label_b, &b[..n])
}

fn pearson(label_a: MetricLabel, a: &[f64], label_b: MetricLabel, b: &[f64]) -> Result<f64> {
    if is_constant(a) {
        return Err(PipelineError::ZeroVariance { label: label_a });
    }
    if is_constant(b) {
        return Err(PipelineError::ZeroVariance { label: label_b });
    }

    let n = a.len() as f64;
    let mean_a = a.iter().sum::<f64>() / n;
    let mean_b = b.iter().sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_a = 0.0;
    let mut var_b = 0.0;
    for (&x, &y) in a.iter().zip(b) {
        let dx = x - mean_a;
        let dy = y - mean_b;
        cov += dx * dy;
        var_a += dx * dx;
        var_b += dy * dy;
    }

    let r = cov / (var_a.sqrt() * var_b.sqrt());
    if !r.is_finite() {
        return Err(PipelineError::NotFinite {
            a: label_a,
            b: label_b,
        });
    }
    Ok(r.clamp(-1.0, 1.0))
}

fn is_constant(series: &[f64]) -> bool {
    series.windows(2).all(|w| w[0] == w[1])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::MetricLabel::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_perfect_positive_and_negative() {
        let x = [1.0, 2.0, 3.0, 4.0];
        let up = [2.0, 4.0, 6.0, 8.0];
        let down = [8.0, 6.0, 4.0, 2.0];
        let policy = AlignmentPolicy::Fail;
        assert!(approx(correlate(Distance, &x, Rating, &up, policy).unwrap(), 1.0));
        assert!(approx(correlate(Distance, &x, Rating, &down, policy).unwrap(), -1.0));
    }

    #[test]
    fn test_known_value() {
        // numpy.corrcoef([1,2,3,4,5], [2,4,5,4,5])[0,1] = 0.7745966692414834
        let r = correlate(
            Distance,
            &[1.0, 2.0, 3.0, 4.0, 5.0],
            Sleep,
            &[2.0, 4.0, 5.0, 4.0, 5.0],
            AlignmentPolicy::Fail,
        )
        .unwrap();
        assert!((r - 0.774_596_669_241_483_4).abs() < 1e-12);
    }

    #[test]
    fn test_symmetry_and_self() {
        let a = [5.0, 3.2, 8.1, 7.7, 1.0];
        let b = [140.0, 151.0, 139.0, 160.0, 149.0];
        let ab = correlate(Distance, &a, HeartRate, &b, AlignmentPolicy::Fail).unwrap();
        let ba = correlate(HeartRate, &b, Distance, &a, AlignmentPolicy::Fail).unwrap();
        assert_eq!(ab, ba);
        assert!((-1.0..=1.0).contains(&ab));

        let aa = correlate(Distance, &a, Distance, &a, AlignmentPolicy::Fail).unwrap();
        assert!(approx(aa, 1.0));
    }

    #[test]
    fn test_length_mismatch_policies() {
        let a = [1.0, 2.0, 3.0, 4.0];
        let b = [2.0, 4.0, 6.0];

        let err = correlate(Distance, &a, HeartRate, &b, AlignmentPolicy::Fail).unwrap_err();
        assert_eq!(
            err,
            PipelineError::LengthMismatch {
                a: Distance,
                b: HeartRate,
                len_a: 4,
                len_b: 3,
            }
        );

        let r = correlate(Distance, &a, HeartRate, &b, AlignmentPolicy::Truncate).unwrap();
        assert!(approx(r, 1.0));
    }

    #[test]
    fn test_empty_and_constant_series() {
        let err = correlate(Distance, &[], Rating, &[1.0], AlignmentPolicy::Truncate).unwrap_err();
        assert!(matches!(err, PipelineError::InsufficientData { label: Distance, .. }));

        let err = correlate(Distance, &[1.0, 2.0], Rating, &[3.0, 3.0], AlignmentPolicy::Fail)
            .unwrap_err();
        assert_eq!(err, PipelineError::ZeroVariance { label: Rating });

        // A single point has no spread either.
        let err = correlate(Distance, &[1.0], Rating, &[3.0], AlignmentPolicy::Fail).unwrap_err();
        assert_eq!(err, PipelineError::ZeroVariance { label: Distance });
    }

    #[test]
    fn test_report_lines() {
        let mut store = MetricSeriesStore::new();
        for (i, v) in [1.0, 2.0, 3.0].into_iter().enumerate() {
            store.append(Distance, v);
            store.append(HeartRate, v * 2.0);
            store.append(Rating, 10.0 - v);
            store.append(Sleep, 7.0 + (i % 2) as f64);
        }
        store.append(Sleep, 9.0);

        let report = correlate_all(&store, AlignmentPolicy::Fail);
        assert_eq!(report.pairs.len(), 6);

        let text = report.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Correlation Coefficients:");
        assert_eq!(lines[1], "Correlation between Distance and Heart Rate: 1.00");
        assert_eq!(lines[2], "Correlation between Distance and Rating: -1.00");
        assert_eq!(
            lines[3],
            "Correlation between Distance and Sleep: n/a (Distance has 3 values but Sleep has 4)"
        );
        assert_eq!(report.omissions().count(), 3);
    }

    #[test]
    fn test_overflowing_series_is_omitted() {
        let a = [1e308, -1e308, 1e308];
        let b = [1e308, 1e308, -1e308];
        let err = correlate(Distance, &a, Sleep, &b, AlignmentPolicy::Fail).unwrap_err();
        assert_eq!(err, PipelineError::NotFinite { a: Distance, b: Sleep });
        assert!(!err.is_fatal());

        let mut store = MetricSeriesStore::new();
        for (x, y) in a.into_iter().zip(b) {
            store.append(Distance, x);
            store.append(Sleep, y);
        }
        let text = correlate_all(&store, AlignmentPolicy::Fail).to_string();
        assert!(!text.contains("NaN"), "{text}");
    }
}
