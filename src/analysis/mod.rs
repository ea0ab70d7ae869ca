//! Statistics over the cleaned series: per-metric trend lines and pairwise
//! correlations.

pub mod correlation;
pub mod trend;
