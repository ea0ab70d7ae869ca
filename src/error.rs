use thiserror::Error;

use crate::data::model::MetricLabel;

/// Result alias for pipeline operations.
pub type Result<T> = std::result::Result<T, PipelineError>;

// ---------------------------------------------------------------------------
// Pipeline errors
// ---------------------------------------------------------------------------

/// Everything that can go wrong between the raw grid and the outputs.
///
/// `MalformedRow`, `Format` and `Config` abort a run. The remaining variants
/// are per-metric (or per-pair) omissions: the pipeline records them and
/// carries on.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PipelineError {
    /// A sampled row is too short for the configured column table.
    #[error("row {row}: expected at least {needed} cells for {label}, found {found}")]
    MalformedRow {
        row: usize,
        label: MetricLabel,
        needed: usize,
        found: usize,
    },

    /// A cell is neither a sentinel, an `H:MM` duration nor a number.
    #[error("row {row}, column {column} ({label}): cannot parse {value:?}: {reason}")]
    Format {
        row: usize,
        column: usize,
        label: MetricLabel,
        value: String,
        reason: ValueError,
    },

    /// Too few points for a trend line or a correlation.
    #[error("{label}: need at least {needed} values, have {found}")]
    InsufficientData {
        label: MetricLabel,
        needed: usize,
        found: usize,
    },

    /// Two series paired for a correlation differ in length.
    #[error("{a} has {len_a} values but {b} has {len_b}")]
    LengthMismatch {
        a: MetricLabel,
        b: MetricLabel,
        len_a: usize,
        len_b: usize,
    },

    /// A series is constant, so its correlation is undefined.
    #[error("{label} is constant, correlation undefined")]
    ZeroVariance { label: MetricLabel },

    /// Two finite series whose coefficient overflowed `f64`.
    #[error("{a} / {b}: values too large to correlate")]
    NotFinite { a: MetricLabel, b: MetricLabel },

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl PipelineError {
    /// Whether the error must abort the whole run.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            PipelineError::MalformedRow { .. }
                | PipelineError::Format { .. }
                | PipelineError::Config(_)
        )
    }
}

// ---------------------------------------------------------------------------
// Cell-level parse errors
// ---------------------------------------------------------------------------

/// Why a single cell failed to normalize. Carries no position; the pipeline
/// attaches row/column/label when lifting it into [`PipelineError::Format`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValueError {
    #[error("hours {0:?} are not all digits")]
    InvalidHours(String),

    #[error("minutes {0:?} are not two digits")]
    InvalidMinutes(String),

    #[error("not a number")]
    NotANumber,

    #[error("number is not finite")]
    NotFinite,
}
