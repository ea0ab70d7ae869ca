/// Data layer: core types, loading, and the cleaning stages.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Vec<RawRow>
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ sampler   │  start offset + stride → SampledRow
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ extract   │  column table → one cell per MetricLabel
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ normalize  │  sentinel / H:MM / number → Option<f64>
///   └───────────┘
///        │
///        ▼
///   ┌──────────────────┐
///   │ MetricSeriesStore │  append-only series per label
///   └──────────────────┘
/// ```

pub mod extract;
pub mod loader;
pub mod model;
pub mod normalize;
pub mod sampler;
