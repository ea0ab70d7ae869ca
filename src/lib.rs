//! Training log trends.
//!
//! Cleans a spreadsheet-style training log into one series per metric
//! (distance, heart rate, rating, sleep), fits a linear trend to each and
//! correlates every pair. [`pipeline::run`] is the entry point; the `app`,
//! `state` and `ui` modules draw its output.

pub mod analysis;
pub mod app;
pub mod color;
pub mod config;
pub mod data;
pub mod error;
pub mod figure;
pub mod pipeline;
pub mod state;
pub mod ui;

pub use config::PipelineConfig;
pub use data::model::{MetricLabel, MetricSeriesStore, RawRow};
pub use error::{PipelineError, Result};
pub use pipeline::{run, PipelineOutput};
