use super::model::{RawRow, SampledRow};

// ---------------------------------------------------------------------------
// Row sampler: start offset + fixed stride
// ---------------------------------------------------------------------------

/// Pick rows `start_offset, start_offset + stride, ...` up to the end of the
/// grid. A grid shorter than `start_offset` yields nothing.
///
/// `stride` must be at least 1; [`crate::config::PipelineConfig::validate`]
/// guarantees this before the pipeline gets here.
pub fn sample_rows(rows: &[RawRow], start_offset: usize, stride: usize) -> Vec<SampledRow<'_>> {
    debug_assert!(stride >= 1);
    rows.iter()
        .enumerate()
        .skip(start_offset)
        .step_by(stride.max(1))
        .map(|(index, row)| SampledRow {
            index,
            cells: row.as_slice(),
        })
        .collect()
}
