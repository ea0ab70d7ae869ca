use super::model::{MetricLabel, SampledRow};
use crate::error::{PipelineError, Result};

// ---------------------------------------------------------------------------
// Column extractor
// ---------------------------------------------------------------------------

/// One metric cell picked out of a sampled row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtractedCell<'a> {
    pub label: MetricLabel,
    pub column: usize,
    pub value: &'a str,
}

/// Project `row` onto the column table (`(label, index)` in label order).
///
/// A row shorter than the widest configured column is schema drift and
/// fails with [`PipelineError::MalformedRow`], naming the first label whose
/// column is missing.
pub fn extract_cells<'a>(
    row: &SampledRow<'a>,
    columns: &[(MetricLabel, usize)],
) -> Result<Vec<ExtractedCell<'a>>> {
    let needed = columns.iter().map(|&(_, i)| i + 1).max().unwrap_or(0);
    if row.cells.len() < needed {
        let (label, column) = columns
            .iter()
            .copied()
            .find(|&(_, i)| i >= row.cells.len())
            .unwrap_or((MetricLabel::Distance, needed - 1));
        return Err(PipelineError::MalformedRow {
            row: row.index,
            label,
            needed: column + 1,
            found: row.cells.len(),
        });
    }

    Ok(columns
        .iter()
        .map(|&(label, column)| ExtractedCell {
            label,
            column,
            value: row.cells[column].as_str(),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_columns() -> Vec<(MetricLabel, usize)> {
        vec![
            (MetricLabel::Distance, 8),
            (MetricLabel::HeartRate, 13),
            (MetricLabel::Rating, 14),
            (MetricLabel::Sleep, 15),
        ]
    }

    #[test]
    fn test_extracts_in_label_order() {
        let cells: Vec<String> = (0..16).map(|i| format!("c{i}")).collect();
        let row = SampledRow { index: 9, cells: &cells };

        let out = extract_cells(&row, &reference_columns()).unwrap();
        let values: Vec<&str> = out.iter().map(|c| c.value).collect();
        assert_eq!(values, vec!["c8", "c13", "c14", "c15"]);
        assert_eq!(out[1].label, MetricLabel::HeartRate);
        assert_eq!(out[1].column, 13);
    }

    #[test]
    fn test_short_row_is_malformed() {
        let cells: Vec<String> = (0..14).map(|i| i.to_string()).collect();
        let row = SampledRow { index: 17, cells: &cells };

        let err = extract_cells(&row, &reference_columns()).unwrap_err();
        assert_eq!(
            err,
            PipelineError::MalformedRow {
                row: 17,
                label: MetricLabel::Rating,
                needed: 15,
                found: 14,
            }
        );
        assert!(err.is_fatal());
    }

    #[test]
    fn test_extra_cells_are_ignored() {
        let cells: Vec<String> = (0..30).map(|i| i.to_string()).collect();
        let row = SampledRow { index: 0, cells: &cells };
        assert_eq!(extract_cells(&row, &reference_columns()).unwrap().len(), 4);
    }
}
