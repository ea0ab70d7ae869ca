use std::path::Path;

use anyhow::{Context, Result, bail};
use arrow::util::display::{ArrayFormatter, FormatOptions};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::RawRow;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a training-log grid exported from the spreadsheet.  Dispatch by
/// extension.
///
/// Supported formats:
/// * `.csv`     – plain export, no header handling, rows may be ragged
/// * `.json`    – `[["cell", "cell", ...], ...]`
/// * `.parquet` – any schema; every column is rendered to text
///
/// Row 0 of the result is the first row of the file; nothing is skipped.
pub fn load_grid(path: &Path) -> Result<Vec<RawRow>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let grid = match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
    .with_context(|| format!("loading {}", path.display()))?;

    log::info!("Loaded {} rows from {}", grid.len(), path.display());
    Ok(grid)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Sheet exports carry title and summary rows of varying width, so the
/// reader is flexible and treats the first line as data.
fn load_csv(path: &Path) -> Result<Vec<RawRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .context("opening CSV")?;

    let mut grid = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        grid.push(record.iter().map(str::to_string).collect());
    }
    Ok(grid)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON shape (what the Sheets API `values` field returns):
///
/// ```json
/// [
///   ["Week 1", "", "..."],
///   ["Mon", "5.2", "1:30", ...],
///   ...
/// ]
/// ```
///
/// Numbers keep their JSON spelling, `null` becomes an empty cell.
fn load_json(path: &Path) -> Result<Vec<RawRow>> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let rows = root
        .as_array()
        .context("Expected top-level JSON array")?;

    let mut grid = Vec::with_capacity(rows.len());
    for (i, row) in rows.iter().enumerate() {
        let cells = row
            .as_array()
            .with_context(|| format!("Row {i} is not a JSON array"))?;
        grid.push(cells.iter().map(json_to_cell).collect());
    }
    Ok(grid)
}

fn json_to_cell(val: &JsonValue) -> String {
    match val {
        JsonValue::String(s) => s.clone(),
        JsonValue::Null => String::new(),
        other => other.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file as a string grid. Column types are irrelevant: each
/// value is rendered with Arrow's display formatting, nulls as empty cells.
fn load_parquet(path: &Path) -> Result<Vec<RawRow>> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let options = FormatOptions::default().with_null("");
    let mut grid = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;

        let formatters = batch
            .columns()
            .iter()
            .map(|col| ArrayFormatter::try_new(col.as_ref(), &options))
            .collect::<Result<Vec<_>, _>>()
            .context("preparing column formatters")?;

        for row in 0..batch.num_rows() {
            grid.push(
                formatters
                    .iter()
                    .map(|f| f.value(row).to_string())
                    .collect(),
            );
        }
    }

    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_cells() {
        let v: JsonValue = serde_json::json!(["1:30", 7.5, 10, null, true]);
        let cells: Vec<String> = v.as_array().unwrap().iter().map(json_to_cell).collect();
        assert_eq!(cells, vec!["1:30", "7.5", "10", "", "true"]);
    }

    #[test]
    fn test_unsupported_extension() {
        let err = load_grid(Path::new("training.xlsx")).unwrap_err();
        assert!(err.to_string().contains(".xlsx"));
    }
}
