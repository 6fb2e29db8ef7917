//! CSV loading with per-column type inference.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use ::csv::{ReaderBuilder, StringRecord, Trim};
use tracing::debug;

use crate::dataset::{Column, ColumnValues, Dataset};
use crate::error::{DriftError, Result};

/// Load a CSV file with a header row into a [`Dataset`].
///
/// Column types are inferred from the data, trying in order:
/// integer, float, boolean, text. Blank cells are missing values; an
/// integer column with blanks is read as float with `NaN` in the gaps.
pub fn read_csv(path: impl AsRef<Path>) -> Result<Dataset> {
    let path = path.as_ref();
    let file = File::open(path)
        .map_err(|e| DriftError::io(format!("Failed to open {}", path.display()), e))?;
    let dataset = parse_csv(file, path)?;
    debug!(
        path = %path.display(),
        rows = dataset.n_rows(),
        columns = dataset.n_columns(),
        "Loaded CSV snapshot"
    );
    Ok(dataset)
}

/// Parse CSV text from any reader. `origin` is only used in error messages.
pub fn parse_csv<R: Read>(reader: R, origin: impl AsRef<Path>) -> Result<Dataset> {
    let origin = origin.as_ref();
    let csv_error = |source| DriftError::Csv { path: PathBuf::from(origin), source };

    let mut reader = ReaderBuilder::new().has_headers(true).trim(Trim::All).from_reader(reader);
    let headers: Vec<String> = reader.headers().map_err(csv_error)?.iter().map(String::from).collect();

    let mut cells: Vec<Vec<String>> = vec![Vec::new(); headers.len()];
    let mut record = StringRecord::new();
    while reader.read_record(&mut record).map_err(csv_error)? {
        for (column, field) in cells.iter_mut().zip(record.iter()) {
            column.push(field.to_string());
        }
    }

    let columns = headers
        .into_iter()
        .zip(cells)
        .map(|(name, raw)| Column::new(name, infer_values(raw)))
        .collect();
    Dataset::new(columns)
}

/// Narrowest type that accepts every non-blank cell
fn infer_values(raw: Vec<String>) -> ColumnValues {
    let present: Vec<&str> = raw.iter().map(String::as_str).filter(|s| !s.is_empty()).collect();
    if present.is_empty() {
        return ColumnValues::Text(raw);
    }
    let has_blanks = present.len() < raw.len();

    if !has_blanks {
        if let Some(ints) = parse_all(&raw, |s| s.parse::<i64>().ok()) {
            return ColumnValues::Integer(ints);
        }
    }
    if present.iter().all(|s| s.parse::<f64>().is_ok()) {
        let floats = raw.iter().map(|s| s.parse::<f64>().unwrap_or(f64::NAN)).collect();
        return ColumnValues::Float(floats);
    }
    if !has_blanks {
        if let Some(bools) = parse_all(&raw, parse_bool) {
            return ColumnValues::Boolean(bools);
        }
    }
    ColumnValues::Text(raw)
}

fn parse_all<T>(raw: &[String], parse: impl Fn(&str) -> Option<T>) -> Option<Vec<T>> {
    raw.iter().map(|s| parse(s)).collect()
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.to_ascii_lowercase().as_str() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}
