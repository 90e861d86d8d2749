//! Dataset loading and column coercion
//!
//! The dataset is read once and never modified. Coercion produces owned
//! vectors: numeric columns become `f64` with NaN for anything missing or
//! unparseable, grouping columns become optional category labels.

use crate::{Error, Result};
use bass_core::CategoryLabel;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Rows used to infer column types when reading CSV
const SCHEMA_INFERENCE_ROWS: usize = 10_000;

/// Shape of the loaded dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetInfo {
    pub rows: usize,
    pub columns: usize,
}

impl DatasetInfo {
    pub fn of(df: &DataFrame) -> Self {
        Self {
            rows: df.height(),
            columns: df.width(),
        }
    }
}

/// Read a CSV file with a header row
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn load_csv(path: impl AsRef<Path>) -> Result<DataFrame> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(Error::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("dataset not found: {}", path.display()),
        )));
    }

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(SCHEMA_INFERENCE_ROWS))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;
    info!(rows = df.height(), columns = df.width(), "loaded dataset");
    Ok(df)
}

/// Column names in dataset order
pub fn column_names(df: &DataFrame) -> Vec<String> {
    df.get_column_names()
        .into_iter()
        .map(|c| c.to_string())
        .collect()
}

pub(crate) fn require_column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column> {
    df.column(name)
        .map_err(|_| Error::InvalidColumn(name.to_string()))
}

/// Coerce a column to numbers; unparseable and null entries become NaN
pub fn numeric_values(df: &DataFrame, name: &str) -> Result<Vec<f64>> {
    let column = require_column(df, name)?;
    let coerced = match column.dtype() {
        DataType::Float64 => column.clone(),
        // non-strict cast: anything that does not parse becomes null
        _ => column.cast(&DataType::Float64)?,
    };
    let values: Vec<f64> = coerced
        .f64()?
        .into_iter()
        .map(|v| v.filter(|x| x.is_finite()).unwrap_or(f64::NAN))
        .collect();

    let missing = values.iter().filter(|v| v.is_nan()).count();
    debug!(column = name, missing, total = values.len(), "coerced to numeric");
    Ok(values)
}

fn is_numeric(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Float32
            | DataType::Float64
            | DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
    )
}

fn format_number(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{v:.0}")
    } else {
        v.to_string()
    }
}

/// Read a column as category labels; nulls and blank strings are missing
pub fn category_labels(df: &DataFrame, name: &str) -> Result<Vec<Option<CategoryLabel>>> {
    let column = require_column(df, name)?;
    let dtype = column.dtype().clone();

    let labels: Vec<Option<CategoryLabel>> = if is_numeric(&dtype) {
        let numbers = column.cast(&DataType::Float64)?;
        let labels = numbers
            .f64()?
            .into_iter()
            .map(|v| v.filter(|x| x.is_finite()).map(|x| CategoryLabel::new(format_number(x))))
            .collect();
        labels
    } else {
        let text = match dtype {
            DataType::String => column.clone(),
            _ => column.cast(&DataType::String)?,
        };
        let labels = text
            .str()?
            .into_iter()
            .map(|v| {
                v.map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(CategoryLabel::from)
            })
            .collect();
        labels
    };
    Ok(labels)
}

/// Rows where `column` equals `value` (compared as category labels)
pub fn equality_mask(df: &DataFrame, column: &str, value: &str) -> Result<Vec<bool>> {
    let wanted = CategoryLabel::from(value.trim());
    Ok(category_labels(df, column)?
        .into_iter()
        .map(|l| l.as_ref() == Some(&wanted))
        .collect())
}
