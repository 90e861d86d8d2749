//! Common test utilities for bass-polars tests

#![allow(dead_code)]

use polars::prelude::*;

/// Six scores in two groups of three: means 2 and 5, within-group SD 1
pub fn one_way_df() -> DataFrame {
    df![
        "score" => [1.0, 2.0, 3.0, 4.0, 5.0, 6.0],
        "sex" => ["F", "F", "F", "M", "M", "M"],
    ]
    .unwrap()
}

/// Balanced two-factor layout with a string-typed score column
pub fn two_way_df() -> DataFrame {
    df![
        "score" => ["1", "2", "3", "4", "5", "6", "7", "8"],
        "sex" => ["F", "F", "F", "F", "M", "M", "M", "M"],
        "quest" => [30i64, 30, 36, 36, 30, 30, 36, 36],
        "version" => ["v1", "v2", "v1", "v2", "v1", "v2", "v1", "v2"],
    ]
    .unwrap()
}

/// Value of a single f64 cell
pub fn cell(df: &DataFrame, column: &str, row: usize) -> Option<f64> {
    df.column(column).unwrap().f64().unwrap().get(row)
}

/// Value of a single string cell
pub fn text_cell(df: &DataFrame, column: &str, row: usize) -> String {
    df.column(column)
        .unwrap()
        .str()
        .unwrap()
        .get(row)
        .unwrap()
        .to_string()
}
