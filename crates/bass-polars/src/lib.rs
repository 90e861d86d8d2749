//! Polars integration for the BASS reporting pipeline
//!
//! Loads the survey dataset into a Polars `DataFrame` and runs the reporting
//! pipeline on it: descriptive statistics, type-III ANOVA, group means with
//! standard errors and the bar chart layout.
//!
//! # Example
//!
//! ```rust,ignore
//! use polars::prelude::*;
//! use bass_polars::{ReportExt, Selection};
//!
//! let df = df![
//!     "score" => [1.0, 2.0, 3.0, 4.0],
//!     "sex" => ["M", "F", "M", "F"],
//! ]?;
//!
//! let report = df.report(&Selection::new("score").group_by("sex"))?;
//! println!("{}", report.descriptives.to_frame()?);
//! ```

mod config;
mod dataset;
mod error;
mod methods;
mod report;
mod traits;

pub use config::{DashboardConfig, GroupingOption};
pub use dataset::{
    category_labels, column_names, equality_mask, load_csv, numeric_values, DatasetInfo,
};
pub use error::{Error, Result};
pub use methods::anova::anova_to_frame;
pub use methods::describe::{aggregates_to_frame, DescribeTable};
pub use methods::summary::{SummaryRow, SummaryTable, OVERALL};
pub use report::{run_report, Report, RowFilter, Selection, MAX_GROUPING};
pub use traits::ReportExt;

// Re-export the result types callers get back from the pipeline
pub use bass_anova::{AnovaRow, AnovaTable};
pub use bass_core::{
    BarChartSpec, BarPoint, BarSeries, CategoryLabel, Describe, GroupAggregate, GroupKey,
    ScatterSpec,
};
