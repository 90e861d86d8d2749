//! The reporting pipeline
//!
//! One call per selection: coerce the target, describe it (overall or per
//! group), fit the type-III ANOVA when there is a grouping, aggregate mean and
//! standard error per group and lay out the bar chart. Any failure fails the
//! whole report. A target without a single numeric value is not a failure: it
//! reports all-missing statistics and no ANOVA.

use crate::dataset::require_column;
use crate::methods::anova::anova_prepared;
use crate::methods::describe::{aggregate_prepared, describe_prepared, DescribeTable};
use crate::methods::prepare;
use crate::{Error, Result};
use bass_anova::AnovaTable;
use bass_core::{BarChartSpec, GroupAggregate};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

/// Most grouping columns a selection may carry
pub const MAX_GROUPING: usize = 2;

/// Keep only rows where `column` equals `value`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowFilter {
    pub column: String,
    pub value: String,
}

/// What to analyse: a numeric target and up to two grouping columns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub target: String,
    pub grouping: Vec<String>,
    pub filter: Option<RowFilter>,
    /// Put the second grouping column on the x-axis
    pub swap_axes: bool,
}

impl Selection {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            grouping: Vec::new(),
            filter: None,
            swap_axes: false,
        }
    }

    pub fn group_by(mut self, column: impl Into<String>) -> Self {
        self.grouping.push(column.into());
        self
    }

    pub fn with_filter(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.filter = Some(RowFilter {
            column: column.into(),
            value: value.into(),
        });
        self
    }

    pub fn swapped(mut self, swap: bool) -> Self {
        self.swap_axes = swap;
        self
    }

    /// Check every named column exists before anything is computed
    pub fn validate(&self, df: &DataFrame) -> Result<()> {
        require_column(df, &self.target)?;
        if self.grouping.len() > MAX_GROUPING {
            return Err(Error::InvalidParameter(format!(
                "at most {MAX_GROUPING} grouping columns are supported, got {}",
                self.grouping.len()
            )));
        }
        for (i, column) in self.grouping.iter().enumerate() {
            require_column(df, column)?;
            if column == &self.target {
                return Err(Error::InvalidParameter(format!(
                    "'{column}' cannot be both target and grouping column"
                )));
            }
            if self.grouping[..i].contains(column) {
                return Err(Error::InvalidParameter(format!(
                    "'{column}' is listed twice as a grouping column"
                )));
            }
        }
        if let Some(filter) = &self.filter {
            require_column(df, &filter.column)?;
        }
        Ok(())
    }
}

/// Everything displayed for one selection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub selection: Selection,
    pub descriptives: DescribeTable,
    /// Present when the selection has a grouping column and the target has
    /// at least one numeric value
    pub anova: Option<AnovaTable>,
    pub aggregates: Vec<GroupAggregate>,
    pub chart: Option<BarChartSpec>,
}

/// Run the full pipeline for `selection`
#[instrument(skip(df), fields(response = %selection.target))]
pub fn run_report(df: &DataFrame, selection: &Selection) -> Result<Report> {
    let prepared = prepare(df, selection)?;
    let descriptives = describe_prepared(&prepared);
    let aggregates = aggregate_prepared(&prepared);

    let (anova, chart) = if prepared.grouping.is_empty() {
        (None, None)
    } else {
        // a target with no numeric values still gets its (empty) per-group
        // summary; there is nothing to fit
        let anova = if prepared.values.iter().any(|v| v.is_finite()) {
            Some(anova_prepared(&prepared)?)
        } else {
            warn!(response = %prepared.target, "target has no numeric values, ANOVA skipped");
            None
        };
        let chart = BarChartSpec::from_aggregates(
            &prepared.target,
            &prepared.grouping,
            &aggregates,
            selection.swap_axes,
        )?;
        (anova, Some(chart))
    };

    info!(
        groups = descriptives.len(),
        anova = anova.is_some(),
        "report complete"
    );
    Ok(Report {
        selection: selection.clone(),
        descriptives,
        anova,
        aggregates,
        chart,
    })
}
