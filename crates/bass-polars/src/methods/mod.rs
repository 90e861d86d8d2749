//! Pipeline steps over a coerced working copy of the selected columns

pub(crate) mod anova;
pub(crate) mod describe;
pub(crate) mod scatter;
pub(crate) mod summary;

use crate::dataset::{category_labels, equality_mask, numeric_values};
use crate::report::{run_report, Report, Selection};
use crate::{Error, ReportExt, Result};
use bass_anova::AnovaTable;
use bass_core::{
    BarChartSpec, CategoryLabel, GroupAggregate, GroupKey, GroupedValues, ScatterSpec,
};
use describe::{aggregate_prepared, describe_prepared, DescribeTable};
use polars::prelude::*;
use summary::SummaryTable;
use tracing::debug;

/// Target values and grouping labels of the selected (and filtered) rows
#[derive(Debug, Clone)]
pub(crate) struct Prepared {
    pub target: String,
    pub grouping: Vec<String>,
    pub values: Vec<f64>,
    /// One label vector per grouping column
    pub labels: Vec<Vec<Option<CategoryLabel>>>,
}

impl Prepared {
    /// Group key of every row; `None` when any grouping value is missing
    pub fn keys(&self) -> Vec<Option<GroupKey>> {
        (0..self.values.len())
            .map(|row| {
                self.labels
                    .iter()
                    .map(|col| col[row].clone())
                    .collect::<Option<Vec<_>>>()
                    .map(GroupKey::new)
            })
            .collect()
    }

    pub fn grouped(&self) -> GroupedValues {
        GroupedValues::build(&self.keys(), &self.values)
    }
}

/// Coerce the selected columns and apply the row filter
pub(crate) fn prepare(df: &DataFrame, selection: &Selection) -> Result<Prepared> {
    selection.validate(df)?;

    let mask = match &selection.filter {
        Some(f) => Some(equality_mask(df, &f.column, &f.value)?),
        None => None,
    };
    let keep = |i: usize| mask.as_ref().map_or(true, |m| m[i]);

    let values: Vec<f64> = numeric_values(df, &selection.target)?
        .into_iter()
        .enumerate()
        .filter(|(i, _)| keep(*i))
        .map(|(_, v)| v)
        .collect();

    let mut labels = Vec::with_capacity(selection.grouping.len());
    for column in &selection.grouping {
        let col: Vec<Option<CategoryLabel>> = category_labels(df, column)?
            .into_iter()
            .enumerate()
            .filter(|(i, _)| keep(*i))
            .map(|(_, l)| l)
            .collect();
        if col.iter().all(Option::is_none) {
            return Err(Error::InvalidInput(format!(
                "grouping column '{column}' has no non-missing values"
            )));
        }
        labels.push(col);
    }

    debug!(
        response = %selection.target,
        rows = values.len(),
        grouping = ?selection.grouping,
        "prepared selection"
    );
    Ok(Prepared {
        target: selection.target.clone(),
        grouping: selection.grouping.clone(),
        values,
        labels,
    })
}

/// String column of one grouping component per key
pub(crate) fn key_columns(grouping: &[String], keys: &[&GroupKey]) -> Vec<Column> {
    grouping
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let values: Vec<String> = keys
                .iter()
                .map(|k| k.get(i).map(|l| l.to_string()).unwrap_or_default())
                .collect();
            Series::new(PlSmallStr::from(name.as_str()), values).into()
        })
        .collect()
}

fn selection(target: &str, grouping: &[&str]) -> Selection {
    grouping
        .iter()
        .fold(Selection::new(target), |s, column| s.group_by(*column))
}

impl ReportExt for DataFrame {
    fn coerce_numeric(&self, column: &str) -> Result<Vec<f64>> {
        numeric_values(self, column)
    }

    fn describe_column(&self, column: &str) -> Result<DescribeTable> {
        self.describe_by(column, &[])
    }

    fn describe_by(&self, target: &str, grouping: &[&str]) -> Result<DescribeTable> {
        let prepared = prepare(self, &selection(target, grouping))?;
        Ok(describe_prepared(&prepared))
    }

    fn aggregate_by(&self, target: &str, grouping: &[&str]) -> Result<Vec<GroupAggregate>> {
        let prepared = prepare(self, &selection(target, grouping))?;
        Ok(aggregate_prepared(&prepared))
    }

    fn anova_by(&self, target: &str, grouping: &[&str]) -> Result<AnovaTable> {
        let prepared = prepare(self, &selection(target, grouping))?;
        anova::anova_prepared(&prepared)
    }

    fn bar_chart(&self, target: &str, grouping: &[&str], swap: bool) -> Result<BarChartSpec> {
        let prepared = prepare(self, &selection(target, grouping))?;
        let aggregates = aggregate_prepared(&prepared);
        Ok(BarChartSpec::from_aggregates(
            target,
            &prepared.grouping,
            &aggregates,
            swap,
        )?)
    }

    fn summary_table(&self, variables: &[&str], group_by: &str) -> Result<SummaryTable> {
        let variables: Vec<String> = variables.iter().map(|v| v.to_string()).collect();
        summary::summary_table(self, &variables, group_by)
    }

    fn scatter(&self, x: &str, y: &str) -> Result<ScatterSpec> {
        scatter::scatter(self, x, y)
    }

    fn report(&self, selection: &Selection) -> Result<Report> {
        run_report(self, selection)
    }
}
