//! Overall summary of many variables split by one grouping column
//!
//! One row per variable with its missing count and a "mean (SD)" cell for the
//! whole dataset and for each group, preceded by an `n` row.

use crate::dataset::{category_labels, numeric_values};
use crate::{Error, Result};
use bass_core::utils::{mean, std_dev};
use bass_core::CategoryLabel;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::instrument;

/// Label of the all-rows column
pub const OVERALL: &str = "Overall";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRow {
    pub variable: String,
    pub missing: usize,
    pub overall: String,
    /// One cell per group, aligned with [`SummaryTable::groups`]
    pub by_group: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryTable {
    pub group_by: String,
    pub groups: Vec<CategoryLabel>,
    /// Row counts: overall, then per group
    pub n_overall: usize,
    pub n_by_group: Vec<usize>,
    pub rows: Vec<SummaryRow>,
}

fn mean_sd(values: &[f64]) -> String {
    match (mean(values), std_dev(values)) {
        (Some(m), Some(s)) => format!("{m:.2} ({s:.2})"),
        (Some(m), None) => format!("{m:.2} (-)"),
        _ => "-".to_string(),
    }
}

#[instrument(skip(df, variables), fields(variables = variables.len()))]
pub(crate) fn summary_table(
    df: &DataFrame,
    variables: &[String],
    group_by: &str,
) -> Result<SummaryTable> {
    if variables.is_empty() {
        return Err(Error::InvalidParameter(
            "summary needs at least one variable".to_string(),
        ));
    }

    let keys = category_labels(df, group_by)?;
    let groups: Vec<CategoryLabel> = keys
        .iter()
        .flatten()
        .cloned()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let n_by_group = groups
        .iter()
        .map(|g| keys.iter().filter(|k| k.as_ref() == Some(g)).count())
        .collect();

    let mut rows = Vec::with_capacity(variables.len());
    for variable in variables {
        let values = numeric_values(df, variable)?;
        let by_group = groups
            .iter()
            .map(|g| {
                let subset: Vec<f64> = values
                    .iter()
                    .zip(&keys)
                    .filter(|(_, k)| k.as_ref() == Some(g))
                    .map(|(&v, _)| v)
                    .collect();
                mean_sd(&subset)
            })
            .collect();
        rows.push(SummaryRow {
            variable: variable.clone(),
            missing: values.iter().filter(|v| v.is_nan()).count(),
            overall: mean_sd(&values),
            by_group,
        });
    }

    Ok(SummaryTable {
        group_by: group_by.to_string(),
        groups,
        n_overall: df.height(),
        n_by_group,
        rows,
    })
}

impl SummaryTable {
    /// Columns `variable`, `missing`, `Overall`, then one per group
    pub fn to_frame(&self) -> Result<DataFrame> {
        let mut variable = vec!["n".to_string()];
        let mut missing = vec![String::new()];
        let mut overall = vec![self.n_overall.to_string()];
        for row in &self.rows {
            variable.push(format!("{}, mean (SD)", row.variable));
            missing.push(row.missing.to_string());
            overall.push(row.overall.clone());
        }

        let mut columns: Vec<Column> = vec![
            Series::new(PlSmallStr::from("variable"), variable).into(),
            Series::new(PlSmallStr::from("missing"), missing).into(),
            Series::new(PlSmallStr::from(OVERALL), overall).into(),
        ];
        for (i, group) in self.groups.iter().enumerate() {
            let mut cells = vec![self.n_by_group[i].to_string()];
            cells.extend(self.rows.iter().map(|r| r.by_group[i].clone()));
            let name = format!("{}={}", self.group_by, group);
            columns.push(Series::new(PlSmallStr::from(name.as_str()), cells).into());
        }
        Ok(DataFrame::new(columns)?)
    }
}
