//! Descriptive statistics and bar-chart aggregates as tables

use super::{key_columns, Prepared};
use crate::Result;
use bass_core::{describe, Describe, GroupAggregate, GroupKey, DESCRIBE_FIELDS};
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// `describe()` of the target, overall or one row per group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DescribeTable {
    pub target: String,
    pub grouping: Vec<String>,
    pub rows: Vec<(GroupKey, Describe)>,
}

impl DescribeTable {
    /// Ungrouped summary has a single row with an empty key
    pub fn overall(&self) -> Option<&Describe> {
        match self.rows.as_slice() {
            [(key, d)] if key.is_empty() => Some(d),
            _ => None,
        }
    }

    pub fn get(&self, key: &GroupKey) -> Option<&Describe> {
        self.rows.iter().find(|(k, _)| k == key).map(|(_, d)| d)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Grouping columns followed by count, mean, std, min, quartiles, max
    pub fn to_frame(&self) -> Result<DataFrame> {
        let keys: Vec<&GroupKey> = self.rows.iter().map(|(k, _)| k).collect();
        let mut columns = key_columns(&self.grouping, &keys);

        let counts: Vec<u64> = self.rows.iter().map(|(_, d)| d.count as u64).collect();
        columns.push(Series::new(PlSmallStr::from(DESCRIBE_FIELDS[0]), counts).into());
        for (idx, name) in DESCRIBE_FIELDS.iter().enumerate().skip(1) {
            let values: Vec<Option<f64>> = self.rows.iter().map(|(_, d)| d.values()[idx]).collect();
            columns.push(Series::new(PlSmallStr::from(*name), values).into());
        }
        Ok(DataFrame::new(columns)?)
    }
}

pub(crate) fn describe_prepared(prepared: &Prepared) -> DescribeTable {
    let rows = if prepared.grouping.is_empty() {
        vec![(GroupKey::empty(), describe(&prepared.values))]
    } else {
        prepared.grouped().describe()
    };
    DescribeTable {
        target: prepared.target.clone(),
        grouping: prepared.grouping.clone(),
        rows,
    }
}

pub(crate) fn aggregate_prepared(prepared: &Prepared) -> Vec<GroupAggregate> {
    if prepared.grouping.is_empty() {
        return vec![GroupAggregate::from_values(GroupKey::empty(), &prepared.values)];
    }
    prepared.grouped().aggregate()
}

/// Grouping columns followed by mean, count, std and stderr
pub fn aggregates_to_frame(
    grouping: &[String],
    aggregates: &[GroupAggregate],
) -> Result<DataFrame> {
    let keys: Vec<&GroupKey> = aggregates.iter().map(|a| &a.key).collect();
    let mut columns = key_columns(grouping, &keys);

    let means: Vec<Option<f64>> = aggregates.iter().map(|a| a.mean).collect();
    let counts: Vec<u64> = aggregates.iter().map(|a| a.count as u64).collect();
    let stds: Vec<Option<f64>> = aggregates.iter().map(|a| a.std).collect();
    let stderrs: Vec<Option<f64>> = aggregates.iter().map(|a| a.stderr).collect();
    columns.push(Series::new(PlSmallStr::from("mean"), means).into());
    columns.push(Series::new(PlSmallStr::from("count"), counts).into());
    columns.push(Series::new(PlSmallStr::from("std"), stds).into());
    columns.push(Series::new(PlSmallStr::from("stderr"), stderrs).into());
    Ok(DataFrame::new(columns)?)
}
