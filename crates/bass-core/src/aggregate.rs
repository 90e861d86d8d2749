//! Grouping and mean / standard-error aggregation

use crate::describe::{describe, Describe};
use crate::label::GroupKey;
use crate::utils::{mean, std_dev};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Standard error of the mean, undefined for `count <= 1`
pub fn standard_error(std: Option<f64>, count: usize) -> Option<f64> {
    if count <= 1 {
        return None;
    }
    std.map(|s| s / (count as f64).sqrt())
}

/// Mean, count, standard deviation and standard error of one group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupAggregate {
    pub key: GroupKey,
    pub count: usize,
    pub mean: Option<f64>,
    pub std: Option<f64>,
    pub stderr: Option<f64>,
}

impl GroupAggregate {
    /// Aggregate the finite values of one group
    pub fn from_values(key: GroupKey, values: &[f64]) -> Self {
        let count = values.iter().filter(|x| x.is_finite()).count();
        let std = std_dev(values);
        Self {
            key,
            count,
            mean: mean(values),
            std,
            stderr: standard_error(std, count),
        }
    }
}

/// Target values partitioned by group key, keys in sorted label order
#[derive(Debug, Clone, Default)]
pub struct GroupedValues {
    groups: BTreeMap<GroupKey, Vec<f64>>,
}

impl GroupedValues {
    /// Partition `values` by `keys`
    ///
    /// Rows whose key is `None` (a missing grouping value) are dropped. NaN
    /// values stay in their group, so every observed key gets a group even
    /// when all of its values are missing; such a group describes as
    /// [`Describe::missing`].
    pub fn build(keys: &[Option<GroupKey>], values: &[f64]) -> Self {
        let mut groups: BTreeMap<GroupKey, Vec<f64>> = BTreeMap::new();
        let mut dropped = 0usize;
        for (key, &value) in keys.iter().zip(values) {
            match key {
                Some(key) => groups.entry(key.clone()).or_default().push(value),
                None => dropped += 1,
            }
        }
        debug!(groups = groups.len(), dropped, "grouped target values");
        Self { groups }
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&GroupKey, &[f64])> {
        self.groups.iter().map(|(k, v)| (k, v.as_slice()))
    }

    /// Per-group descriptive statistics
    pub fn describe(&self) -> Vec<(GroupKey, Describe)> {
        self.iter().map(|(k, v)| (k.clone(), describe(v))).collect()
    }

    /// Per-group mean / count / std / standard error
    pub fn aggregate(&self) -> Vec<GroupAggregate> {
        self.iter()
            .map(|(k, v)| GroupAggregate::from_values(k.clone(), v))
            .collect()
    }
}
