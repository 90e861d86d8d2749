//! Descriptive statistics
//!
//! The summary mirrors the usual dataframe `describe()`: count, mean, sample
//! standard deviation, minimum, quartiles and maximum. Quartiles interpolate
//! linearly between order statistics. NaN entries are missing and never
//! counted.

use crate::utils::{mean, sorted, std_dev};
use serde::{Deserialize, Serialize};

/// Names of the statistics in display order
pub const DESCRIBE_FIELDS: [&str; 8] = ["count", "mean", "std", "min", "25%", "50%", "75%", "max"];

/// Descriptive statistics over the non-missing values of one column or group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Describe {
    pub count: usize,
    pub mean: Option<f64>,
    pub std: Option<f64>,
    pub min: Option<f64>,
    pub q25: Option<f64>,
    pub median: Option<f64>,
    pub q75: Option<f64>,
    pub max: Option<f64>,
}

impl Describe {
    /// Summary of a column with no usable values
    pub fn missing() -> Self {
        Self {
            count: 0,
            mean: None,
            std: None,
            min: None,
            q25: None,
            median: None,
            q75: None,
            max: None,
        }
    }

    /// Values in `DESCRIBE_FIELDS` order, count included as a float
    pub fn values(&self) -> [Option<f64>; 8] {
        [
            Some(self.count as f64),
            self.mean,
            self.std,
            self.min,
            self.q25,
            self.median,
            self.q75,
            self.max,
        ]
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// Quantile of already-sorted values using linear interpolation
///
/// `p` is clamped to `[0, 1]`. Returns `None` for an empty slice.
pub fn quantile_linear(sorted: &[f64], p: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let p = p.clamp(0.0, 1.0);
    let h = (sorted.len() - 1) as f64 * p;
    let lo = h.floor() as usize;
    let hi = h.ceil() as usize;
    Some(sorted[lo] + (h - lo as f64) * (sorted[hi] - sorted[lo]))
}

/// Describe the finite values of `data`
pub fn describe(data: &[f64]) -> Describe {
    let values = sorted(data);
    if values.is_empty() {
        return Describe::missing();
    }

    Describe {
        count: values.len(),
        mean: mean(&values),
        std: std_dev(&values),
        min: values.first().copied(),
        q25: quantile_linear(&values, 0.25),
        median: quantile_linear(&values, 0.5),
        q75: quantile_linear(&values, 0.75),
        max: values.last().copied(),
    }
}
