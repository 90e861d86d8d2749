//! Renderer-independent chart specifications
//!
//! A bar chart groups bars by the x-axis category and colours them by the
//! series category; every bar carries its own error bar (one standard error).

use crate::aggregate::GroupAggregate;
use crate::label::CategoryLabel;
use crate::utils::pearson;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Height and error of one bar
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarPoint {
    pub mean: f64,
    pub stderr: Option<f64>,
    pub count: usize,
}

/// Bars of one colour, aligned with [`BarChartSpec::categories`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarSeries {
    /// `None` when there is no colour grouping
    pub name: Option<CategoryLabel>,
    pub points: Vec<Option<BarPoint>>,
}

/// Grouped bar chart with error bars
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarChartSpec {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub legend_title: Option<String>,
    /// x-axis categories in sorted label order
    pub categories: Vec<CategoryLabel>,
    pub series: Vec<BarSeries>,
}

impl BarChartSpec {
    /// Lay out aggregates of `target` grouped by `grouping` (one or two columns)
    ///
    /// The x-axis is the first grouping column and the colour the second; with
    /// `swap` and two columns the roles are exchanged. Values are untouched by
    /// the swap.
    pub fn from_aggregates(
        target: &str,
        grouping: &[String],
        aggregates: &[GroupAggregate],
        swap: bool,
    ) -> Result<Self> {
        if grouping.is_empty() || grouping.len() > 2 {
            return Err(Error::InvalidParameter(format!(
                "a bar chart needs one or two grouping columns, got {}",
                grouping.len()
            )));
        }
        if let Some(bad) = aggregates.iter().find(|a| a.key.len() != grouping.len()) {
            return Err(Error::size_mismatch(grouping.len(), bad.key.len(), "group key"));
        }

        let (x_idx, series_idx) = match (grouping.len(), swap) {
            (2, true) => (1, Some(0)),
            (2, false) => (0, Some(1)),
            _ => (0, None),
        };

        let categories: Vec<CategoryLabel> = aggregates
            .iter()
            .filter_map(|a| a.key.get(x_idx).cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let series_names: Vec<Option<CategoryLabel>> = match series_idx {
            Some(idx) => aggregates
                .iter()
                .filter_map(|a| a.key.get(idx).cloned())
                .collect::<BTreeSet<_>>()
                .into_iter()
                .map(Some)
                .collect(),
            None => vec![None],
        };

        let series = series_names
            .into_iter()
            .map(|name| {
                let points = categories
                    .iter()
                    .map(|cat| {
                        aggregates
                            .iter()
                            .find(|a| {
                                a.key.get(x_idx) == Some(cat)
                                    && series_idx.and_then(|i| a.key.get(i)) == name.as_ref()
                            })
                            .and_then(|a| {
                                a.mean.map(|mean| BarPoint {
                                    mean,
                                    stderr: a.stderr,
                                    count: a.count,
                                })
                            })
                    })
                    .collect();
                BarSeries { name, points }
            })
            .collect();

        Ok(Self {
            title: format!("Mean {target} by {}", grouping.join(", ")),
            x_label: grouping[x_idx].clone(),
            y_label: format!("Mean {target}"),
            legend_title: series_idx.map(|i| grouping[i].clone()),
            categories,
            series,
        })
    }

    /// Every drawn bar as (x category, series, point)
    pub fn bars(
        &self,
    ) -> impl Iterator<Item = (&CategoryLabel, Option<&CategoryLabel>, &BarPoint)> {
        self.series.iter().flat_map(move |s| {
            self.categories
                .iter()
                .zip(&s.points)
                .filter_map(move |(c, p)| p.as_ref().map(|p| (c, s.name.as_ref(), p)))
        })
    }

    /// Extent of the bars including their error bars
    pub fn value_range(&self) -> Option<(f64, f64)> {
        self.bars().fold(None, |acc, (_, _, p)| {
            let e = p.stderr.unwrap_or(0.0);
            let (lo, hi) = (p.mean - e, p.mean + e);
            Some(match acc {
                Some((a, b)) => (f64::min(a, lo), f64::max(b, hi)),
                None => (lo, hi),
            })
        })
    }
}

/// Scatterplot of two numeric columns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterSpec {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub points: Vec<(f64, f64)>,
    /// Pearson correlation of the plotted points
    pub pearson_r: Option<f64>,
    /// Number of complete pairs
    pub n: usize,
}

impl ScatterSpec {
    /// Pair the two columns, keeping rows where both are present
    pub fn from_columns(x_name: &str, x: &[f64], y_name: &str, y: &[f64]) -> Result<Self> {
        if x.len() != y.len() {
            return Err(Error::size_mismatch(x.len(), y.len(), "scatter columns"));
        }
        let points = x
            .iter()
            .zip(y)
            .filter(|(a, b)| a.is_finite() && b.is_finite())
            .map(|(&a, &b)| (a, b))
            .collect();
        let (pearson_r, n) = pearson(x, y);

        Ok(Self {
            title: format!("{x_name} vs {y_name}"),
            x_label: x_name.to_string(),
            y_label: y_name.to_string(),
            points,
            pearson_r,
            n,
        })
    }
}
