//! Extension trait for running the reporting pipeline on Polars DataFrames

use crate::report::{Report, Selection};
use crate::{DescribeTable, Result, SummaryTable};
use bass_anova::AnovaTable;
use bass_core::{BarChartSpec, GroupAggregate, ScatterSpec};

/// Reporting operations on a loaded dataset
///
/// Every method reads the frame and leaves it untouched. Columns named in a
/// call must exist, otherwise [`crate::Error::InvalidColumn`] is returned.
pub trait ReportExt {
    /// Coerce a column to `f64`, NaN for missing or unparseable entries
    fn coerce_numeric(&self, column: &str) -> Result<Vec<f64>>;

    /// `describe()` of one column over all rows
    fn describe_column(&self, column: &str) -> Result<DescribeTable>;

    /// `describe()` of `target` per group of up to two columns
    ///
    /// # Returns
    /// One row per observed group, sorted by group key. A group whose target
    /// values are all missing gets a count-0 row with every statistic missing.
    fn describe_by(&self, target: &str, grouping: &[&str]) -> Result<DescribeTable>;

    /// Mean, count, standard deviation and standard error per group
    fn aggregate_by(&self, target: &str, grouping: &[&str]) -> Result<Vec<GroupAggregate>>;

    /// Type-III ANOVA of `target` on the grouping columns as main effects
    fn anova_by(&self, target: &str, grouping: &[&str]) -> Result<AnovaTable>;

    /// Bar chart of group means with standard-error bars
    ///
    /// # Arguments
    /// * `swap` - with two grouping columns, put the second one on the x-axis
    fn bar_chart(&self, target: &str, grouping: &[&str], swap: bool) -> Result<BarChartSpec>;

    /// "mean (SD)" summary of several variables split by `group_by`
    fn summary_table(&self, variables: &[&str], group_by: &str) -> Result<SummaryTable>;

    /// Pairwise-complete scatter of two numeric columns with Pearson r
    fn scatter(&self, x: &str, y: &str) -> Result<ScatterSpec>;

    /// Full pipeline for one selection
    fn report(&self, selection: &Selection) -> Result<Report>;
}
