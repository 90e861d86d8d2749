//! BASS reporting toolkit
//!
//! Descriptive statistics, type-III ANOVA and bar-chart layouts for the BASS
//! speech-assessment dataset, re-exported from the workspace crates:
//!
//! - [`core`]: descriptive statistics, grouping and chart specifications
//! - [`anova`]: treatment-coded linear models and type-III ANOVA
//! - [`polars`]: dataset loading and the reporting pipeline on `DataFrame`s
//! - `viz` (feature `viz`): SVG rendering with plotters

pub use bass_anova as anova;
pub use bass_core as core;
pub use bass_polars as polars;
#[cfg(feature = "viz")]
pub use bass_viz as viz;

pub mod prelude {
    //! Everything needed to run a report
    pub use bass_core::{describe, BarChartSpec, Describe, GroupAggregate, GroupKey, ScatterSpec};
    pub use bass_polars::{
        load_csv, run_report, DashboardConfig, Report, ReportExt, RowFilter, Selection,
    };
    #[cfg(feature = "viz")]
    pub use bass_viz::{render_bar_chart, render_scatter};
}
