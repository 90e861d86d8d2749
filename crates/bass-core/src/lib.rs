//! Core types for BASS reporting
//!
//! This crate holds the pieces of the reporting pipeline that do not depend on a
//! dataframe library: the shared error type, category labels and their ordering,
//! descriptive statistics, the mean / standard-error aggregation used for bar
//! charts, and the chart specifications handed to a renderer.
//!
//! # Example
//!
//! ```rust
//! use bass_core::{describe, standard_error};
//!
//! let d = describe(&[2.0, 4.0, f64::NAN, 6.0, 8.0]);
//! assert_eq!(d.count, 4);
//! assert_eq!(d.mean, Some(5.0));
//! assert_eq!(standard_error(Some(2.0), 4), Some(1.0));
//! ```

pub mod aggregate;
pub mod chart;
pub mod describe;
pub mod error;
pub mod label;
pub mod utils;

pub use aggregate::{standard_error, GroupAggregate, GroupedValues};
pub use chart::{BarChartSpec, BarPoint, BarSeries, ScatterSpec};
pub use describe::{describe, quantile_linear, Describe, DESCRIBE_FIELDS};
pub use error::{Error, Result};
pub use label::{CategoryLabel, GroupKey};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
