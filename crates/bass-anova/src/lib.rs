//! Fixed-effects linear models over categorical factors
//!
//! Grouping columns are passed as typed [`Factor`]s rather than a model
//! formula. Each factor is treatment coded against its first sorted level, the
//! additive model is fitted by least squares and decomposed into a type-III
//! ANOVA table.
//!
//! # Example
//!
//! ```rust
//! use bass_anova::{fit_type3, Factor};
//! use bass_core::CategoryLabel;
//!
//! let labels: Vec<CategoryLabel> = ["M", "M", "M", "F", "F", "F"]
//!     .iter()
//!     .map(|&s| s.into())
//!     .collect();
//! let sex = Factor::encode("sex", &labels).unwrap();
//! let table = fit_type3("score", &[1.0, 2.0, 3.0, 5.0, 6.0, 7.0], &[sex]).unwrap();
//! assert_eq!(table.row("sex").unwrap().df, 1);
//! ```

mod anova;
mod design;
mod factor;
mod ols;

pub use anova::{fit_type3, type3_table, AnovaRow, AnovaTable, RESIDUAL};
pub use design::{DesignMatrix, Term, INTERCEPT};
pub use factor::Factor;
pub use ols::OlsFit;
