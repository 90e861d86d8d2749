//! Type-III analysis of variance
//!
//! Each term's sum of squares is the Wald quadratic form of its coefficients,
//! `b_T' (V_T)^-1 b_T`, where `V_T` is the block of `(X'X)^-1` belonging to
//! the term. For an additive model this equals the increase in residual sum
//! of squares when the term is dropped with every other term kept, which is
//! the type-III decomposition.

use crate::design::{DesignMatrix, Term};
use crate::factor::Factor;
use crate::ols::OlsFit;
use bass_core::{Error, Result};
use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, FisherSnedecor};
use tracing::{debug, instrument, warn};

/// Name of the residual row
pub const RESIDUAL: &str = "Residual";

/// One row of an ANOVA table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnovaRow {
    pub term: String,
    pub sum_sq: f64,
    pub df: usize,
    pub f_value: Option<f64>,
    pub p_value: Option<f64>,
}

/// Type-III ANOVA table: Intercept, one row per factor, then Residual
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnovaTable {
    pub response: String,
    pub n_obs: usize,
    pub rows: Vec<AnovaRow>,
}

impl AnovaTable {
    /// Look up a row by term name
    pub fn row(&self, term: &str) -> Option<&AnovaRow> {
        self.rows.iter().find(|r| r.term == term)
    }

    pub fn residual(&self) -> Option<&AnovaRow> {
        self.row(RESIDUAL)
    }

    /// Rows of the grouping factors only
    pub fn factor_rows(&self) -> impl Iterator<Item = &AnovaRow> {
        self.rows
            .iter()
            .filter(|r| r.term != crate::design::INTERCEPT && r.term != RESIDUAL)
    }
}

/// Fit `response ~ factor_1 + ... + factor_k` and decompose it
#[instrument(skip(y, factors), fields(n = y.len(), factors = factors.len()))]
pub fn fit_type3(response: &str, y: &[f64], factors: &[Factor]) -> Result<AnovaTable> {
    let design = DesignMatrix::treatment(factors)?;
    let fit = OlsFit::fit(&design, y)?;
    type3_table(response, &design, &fit)
}

/// Build the type-III table from an existing fit
pub fn type3_table(response: &str, design: &DesignMatrix, fit: &OlsFit) -> Result<AnovaTable> {
    let scale = fit.scale();
    let df_resid = fit.df_resid();
    let mut rows = Vec::with_capacity(design.terms().len() + 1);

    for term in design.terms() {
        if term.df() == 0 {
            warn!(term = %term.name, "factor has a single level; its test is degenerate");
            rows.push(AnovaRow {
                term: term.name.clone(),
                sum_sq: 0.0,
                df: 0,
                f_value: None,
                p_value: None,
            });
            continue;
        }

        let sum_sq = wald_sum_of_squares(fit, term)?;
        let (f_value, p_value) = if scale > 0.0 {
            let f = sum_sq / term.df() as f64 / scale;
            (Some(f), Some(f_survival(f, term.df(), df_resid)?))
        } else {
            // exact fit, the ratio is undefined
            (None, None)
        };
        debug!(term = %term.name, sum_sq, ?f_value, ?p_value, "type-III term");

        rows.push(AnovaRow {
            term: term.name.clone(),
            sum_sq,
            df: term.df(),
            f_value,
            p_value,
        });
    }

    rows.push(AnovaRow {
        term: RESIDUAL.to_string(),
        sum_sq: fit.rss(),
        df: df_resid,
        f_value: None,
        p_value: None,
    });

    Ok(AnovaTable {
        response: response.to_string(),
        n_obs: fit.n_obs(),
        rows,
    })
}

fn wald_sum_of_squares(fit: &OlsFit, term: &Term) -> Result<f64> {
    let start = term.columns.start;
    let q = term.df();
    let b = fit.coefficients();
    let v = fit.xtx_inv();

    let b_t = DVector::from_fn(q, |i, _| b[start + i]);
    let v_t = DMatrix::from_fn(q, q, |i, j| v[(start + i, start + j)]);
    let v_inv = v_t.cholesky().ok_or_else(|| {
        Error::analysis(
            "anova",
            format!("covariance block of '{}' is not positive definite", term.name),
        )
    })?;

    Ok(b_t.dot(&v_inv.solve(&b_t)))
}

/// Upper tail of the F(d1, d2) distribution
fn f_survival(f: f64, d1: usize, d2: usize) -> Result<f64> {
    let dist = FisherSnedecor::new(d1 as f64, d2 as f64)
        .map_err(|e| Error::analysis("anova", e.to_string()))?;
    Ok(dist.sf(f).clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::design::INTERCEPT;
    use approx::assert_abs_diff_eq;
    use bass_core::CategoryLabel;
    use proptest::prelude::*;

    fn factor(name: &str, values: &[&str]) -> Factor {
        let labels: Vec<CategoryLabel> = values.iter().map(|&v| v.into()).collect();
        Factor::encode(name, &labels).unwrap()
    }

    #[test]
    fn test_one_way_matches_classical_anova() {
        let g = factor("g", &["a", "a", "a", "b", "b", "b", "c", "c", "c"]);
        let y = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0];
        let table = fit_type3("score", &y, &[g]).unwrap();

        let row = table.row("g").unwrap();
        assert_eq!(row.df, 2);
        assert_abs_diff_eq!(row.sum_sq, 54.0, epsilon = 1e-9);
        assert_abs_diff_eq!(row.f_value.unwrap(), 27.0, epsilon = 1e-9);
        // F(2, 6) survival has the closed form (1 + 2F/6)^-3
        assert_abs_diff_eq!(row.p_value.unwrap(), 0.001, epsilon = 1e-9);

        let resid = table.residual().unwrap();
        assert_eq!(resid.df, 6);
        assert_abs_diff_eq!(resid.sum_sq, 6.0, epsilon = 1e-9);
        assert_eq!(table.n_obs, 9);
    }

    #[test]
    fn test_intercept_row_tests_reference_mean() {
        let g = factor("g", &["a", "a", "a", "b", "b", "b", "c", "c", "c"]);
        let y = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0];
        let table = fit_type3("score", &y, &[g]).unwrap();

        let intercept = table.row(INTERCEPT).unwrap();
        assert_eq!(intercept.df, 1);
        // reference mean 2 with variance factor 1/3: 2^2 * 3
        assert_abs_diff_eq!(intercept.sum_sq, 12.0, epsilon = 1e-9);
        assert_abs_diff_eq!(intercept.f_value.unwrap(), 12.0, epsilon = 1e-9);
    }

    #[test]
    fn test_balanced_two_way_matches_marginal_sums() {
        let a = factor("a", &["1", "1", "1", "1", "2", "2", "2", "2"]);
        let b = factor("b", &["1", "1", "2", "2", "1", "1", "2", "2"]);
        let y = [1.0, 2.0, 3.0, 5.0, 4.0, 4.0, 8.0, 7.0];
        let table = fit_type3("score", &y, &[a, b]).unwrap();

        assert_eq!(table.factor_rows().count(), 2);
        assert_abs_diff_eq!(table.row("a").unwrap().sum_sq, 18.0, epsilon = 1e-9);
        assert_abs_diff_eq!(table.row("b").unwrap().sum_sq, 18.0, epsilon = 1e-9);

        let resid = table.residual().unwrap();
        assert_eq!(resid.df, 5);
        assert_abs_diff_eq!(resid.sum_sq, 3.5, epsilon = 1e-9);

        let f_a = table.row("a").unwrap().f_value.unwrap();
        assert_abs_diff_eq!(f_a, 18.0 / (3.5 / 5.0), epsilon = 1e-9);
    }

    fn dropped_term_increase(kept: &Factor, full_rss: f64, y: &[f64]) -> f64 {
        let design = DesignMatrix::treatment(std::slice::from_ref(kept)).unwrap();
        OlsFit::fit(&design, y).unwrap().rss() - full_rss
    }

    #[test]
    fn test_unbalanced_two_way_uses_adjusted_sums() {
        // cells (1,1) x1, (1,2) x2, (2,1) x3, (2,2) x2
        let a = factor("a", &["1", "1", "1", "2", "2", "2", "2", "2"]);
        let b = factor("b", &["1", "2", "2", "1", "1", "1", "2", "2"]);
        let y = [3.0, 5.0, 6.0, 7.0, 8.0, 6.0, 11.0, 12.0];
        let table = fit_type3("score", &y, &[a.clone(), b.clone()]).unwrap();

        let rss = table.residual().unwrap().sum_sq;
        assert_abs_diff_eq!(rss, 33.0 / 7.0, epsilon = 1e-9);
        assert_abs_diff_eq!(table.row("a").unwrap().sum_sq, 324.0 / 7.0, epsilon = 1e-9);
        assert_abs_diff_eq!(table.row("b").unwrap().sum_sq, 2809.0 / 105.0, epsilon = 1e-9);

        assert_abs_diff_eq!(
            table.row("a").unwrap().sum_sq,
            dropped_term_increase(&b, rss, &y),
            epsilon = 1e-9
        );
        assert_abs_diff_eq!(
            table.row("b").unwrap().sum_sq,
            dropped_term_increase(&a, rss, &y),
            epsilon = 1e-9
        );

        // sequential sum for `a` entered first is 32.03, so order matters here
        let one = factor("one", &["x"; 8]);
        let sequential = OlsFit::fit(&DesignMatrix::treatment(&[one]).unwrap(), &y)
            .unwrap()
            .rss()
            - OlsFit::fit(&DesignMatrix::treatment(&[a]).unwrap(), &y).unwrap().rss();
        assert!((sequential - table.row("a").unwrap().sum_sq).abs() > 1.0);
    }

    proptest! {
        #[test]
        fn prop_term_sum_of_squares_is_rss_increase(
            rows in prop::collection::vec((0u8..2, 0u8..3, -10.0..10.0f64), 8..30)
        ) {
            let a_labels: Vec<String> = rows.iter().map(|r| r.0.to_string()).collect();
            let b_labels: Vec<String> = rows.iter().map(|r| r.1.to_string()).collect();
            let y: Vec<f64> = rows.iter().map(|r| r.2).collect();
            let a = factor("a", &a_labels.iter().map(String::as_str).collect::<Vec<_>>());
            let b = factor("b", &b_labels.iter().map(String::as_str).collect::<Vec<_>>());

            // confounded draws are rejected by the fit; nothing to compare
            let table = match fit_type3("score", &y, &[a.clone(), b.clone()]) {
                Ok(table) => table,
                Err(_) => return Ok(()),
            };
            let rss = table.residual().unwrap().sum_sq;
            for (term, kept) in [("a", &b), ("b", &a)] {
                let increase = dropped_term_increase(kept, rss, &y);
                let ss = table.row(term).unwrap().sum_sq;
                prop_assert!((ss - increase).abs() <= 1e-6 * (1.0 + increase.abs()));
            }
        }
    }

    #[test]
    fn test_single_level_factor_is_reported_not_blocked() {
        let v = factor("version", &["4", "4", "4", "4"]);
        let table = fit_type3("score", &[1.0, 2.0, 3.0, 4.0], &[v]).unwrap();
        let row = table.row("version").unwrap();
        assert_eq!(row.df, 0);
        assert_eq!(row.f_value, None);
        assert_eq!(row.p_value, None);
        assert_eq!(table.residual().unwrap().df, 3);
    }

    #[test]
    fn test_exact_fit_leaves_ratio_undefined() {
        let g = factor("g", &["a", "a", "b", "b"]);
        let table = fit_type3("score", &[1.0, 1.0, 2.0, 2.0], &[g]).unwrap();
        let row = table.row("g").unwrap();
        assert_abs_diff_eq!(row.sum_sq, 1.0, epsilon = 1e-9);
        assert_eq!(row.f_value, None);
    }

    #[test]
    fn test_singular_design_fails_as_analysis_error() {
        let a = factor("a", &["x", "x", "y", "y", "y"]);
        let b = factor("b", &["p", "p", "q", "q", "q"]);
        let err = fit_type3("score", &[1.0, 2.0, 3.0, 4.0, 5.0], &[a, b]).unwrap_err();
        assert!(err.is_analysis_failure());
    }
}
