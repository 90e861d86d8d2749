//! Treatment-coded design matrices

use crate::factor::Factor;
use bass_core::{Error, Result};
use nalgebra::DMatrix;
use std::ops::Range;

/// Name used for the constant column
pub const INTERCEPT: &str = "Intercept";

/// A model term and the design columns that belong to it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Term {
    pub name: String,
    pub columns: Range<usize>,
}

impl Term {
    pub fn df(&self) -> usize {
        self.columns.len()
    }
}

/// Design matrix of an additive model: intercept followed by the dummy
/// columns of each factor
#[derive(Debug, Clone)]
pub struct DesignMatrix {
    matrix: DMatrix<f64>,
    terms: Vec<Term>,
}

impl DesignMatrix {
    /// Build X[i, j] with a leading column of ones and, for each factor with
    /// k levels, k - 1 indicator columns for the non-reference levels
    pub fn treatment(factors: &[Factor]) -> Result<Self> {
        let n = match factors.first() {
            Some(f) => f.n_obs(),
            None => {
                return Err(Error::InvalidParameter(
                    "at least one factor is required".to_string(),
                ))
            }
        };
        if let Some(f) = factors.iter().find(|f| f.n_obs() != n) {
            return Err(Error::size_mismatch(n, f.n_obs(), f.name()));
        }

        let p = 1 + factors.iter().map(Factor::n_contrasts).sum::<usize>();
        let mut matrix = DMatrix::zeros(n, p);
        let mut terms = Vec::with_capacity(factors.len() + 1);

        for i in 0..n {
            matrix[(i, 0)] = 1.0;
        }
        terms.push(Term {
            name: INTERCEPT.to_string(),
            columns: 0..1,
        });

        let mut next = 1;
        for factor in factors {
            let start = next;
            for (i, &code) in factor.codes().iter().enumerate() {
                // level 0 is the reference and has no column
                if code > 0 {
                    matrix[(i, start + code - 1)] = 1.0;
                }
            }
            next += factor.n_contrasts();
            terms.push(Term {
                name: factor.name().to_string(),
                columns: start..next,
            });
        }

        Ok(Self { matrix, terms })
    }

    pub fn matrix(&self) -> &DMatrix<f64> {
        &self.matrix
    }

    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    pub fn n_obs(&self) -> usize {
        self.matrix.nrows()
    }

    pub fn n_params(&self) -> usize {
        self.matrix.ncols()
    }
}
