//! Ordinary least squares via the normal equations

use crate::design::DesignMatrix;
use bass_core::{Error, Result};
use nalgebra::{DMatrix, DVector};
use tracing::{debug, instrument};

/// Relative tolerance on singular values of X'X below which a direction is
/// treated as missing from the column space
const RANK_TOLERANCE: f64 = 1e-10;

/// Residual sum of squares below this fraction of y'y counts as an exact fit
const EXACT_FIT_TOLERANCE: f64 = 1e-20;

/// A fitted linear model
#[derive(Debug, Clone)]
pub struct OlsFit {
    coefficients: DVector<f64>,
    xtx_inv: DMatrix<f64>,
    rss: f64,
    n_obs: usize,
    df_resid: usize,
}

impl OlsFit {
    /// Solve X'X b = X'y
    ///
    /// Fails with an analysis error when the design is rank deficient or leaves
    /// no residual degrees of freedom.
    #[instrument(skip_all, fields(n = design.n_obs(), p = design.n_params()))]
    pub fn fit(design: &DesignMatrix, y: &[f64]) -> Result<Self> {
        let x = design.matrix();
        let (n, p) = (x.nrows(), x.ncols());
        if y.len() != n {
            return Err(Error::size_mismatch(n, y.len(), "response vector"));
        }
        if y.iter().any(|v| !v.is_finite()) {
            return Err(Error::InvalidInput(
                "response contains missing values".to_string(),
            ));
        }
        if n <= p {
            return Err(Error::analysis(
                "fit",
                format!("no residual degrees of freedom ({n} observations, {p} parameters)"),
            ));
        }

        let y = DVector::from_column_slice(y);
        let xt = x.transpose();
        let xtx = &xt * x;
        let xty = &xt * &y;

        let singular_values = xtx.clone().svd(false, false).singular_values;
        let largest = singular_values.max();
        let rank = singular_values
            .iter()
            .filter(|&&s| s > largest * RANK_TOLERANCE)
            .count();
        if rank < p {
            return Err(Error::analysis(
                "fit",
                format!("design matrix is singular (rank {rank} of {p})"),
            ));
        }

        let xtx_inv = xtx
            .cholesky()
            .ok_or_else(|| Error::analysis("fit", "X'X is not positive definite"))?
            .inverse();
        let coefficients = &xtx_inv * xty;

        let residuals = &y - x * &coefficients;
        let mut rss = residuals.norm_squared();
        if rss <= EXACT_FIT_TOLERANCE * y.norm_squared() {
            rss = 0.0;
        }
        let df_resid = n - p;
        debug!(rss, df_resid, "fitted linear model");

        Ok(Self {
            coefficients,
            xtx_inv,
            rss,
            n_obs: n,
            df_resid,
        })
    }

    pub fn coefficients(&self) -> &DVector<f64> {
        &self.coefficients
    }

    /// Unscaled covariance (X'X)^-1
    pub fn xtx_inv(&self) -> &DMatrix<f64> {
        &self.xtx_inv
    }

    pub fn rss(&self) -> f64 {
        self.rss
    }

    pub fn n_obs(&self) -> usize {
        self.n_obs
    }

    pub fn df_resid(&self) -> usize {
        self.df_resid
    }

    /// Residual mean square
    pub fn scale(&self) -> f64 {
        self.rss / self.df_resid as f64
    }
}
