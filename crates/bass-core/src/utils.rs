//! Utility functions for working with data slices
//!
//! Missing values are represented as NaN throughout; every helper here
//! ignores them rather than propagating them.

/// Keep only finite values, in their original order
pub fn finite_values(data: &[f64]) -> Vec<f64> {
    data.iter().copied().filter(|x| x.is_finite()).collect()
}

/// Sort the finite values of `data` ascending
///
/// # Examples
///
/// ```rust
/// use bass_core::utils::sorted;
///
/// let data = vec![3.0, 1.0, f64::NAN, 2.0];
/// assert_eq!(sorted(&data), vec![1.0, 2.0, 3.0]);
/// ```
pub fn sorted(data: &[f64]) -> Vec<f64> {
    let mut values = finite_values(data);
    values.sort_by(f64::total_cmp);
    values
}

/// Mean of the finite values, `None` when there are none
///
/// ```rust
/// use bass_core::utils::mean;
///
/// assert_eq!(mean(&[1.0, 2.0, 3.0]), Some(2.0));
/// assert_eq!(mean(&[]), None);
/// ```
pub fn mean(data: &[f64]) -> Option<f64> {
    let (sum, n) = data
        .iter()
        .filter(|x| x.is_finite())
        .fold((0.0, 0usize), |(s, n), &x| (s + x, n + 1));
    (n > 0).then(|| sum / n as f64)
}

/// Sample standard deviation (n - 1 denominator) of the finite values
///
/// Undefined for fewer than two values.
pub fn std_dev(data: &[f64]) -> Option<f64> {
    let values = finite_values(data);
    if values.len() < 2 {
        return None;
    }
    let m = values.iter().sum::<f64>() / values.len() as f64;
    let ss: f64 = values.iter().map(|&x| (x - m) * (x - m)).sum();
    Some((ss / (values.len() - 1) as f64).sqrt())
}

/// Pearson correlation over pairs where both values are finite
///
/// Returns the coefficient and the number of complete pairs used.
pub fn pearson(x: &[f64], y: &[f64]) -> (Option<f64>, usize) {
    let pairs: Vec<(f64, f64)> = x
        .iter()
        .zip(y)
        .filter(|(a, b)| a.is_finite() && b.is_finite())
        .map(|(&a, &b)| (a, b))
        .collect();
    let n = pairs.len();
    if n < 2 {
        return (None, n);
    }

    let nf = n as f64;
    let mx = pairs.iter().map(|p| p.0).sum::<f64>() / nf;
    let my = pairs.iter().map(|p| p.1).sum::<f64>() / nf;
    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for &(a, b) in &pairs {
        sxy += (a - mx) * (b - my);
        sxx += (a - mx) * (a - mx);
        syy += (b - my) * (b - my);
    }
    let denom = (sxx * syy).sqrt();
    if denom == 0.0 {
        return (None, n);
    }
    (Some(sxy / denom), n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_sorted_drops_missing() {
        let data = vec![3.0, f64::NAN, 1.0, f64::INFINITY, 2.0];
        assert_eq!(sorted(&data), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_sorted_preserves_original() {
        let data = vec![3.0, 1.0, 5.0];
        let original = data.clone();
        let _ = sorted(&data);
        assert_eq!(data, original);
    }

    #[test]
    fn test_mean_ignores_nan() {
        assert_eq!(mean(&[1.0, f64::NAN, 3.0]), Some(2.0));
        assert_eq!(mean(&[f64::NAN]), None);
    }

    #[test]
    fn test_std_dev_basic() {
        let sd = std_dev(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        assert_abs_diff_eq!(sd, 1.5811388300841898, epsilon = 1e-12);
    }

    #[test]
    fn test_std_dev_needs_two_values() {
        assert_eq!(std_dev(&[]), None);
        assert_eq!(std_dev(&[42.0]), None);
        assert_eq!(std_dev(&[42.0, f64::NAN]), None);
    }

    #[test]
    fn test_std_dev_two_elements() {
        let sd = std_dev(&[1.0, 3.0]).unwrap();
        assert_abs_diff_eq!(sd, std::f64::consts::SQRT_2, epsilon = 1e-12);
    }

    #[test]
    fn test_numerical_stability() {
        let sd = std_dev(&[1e10, 1e10 + 1.0, 1e10 + 2.0]).unwrap();
        assert_abs_diff_eq!(sd, 1.0, epsilon = 1e-8);
    }

    #[test]
    fn test_pearson_perfect() {
        let (r, n) = pearson(&[1.0, 2.0, 3.0, 4.0], &[2.0, 4.0, 6.0, 8.0]);
        assert_eq!(n, 4);
        assert_abs_diff_eq!(r.unwrap(), 1.0, epsilon = 1e-12);

        let (r, _) = pearson(&[1.0, 2.0, 3.0], &[3.0, 2.0, 1.0]);
        assert_abs_diff_eq!(r.unwrap(), -1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_pearson_pairwise_complete() {
        let (r, n) = pearson(&[1.0, f64::NAN, 3.0, 4.0], &[1.0, 2.0, f64::NAN, 4.0]);
        assert_eq!(n, 2);
        assert_abs_diff_eq!(r.unwrap(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_pearson_constant_is_undefined() {
        let (r, n) = pearson(&[1.0, 1.0, 1.0], &[1.0, 2.0, 3.0]);
        assert_eq!(n, 3);
        assert!(r.is_none());
    }
}
