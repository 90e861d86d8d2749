//! SVG rendering of report charts
//!
//! Turns the chart layouts produced by `bass-core` into SVG files with
//! plotters. Layout decisions (sorting, axis roles, swap) are already made in
//! the spec types; this crate only draws them.

mod bar;
mod error;
mod scatter;

pub use bar::render_bar_chart;
pub use error::{Error, Result};
pub use scatter::render_scatter;

/// Size of every rendered chart in pixels
pub const CHART_SIZE: (u32, u32) = (1024, 640);

/// Pad a value range so marks do not touch the frame
pub(crate) fn padded(lo: f64, hi: f64) -> std::ops::Range<f64> {
    let span = hi - lo;
    if span <= f64::EPSILON {
        return (lo - 1.0)..(hi + 1.0);
    }
    (lo - span * 0.05)..(hi + span * 0.05)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_padded_range() {
        let r = padded(0.0, 10.0);
        assert!((r.start + 0.5).abs() < 1e-12);
        assert!((r.end - 10.5).abs() < 1e-12);

        let flat = padded(3.0, 3.0);
        assert_eq!(flat, 2.0..4.0);
    }
}
