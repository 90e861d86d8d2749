use crate::{padded, Error, Result, CHART_SIZE};
use bass_core::ScatterSpec;
use plotters::prelude::*;
use std::path::Path;
use tracing::{debug, instrument};

/// Scatterplot with Pearson r in the caption
#[instrument(skip_all, fields(path = %path.as_ref().display(), title = %spec.title))]
pub fn render_scatter(spec: &ScatterSpec, path: impl AsRef<Path>) -> Result<()> {
    if spec.points.is_empty() {
        return Err(Error::Empty(format!("'{}' has no complete pairs", spec.title)));
    }
    let (x_lo, x_hi) = extent(spec.points.iter().map(|p| p.0));
    let (y_lo, y_hi) = extent(spec.points.iter().map(|p| p.1));

    let caption = match spec.pearson_r {
        Some(r) => format!("{} (r = {r:.2}, n = {})", spec.title, spec.n),
        None => format!("{} (n = {})", spec.title, spec.n),
    };

    let root = SVGBackend::new(path.as_ref(), CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(caption, ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(padded(x_lo, x_hi), padded(y_lo, y_hi))?;
    chart
        .configure_mesh()
        .x_desc(spec.x_label.as_str())
        .y_desc(spec.y_label.as_str())
        .draw()?;

    chart.draw_series(
        spec.points
            .iter()
            .map(|&(x, y)| Circle::new((x, y), 3, BLUE.mix(0.6).filled())),
    )?;

    root.present()?;
    debug!(points = spec.n, "scatterplot written");
    Ok(())
}

fn extent(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    })
}
