use crate::{padded, Error, Result, CHART_SIZE};
use bass_core::BarChartSpec;
use plotters::prelude::*;
use std::path::Path;
use tracing::{debug, instrument};

/// Share of a category slot covered by its bars
const GROUP_WIDTH: f64 = 0.8;

/// Grouped bars with standard-error whiskers, one colour per series
///
/// Category `i` is centred on x = i; with several series the slot is split
/// evenly between them in series order.
#[instrument(skip_all, fields(path = %path.as_ref().display(), title = %spec.title))]
pub fn render_bar_chart(spec: &BarChartSpec, path: impl AsRef<Path>) -> Result<()> {
    let (lo, hi) = spec
        .value_range()
        .ok_or_else(|| Error::Empty(format!("'{}' has no bars", spec.title)))?;
    // bars grow from zero, so zero is always in view
    let y_range = padded(lo.min(0.0), hi.max(0.0));
    let n = spec.categories.len();

    let root = SVGBackend::new(path.as_ref(), CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(&spec.title, ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(-0.5..(n as f64 - 0.5), y_range)?;

    let categories = &spec.categories;
    let category_at = |x: &f64| {
        let i = x.round();
        if (x - i).abs() < 1e-9 && i >= 0.0 && (i as usize) < n {
            categories[i as usize].to_string()
        } else {
            String::new()
        }
    };
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(n)
        .x_label_formatter(&category_at)
        .x_desc(spec.x_label.as_str())
        .y_desc(spec.y_label.as_str())
        .draw()?;

    let width = GROUP_WIDTH / spec.series.len().max(1) as f64;
    for (s, series) in spec.series.iter().enumerate() {
        let color = Palette99::pick(s).to_rgba();
        let bars: Vec<(f64, f64, Option<f64>)> = series
            .points
            .iter()
            .enumerate()
            .filter_map(|(i, p)| {
                p.map(|p| {
                    let left = i as f64 - GROUP_WIDTH / 2.0 + s as f64 * width;
                    (left, p.mean, p.stderr)
                })
            })
            .collect();

        let drawn = chart.draw_series(bars.iter().map(|&(left, mean, _)| {
            Rectangle::new([(left, 0.0), (left + width, mean)], color.filled())
        }))?;
        if let Some(name) = &series.name {
            drawn
                .label(name.to_string())
                .legend(move |(x, y)| {
                    Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled())
                });
        }

        chart.draw_series(bars.iter().filter_map(|&(left, mean, stderr)| {
            stderr.map(|e| {
                ErrorBar::new_vertical(left + width / 2.0, mean - e, mean, mean + e, BLACK, 8)
            })
        }))?;
    }

    if spec.legend_title.is_some() {
        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;
    }

    root.present()?;
    debug!(bars = spec.bars().count(), "bar chart written");
    Ok(())
}
