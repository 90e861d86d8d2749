//! End-to-end use of the facade crate

use approx::assert_relative_eq;
use bass_stats::prelude::*;
use polars::prelude::*;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

#[test]
fn test_score_by_sex() -> anyhow::Result<()> {
    init_tracing();
    let df = df![
        "score" => [2.0, 4.0, 6.0, 8.0],
        "sex" => ["M", "M", "F", "F"],
    ]?;

    let report = df.report(&Selection::new("score").group_by("sex"))?;
    let by_sex: Vec<(String, f64, f64)> = report
        .aggregates
        .iter()
        .map(|a| (a.key.to_string(), a.mean.unwrap(), a.stderr.unwrap()))
        .collect();

    assert_eq!(by_sex[0].0, "(F)");
    assert_relative_eq!(by_sex[0].1, 7.0);
    assert_relative_eq!(by_sex[0].2, 1.0, epsilon = 1e-12);
    assert_eq!(by_sex[1].0, "(M)");
    assert_relative_eq!(by_sex[1].1, 3.0);

    let m = report.descriptives.rows[1].1.clone();
    assert_relative_eq!(m.std.unwrap(), 2f64.sqrt(), epsilon = 1e-12);

    // between MS 16, within MS 2
    let anova = report.anova.expect("grouped report has an ANOVA");
    assert_relative_eq!(anova.row("sex").unwrap().f_value.unwrap(), 8.0, epsilon = 1e-9);
    Ok(())
}

#[cfg(feature = "viz")]
#[test]
fn test_chart_renders() -> anyhow::Result<()> {
    let df = df![
        "score" => [2.0, 4.0, 6.0, 8.0, 5.0, 7.0],
        "sex" => ["M", "M", "F", "F", "M", "F"],
        "year" => [2020i64, 2021, 2020, 2021, 2021, 2020],
    ]?;
    let spec = df.bar_chart("score", &["sex", "year"], true)?;
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("bars.svg");
    render_bar_chart(&spec, &path)?;
    assert!(std::fs::read_to_string(&path)?.contains("<svg"));
    Ok(())
}
