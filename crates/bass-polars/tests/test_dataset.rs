//! Tests for dataset loading, configuration and the summary pages

mod common;

use approx::assert_relative_eq;
use bass_polars::{load_csv, DashboardConfig, DatasetInfo, Error, ReportExt, Selection, OVERALL};
use std::io::Write;

const CSV: &str = "\
id,quest,gender_c,version,bass_subtotal,bass_phonemes_total,bass_notes_text
1,30,F,v1,10,4,ok
2,30,M,v2,12,5,
3,36,F,v1,14,6,fine
4,36,M,v2,16,,
5,36,F,v2,,7,late
";

fn write_csv() -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(CSV.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_and_report_from_csv() -> anyhow::Result<()> {
    let file = write_csv();
    let df = load_csv(file.path())?;
    assert_eq!(DatasetInfo::of(&df), DatasetInfo { rows: 5, columns: 7 });

    let config = DashboardConfig::default();
    assert_eq!(
        config.analysis_variables(&df),
        vec!["bass_subtotal".to_string(), "bass_phonemes_total".to_string()]
    );

    let report = df.report(&Selection::new("bass_subtotal").group_by("quest"))?;
    let first = &report.descriptives.rows[0];
    assert_eq!(first.0.to_string(), "(30)");
    assert_eq!(first.1.count, 2);
    assert_relative_eq!(first.1.mean.unwrap(), 11.0);
    Ok(())
}

#[test]
fn test_missing_file_is_io_error() {
    assert!(matches!(
        load_csv("/definitely/not/here.csv"),
        Err(Error::Io(_))
    ));
}

#[test]
fn test_config_from_json_file() -> anyhow::Result<()> {
    let mut file = tempfile::NamedTempFile::new()?;
    file.write_all(br#"{ "summary_group_by": "gender_c", "excluded_fragments": [] }"#)?;
    let config = DashboardConfig::from_json_file(file.path())?;
    assert_eq!(config.summary_group_by, "gender_c");
    assert!(config.is_analysis_variable("bass_notes_text"));
    assert_eq!(config.variable_prefix, "bass");
    Ok(())
}

#[test]
fn test_summary_table() -> anyhow::Result<()> {
    let file = write_csv();
    let df = load_csv(file.path())?;
    let table = df.summary_table(&["bass_subtotal", "bass_phonemes_total"], "gender_c")?;

    assert_eq!(table.n_overall, 5);
    assert_eq!(table.n_by_group, vec![3, 2]);
    assert_eq!(table.rows[0].missing, 1);
    assert_eq!(table.rows[0].overall, "13.00 (2.58)");
    assert_eq!(table.rows[0].by_group[0], "12.00 (2.83)");

    let frame = table.to_frame()?;
    assert_eq!(frame.height(), 3);
    assert!(frame.column(OVERALL).is_ok());
    assert!(frame.column("gender_c=F").is_ok());
    assert!(frame.column("gender_c=M").is_ok());
    Ok(())
}

#[test]
fn test_scatter_uses_complete_pairs() -> anyhow::Result<()> {
    let file = write_csv();
    let df = load_csv(file.path())?;
    let spec = df.scatter("bass_subtotal", "bass_phonemes_total")?;
    assert_eq!(spec.n, 3);
    assert_relative_eq!(spec.pearson_r.unwrap(), 1.0, epsilon = 1e-12);
    assert_eq!(spec.title, "bass_subtotal vs bass_phonemes_total");
    Ok(())
}
