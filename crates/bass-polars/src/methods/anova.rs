//! Type-III ANOVA of the target on the grouping columns

use super::Prepared;
use crate::{Error, Result};
use bass_anova::{fit_type3, AnovaTable, Factor};
use bass_core::CategoryLabel;
use polars::prelude::*;
use tracing::{debug, instrument};

/// Fit on complete rows only: target present and every grouping value present
#[instrument(skip_all, fields(response = %prepared.target))]
pub(crate) fn anova_prepared(prepared: &Prepared) -> Result<AnovaTable> {
    if prepared.grouping.is_empty() {
        return Err(Error::InvalidParameter(
            "ANOVA needs at least one grouping column".to_string(),
        ));
    }

    let complete: Vec<usize> = (0..prepared.values.len())
        .filter(|&row| {
            prepared.values[row].is_finite()
                && prepared.labels.iter().all(|col| col[row].is_some())
        })
        .collect();
    debug!(
        complete = complete.len(),
        dropped = prepared.values.len() - complete.len(),
        "rows used for the fit"
    );
    if complete.is_empty() {
        return Err(bass_core::Error::analysis(
            "anova",
            format!("no complete observations of '{}'", prepared.target),
        )
        .into());
    }

    let y: Vec<f64> = complete.iter().map(|&row| prepared.values[row]).collect();
    let factors = prepared
        .grouping
        .iter()
        .zip(&prepared.labels)
        .map(|(name, col)| {
            let labels: Vec<CategoryLabel> = complete
                .iter()
                .filter_map(|&row| col[row].clone())
                .collect();
            Factor::encode(name.as_str(), &labels)
        })
        .collect::<bass_core::Result<Vec<_>>>()?;

    Ok(fit_type3(&prepared.target, &y, &factors)?)
}

/// Columns `term`, `sum_sq`, `df`, `F`, `PR(>F)`
pub fn anova_to_frame(table: &AnovaTable) -> Result<DataFrame> {
    let terms: Vec<String> = table.rows.iter().map(|r| r.term.clone()).collect();
    let sum_sq: Vec<f64> = table.rows.iter().map(|r| r.sum_sq).collect();
    let df: Vec<u64> = table.rows.iter().map(|r| r.df as u64).collect();
    let f: Vec<Option<f64>> = table.rows.iter().map(|r| r.f_value).collect();
    let p: Vec<Option<f64>> = table.rows.iter().map(|r| r.p_value).collect();

    Ok(DataFrame::new(vec![
        Series::new(PlSmallStr::from("term"), terms).into(),
        Series::new(PlSmallStr::from("sum_sq"), sum_sq).into(),
        Series::new(PlSmallStr::from("df"), df).into(),
        Series::new(PlSmallStr::from("F"), f).into(),
        Series::new(PlSmallStr::from("PR(>F)"), p).into(),
    ])?)
}
