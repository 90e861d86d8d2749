use crate::dataset::numeric_values;
use crate::Result;
use bass_core::ScatterSpec;
use polars::prelude::*;

pub(crate) fn scatter(df: &DataFrame, x: &str, y: &str) -> Result<ScatterSpec> {
    let xs = numeric_values(df, x)?;
    let ys = numeric_values(df, y)?;
    Ok(ScatterSpec::from_columns(x, &xs, y, &ys)?)
}
