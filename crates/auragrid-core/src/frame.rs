use auragrid_parser::{ds_dtype, DS_COLUMN, MICROS_PER_HOUR};
use polars::prelude::*;

use crate::error::{PipelineError, Result};

/// Timestamps of the `ds` column as epoch microseconds. A null timestamp is an error.
pub(crate) fn ds_values(df: &DataFrame) -> Result<Vec<i64>> {
    let ds = df
        .column(DS_COLUMN)?
        .as_materialized_series()
        .datetime()?;
    let mut values = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        let value = ds.get(idx).ok_or_else(|| {
            PipelineError::InsufficientData(format!("row {idx} has no timestamp"))
        })?;
        values.push(value);
    }
    Ok(values)
}

pub(crate) fn f64_values(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
    let values = df.column(name)?.f64()?;
    Ok(values.into_iter().collect())
}

pub(crate) fn ds_column(values: Vec<i64>) -> Result<Column> {
    let series = Series::new(DS_COLUMN.into(), values).cast(&ds_dtype())?;
    Ok(series.into())
}

pub(crate) fn f64_column(name: &str, values: Vec<Option<f64>>) -> Column {
    Series::new(name.into(), values).into()
}

/// Every hour from `start` to `end` inclusive.
pub(crate) fn hourly_range(start: i64, end: i64) -> Vec<i64> {
    (start..=end).step_by(MICROS_PER_HOUR as usize).collect()
}
