use std::collections::HashMap;

use auragrid_parser::{DS_COLUMN, MICROS_PER_HOUR, SOLAR_COLUMN, WIND_COLUMN};
use polars::prelude::*;
use tracing::debug;

use crate::error::{PipelineError, Result};
use crate::frame::{ds_column, ds_values, f64_column, f64_values};
use crate::gap_fill::{backward_fill, forward_fill};

/// Extends the aligned history by `horizon_hours` hourly timestamps and
/// carries the last known regressor values across the appended rows.
///
/// Output columns: `ds`, `solar_mw`, `wind_mw`, one row per historical hour
/// followed by the horizon.
pub fn build_future_frame(history: &DataFrame, horizon_hours: usize) -> Result<DataFrame> {
    let history_ds = ds_values(history)?;
    let Some(&last) = history_ds.iter().max() else {
        return Err(PipelineError::InsufficientData(
            "cannot project an empty history".into(),
        ));
    };

    let mut timestamps = history_ds.clone();
    timestamps.extend((1..=horizon_hours as i64).map(|step| last + step * MICROS_PER_HOUR));

    let solar = project_regressor(history, &history_ds, &timestamps, SOLAR_COLUMN)?;
    let wind = project_regressor(history, &history_ds, &timestamps, WIND_COLUMN)?;

    debug!(
        history_rows = history_ds.len(),
        horizon_hours,
        rows = timestamps.len(),
        "built future frame"
    );

    let future = DataFrame::new(vec![
        ds_column(timestamps)?,
        f64_column(SOLAR_COLUMN, solar),
        f64_column(WIND_COLUMN, wind),
    ])?;
    Ok(future)
}

fn project_regressor(
    history: &DataFrame,
    history_ds: &[i64],
    timestamps: &[i64],
    name: &str,
) -> Result<Vec<Option<f64>>> {
    let known: HashMap<i64, Option<f64>> = history_ds
        .iter()
        .copied()
        .zip(f64_values(history, name)?)
        .collect();

    let mut values: Vec<Option<f64>> = timestamps
        .iter()
        .map(|ts| known.get(ts).copied().flatten())
        .collect();
    forward_fill(&mut values);
    backward_fill(&mut values);
    Ok(values)
}
