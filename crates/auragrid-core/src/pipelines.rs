use auragrid_parser::{
    read_load_series, read_renewable_series, DS_COLUMN, SOLAR_COLUMN, WIND_COLUMN,
};
use polars::prelude::*;
use tracing::info;

use crate::aligner::align_history;
use crate::config::DataPaths;
use crate::deriver::{
    derive_metrics, CARBON_INTENSITY_COLUMN, LOAD_PRED_COLUMN, RENEWABLE_SHARE_COLUMN,
};
use crate::error::Result;
use crate::forecaster::Forecaster;
use crate::projector::build_future_frame;

/// Output columns of the final forecast table, in write order.
pub const OUTPUT_COLUMNS: [&str; 6] = [
    DS_COLUMN,
    LOAD_PRED_COLUMN,
    SOLAR_COLUMN,
    WIND_COLUMN,
    RENEWABLE_SHARE_COLUMN,
    CARBON_INTENSITY_COLUMN,
];

/// Runs align, fit, project, predict and derive over already-parsed series.
///
/// Returns one row per historical hour plus `horizon_hours` future rows with
/// the columns listed in [`OUTPUT_COLUMNS`].
pub fn run_forecast(
    load: &DataFrame,
    renewables: &DataFrame,
    horizon_hours: usize,
    forecaster: &dyn Forecaster,
) -> Result<DataFrame> {
    let history = align_history(load, renewables)?;

    let model = forecaster.fit(&history)?;
    info!(
        model = forecaster.name(),
        regressors = ?model.regressors(),
        history_rows = history.height(),
        "fitted forecaster"
    );

    let future = build_future_frame(&history, horizon_hours)?;
    let yhat = model.predict(&future)?;

    let mut predicted = future;
    predicted.hstack_mut(&mut [Series::new(LOAD_PRED_COLUMN.into(), yhat).into()])?;

    let derived = derive_metrics(&predicted)?;
    let table = derived.select(OUTPUT_COLUMNS)?;

    info!(
        history_rows = history.height(),
        horizon_hours,
        rows = table.height(),
        "forecast table ready"
    );
    Ok(table)
}

/// Loads both input files from `paths` and runs [`run_forecast`].
pub fn run_forecast_from_paths(
    paths: &DataPaths,
    horizon_hours: usize,
    forecaster: &dyn Forecaster,
) -> Result<DataFrame> {
    let load = read_load_series(&paths.load)?;
    let renewables = read_renewable_series(&paths.renewables)?;
    run_forecast(&load, &renewables, horizon_hours, forecaster)
}
