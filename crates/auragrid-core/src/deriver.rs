use auragrid_parser::{SOLAR_COLUMN, WIND_COLUMN};
use polars::prelude::*;

use crate::config::{CARBON_BASELINE_KG_PER_MWH, CARBON_MIN_KG_PER_MWH};
use crate::error::Result;

pub const LOAD_PRED_COLUMN: &str = "load_pred_mw";
pub const RENEWABLE_SHARE_COLUMN: &str = "renewable_share";
pub const CARBON_INTENSITY_COLUMN: &str = "carbon_intensity_kg_per_mwh";

/// Fraction of predicted load covered by solar and wind, clamped to [0, 1].
/// Zero whenever the predicted load is not positive.
pub fn renewable_share(load_pred_mw: f64, solar_mw: f64, wind_mw: f64) -> f64 {
    if load_pred_mw.is_nan() || load_pred_mw <= 0.0 {
        return 0.0;
    }
    let share = (solar_mw + wind_mw) / load_pred_mw;
    if share.is_nan() {
        return 0.0;
    }
    share.clamp(0.0, 1.0)
}

/// Heuristic carbon-intensity signal in kg CO2 per MWh.
///
/// Linear between the baseline (no renewables) and the floor (fully renewable),
/// rounded to two decimals. This is not a calibrated emissions model.
pub fn carbon_intensity(share: f64) -> f64 {
    let share = if share.is_nan() { 0.0 } else { share.clamp(0.0, 1.0) };
    let value = CARBON_MIN_KG_PER_MWH
        + (CARBON_BASELINE_KG_PER_MWH - CARBON_MIN_KG_PER_MWH) * (1.0 - share);
    round2(value)
}

/// Appends `renewable_share` and `carbon_intensity_kg_per_mwh` computed from
/// `load_pred_mw`, `solar_mw` and `wind_mw`.
pub fn derive_metrics(df: &DataFrame) -> Result<DataFrame> {
    let load = df.column(LOAD_PRED_COLUMN)?.f64()?;
    let solar = df.column(SOLAR_COLUMN)?.f64()?;
    let wind = df.column(WIND_COLUMN)?.f64()?;

    let len = df.height();
    let mut shares = Vec::with_capacity(len);
    let mut intensities = Vec::with_capacity(len);
    for idx in 0..len {
        let share = renewable_share(
            load.get(idx).unwrap_or(0.0),
            solar.get(idx).unwrap_or(0.0),
            wind.get(idx).unwrap_or(0.0),
        );
        shares.push(share);
        intensities.push(carbon_intensity(share));
    }

    let mut output = df.clone();
    output.hstack_mut(&mut [
        Series::new(RENEWABLE_SHARE_COLUMN.into(), shares).into(),
        Series::new(CARBON_INTENSITY_COLUMN.into(), intensities).into(),
    ])?;
    Ok(output)
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
