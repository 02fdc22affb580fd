use std::fs;
use std::path::{Path, PathBuf};

use auragrid_parser::{DS_COLUMN, SOLAR_COLUMN, WIND_COLUMN};
use chrono::{DateTime, Utc};
use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::deriver::{CARBON_INTENSITY_COLUMN, LOAD_PRED_COLUMN, RENEWABLE_SHARE_COLUMN};
use crate::error::{PipelineError, Result};
use crate::frame::{ds_values, f64_values};

const DS_FORMAT: &str = "%Y-%m-%d %H:%M:%S+00:00";

/// One hour of the published forecast.
///
/// `ds` and `load_pred_mw` are always present. The regressors and derived
/// metrics are optional so the same type reads files produced by the demo
/// stub, which omits the derived fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastRecord {
    pub ds: String,
    pub load_pred_mw: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solar_mw: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wind_mw: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub renewable_share: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carbon_intensity_kg_per_mwh: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteSummary {
    pub rows: usize,
    pub path: PathBuf,
    /// BLAKE3 hex digest of the bytes written.
    pub digest: String,
}

/// Renders epoch microseconds as `YYYY-MM-DD HH:MM:SS+00:00`.
pub fn format_ds(micros: i64) -> Result<String> {
    let ts = DateTime::<Utc>::from_timestamp_micros(micros).ok_or_else(|| {
        PipelineError::InsufficientData(format!("timestamp {micros} is out of range"))
    })?;
    Ok(ts.format(DS_FORMAT).to_string())
}

/// Converts the final forecast table into records in output column order.
pub fn forecast_records(table: &DataFrame) -> Result<Vec<ForecastRecord>> {
    let ds = ds_values(table)?;
    let load = f64_values(table, LOAD_PRED_COLUMN)?;
    let solar = f64_values(table, SOLAR_COLUMN)?;
    let wind = f64_values(table, WIND_COLUMN)?;
    let share = f64_values(table, RENEWABLE_SHARE_COLUMN)?;
    let carbon = f64_values(table, CARBON_INTENSITY_COLUMN)?;

    let mut records = Vec::with_capacity(ds.len());
    for (idx, ts) in ds.iter().enumerate() {
        let load_pred_mw = load[idx].ok_or_else(|| {
            PipelineError::InsufficientData(format!(
                "row {idx} ({DS_COLUMN} {ts}) has no {LOAD_PRED_COLUMN}"
            ))
        })?;
        records.push(ForecastRecord {
            ds: format_ds(*ts)?,
            load_pred_mw,
            solar_mw: solar[idx],
            wind_mw: wind[idx],
            renewable_share: share[idx],
            carbon_intensity_kg_per_mwh: carbon[idx],
        });
    }
    Ok(records)
}

/// Writes the records as a JSON array, replacing any previous file.
///
/// The payload is serialized before the file is opened so a serialization
/// failure leaves the previous output untouched.
pub fn write_forecast(path: &Path, records: &[ForecastRecord]) -> Result<WriteSummary> {
    let bytes = serde_json::to_vec(records)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, &bytes)?;

    let digest = blake3::hash(&bytes).to_hex().to_string();
    info!(
        rows = records.len(),
        path = %path.display(),
        digest = %digest,
        "wrote forecast"
    );

    Ok(WriteSummary {
        rows: records.len(),
        path: path.to_path_buf(),
        digest,
    })
}

pub fn read_forecast(path: &Path) -> Result<Vec<ForecastRecord>> {
    let bytes = fs::read(path)?;
    let records = serde_json::from_slice(&bytes)?;
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_timestamp_with_utc_suffix() {
        // 2024-01-01 05:00:00 UTC
        let micros = 1_704_085_200_000_000;
        assert_eq!(format_ds(micros).unwrap(), "2024-01-01 05:00:00+00:00");
    }

    #[test]
    fn optional_fields_are_omitted_and_defaulted() {
        let record = ForecastRecord {
            ds: "2024-01-01 00:00:00+00:00".into(),
            load_pred_mw: 220.0,
            solar_mw: Some(0.0),
            wind_mw: Some(55.0),
            renewable_share: None,
            carbon_intensity_kg_per_mwh: None,
        };
        let json = serde_json::to_string(&record).unwrap();
        assert!(!json.contains("renewable_share"));

        let minimal: ForecastRecord =
            serde_json::from_str(r#"{"ds":"2024-01-01 00:00:00+00:00","load_pred_mw":1.5}"#)
                .unwrap();
        assert_eq!(minimal.solar_mw, None);
        assert_eq!(minimal.load_pred_mw, 1.5);
    }
}
