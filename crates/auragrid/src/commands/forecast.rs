use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use auragrid_core::synthetic::build_stub_dataset;
use auragrid_core::{
    forecast_records, renewable_forecaster, run_forecast_from_paths, write_forecast, DataPaths,
    ForecastRecord, HORIZON_HOURS,
};
use chrono::Utc;
use clap::Args;
use tracing::{info, warn};

#[derive(Args, Debug)]
pub struct ForecastArgs {
    /// Directory holding load.csv and renewables.csv; forecast.json is written here
    #[arg(long, default_value = "data")]
    pub data_dir: PathBuf,
    /// Write the synthetic demo forecast even when input data is present
    #[arg(long)]
    pub demo: bool,
}

pub fn handle_forecast_command(args: ForecastArgs) -> Result<()> {
    let paths = DataPaths::in_dir(&args.data_dir);
    let records = select_records(&paths, args.demo)?;

    let summary = write_forecast(&paths.forecast, &records)
        .with_context(|| format!("failed to write {}", paths.forecast.display()))?;

    println!(
        "Wrote {} points to {}",
        summary.rows,
        display_path(&summary.path).display()
    );
    Ok(())
}

fn select_records(paths: &DataPaths, demo: bool) -> Result<Vec<ForecastRecord>> {
    if demo {
        info!(hours = HORIZON_HOURS, "writing demo forecast");
        return Ok(build_stub_dataset(Utc::now(), HORIZON_HOURS));
    }

    let missing = paths.missing_inputs();
    if !missing.is_empty() {
        warn!(
            missing = ?missing,
            "input data not found, falling back to demo forecast"
        );
        return Ok(build_stub_dataset(Utc::now(), HORIZON_HOURS));
    }

    let forecaster = renewable_forecaster();
    let table = run_forecast_from_paths(paths, HORIZON_HOURS, &forecaster)
        .context("forecast pipeline failed")?;
    Ok(forecast_records(&table)?)
}

/// Shows `path` relative to the working directory when it lies beneath it.
fn display_path(path: &Path) -> PathBuf {
    if path.is_relative() {
        return path.to_path_buf();
    }
    std::env::current_dir()
        .ok()
        .and_then(|cwd| path.strip_prefix(cwd).ok().map(Path::to_path_buf))
        .unwrap_or_else(|| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_paths_are_shown_unchanged() {
        let path = Path::new("data/forecast.json");
        assert_eq!(display_path(path), PathBuf::from("data/forecast.json"));
    }

    #[test]
    fn paths_under_working_directory_are_shortened() {
        let cwd = std::env::current_dir().unwrap();
        let path = cwd.join("data").join("forecast.json");
        assert_eq!(display_path(&path), PathBuf::from("data/forecast.json"));
    }

    #[test]
    fn missing_inputs_fall_back_to_demo() {
        let dir = std::env::temp_dir().join("auragrid-missing-inputs-check");
        let paths = DataPaths::in_dir(&dir);
        let records = select_records(&paths, false).unwrap();
        assert_eq!(records.len(), HORIZON_HOURS);
        assert!(records.iter().all(|r| r.carbon_intensity_kg_per_mwh.is_none()));
    }
}
