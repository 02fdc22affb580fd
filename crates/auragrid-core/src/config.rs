use std::path::{Path, PathBuf};

/// Hours forecast past the last observed timestamp.
pub const HORIZON_HOURS: usize = 48;

/// Carbon intensity of a fully renewable hour (kg CO2 / MWh).
pub const CARBON_MIN_KG_PER_MWH: f64 = 80.0;
/// Carbon intensity of an hour with no renewable supply (kg CO2 / MWh).
pub const CARBON_BASELINE_KG_PER_MWH: f64 = 450.0;

pub const LOAD_FILE_NAME: &str = "load.csv";
pub const RENEWABLES_FILE_NAME: &str = "renewables.csv";
pub const FORECAST_FILE_NAME: &str = "forecast.json";

/// Fixed input and output locations inside a data directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPaths {
    pub load: PathBuf,
    pub renewables: PathBuf,
    pub forecast: PathBuf,
}

impl DataPaths {
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            load: dir.join(LOAD_FILE_NAME),
            renewables: dir.join(RENEWABLES_FILE_NAME),
            forecast: dir.join(FORECAST_FILE_NAME),
        }
    }

    pub fn missing_inputs(&self) -> Vec<&Path> {
        [self.load.as_path(), self.renewables.as_path()]
            .into_iter()
            .filter(|path| !path.is_file())
            .collect()
    }

    pub fn inputs_present(&self) -> bool {
        self.missing_inputs().is_empty()
    }
}
