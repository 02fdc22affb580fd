pub mod aligner;
pub mod config;
pub mod deriver;
pub mod error;
pub mod forecaster;
mod frame;
pub mod gap_fill;
pub mod outputs;
pub mod pipelines;
pub mod projector;
pub mod synthetic;

pub use config::{DataPaths, HORIZON_HOURS};
pub use error::{PipelineError, Result};
pub use forecaster::{renewable_forecaster, FittedModel, ForecastError, Forecaster};
pub use outputs::{forecast_records, read_forecast, write_forecast, ForecastRecord, WriteSummary};
pub use pipelines::{run_forecast, run_forecast_from_paths};
