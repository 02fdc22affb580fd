// crates/auragrid-core/src/error.rs

use auragrid_parser::ParserError;
use thiserror::Error;

use crate::forecaster::ForecastError;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Input data format error: {0}")]
    DataFormat(#[from] ParserError),

    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error("Forecast model error: {0}")]
    Forecast(#[from] ForecastError),

    #[error("Polars operation failed: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
