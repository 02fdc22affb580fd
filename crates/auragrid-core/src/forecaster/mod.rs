//! Forecasting capability used by the pipeline.
//!
//! The pipeline only relies on the two traits below: a [`Forecaster`] is fit on
//! the aligned history and yields a [`FittedModel`] that predicts one point
//! estimate per row of a future frame. Any regression backend that accepts the
//! registered exogenous regressors can be swapped in.

mod ols;
mod seasonal;

use polars::prelude::{DataFrame, PolarsError};
use thiserror::Error;

pub use seasonal::{SeasonalRegression, SeasonalRegressionModel};

#[derive(Debug, Error)]
pub enum ForecastError {
    #[error("need at least {needed} observations with a target value, got {got}")]
    InsufficientData { needed: usize, got: usize },

    #[error("frame is missing regressor column '{0}'")]
    MissingRegressor(String),

    #[error("regressor '{name}' has no value at row {row}")]
    MissingRegressorValue { name: String, row: usize },

    #[error("row {row} has no timestamp")]
    MissingTimestamp { row: usize },

    #[error("normal equations could not be solved; the design matrix is singular")]
    Singular,

    #[error("Polars operation failed: {0}")]
    Polars(#[from] PolarsError),
}

/// A model fitted on history, able to predict `yhat` for arbitrary timestamps.
pub trait FittedModel {
    /// Regressor columns the future frame must provide.
    fn regressors(&self) -> &[String];

    /// One point estimate per row of `future` (columns `ds` plus every regressor).
    fn predict(&self, future: &DataFrame) -> Result<Vec<f64>, ForecastError>;
}

pub trait Forecaster {
    fn name(&self) -> &'static str;

    /// Regressors registered before fitting; the fitted model requires the same set.
    fn regressors(&self) -> &[String];

    /// Fits on rows of `history` (`ds`, `y`, regressors) that have a target value.
    fn fit(&self, history: &DataFrame) -> Result<Box<dyn FittedModel>, ForecastError>;
}

/// The production model: [`SeasonalRegression`] with solar and wind registered.
pub fn renewable_forecaster() -> SeasonalRegression {
    SeasonalRegression::new()
        .add_regressor(auragrid_parser::SOLAR_COLUMN)
        .add_regressor(auragrid_parser::WIND_COLUMN)
}
