use std::f64::consts::PI;

use auragrid_parser::{DS_COLUMN, TARGET_COLUMN};
use polars::prelude::DataFrame;
use tracing::debug;

use super::ols::fit_least_squares;
use super::{FittedModel, ForecastError, Forecaster};

const MICROS_PER_DAY: f64 = 86_400.0 * 1_000_000.0;

const DAILY_PERIOD_DAYS: f64 = 1.0;
const DAILY_FOURIER_ORDER: usize = 4;
const WEEKLY_PERIOD_DAYS: f64 = 7.0;
const WEEKLY_FOURIER_ORDER: usize = 3;

/// Additive trend + seasonality + exogenous regressor model fit by least squares.
///
/// `yhat = intercept + k * t + daily + weekly + sum(beta_r * z_r)` where `t` is
/// time scaled to [0, 1] over the training span, the seasonal terms are Fourier
/// series on days since the epoch and `z_r` is each regressor standardized with
/// its training mean and standard deviation. Daily seasonality is enabled once
/// the history covers two days, weekly once it covers two weeks.
#[derive(Debug, Clone, Default)]
pub struct SeasonalRegression {
    regressors: Vec<String>,
}

impl SeasonalRegression {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an exogenous regressor column. Registration order is the
    /// coefficient order.
    pub fn add_regressor(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        if !self.regressors.contains(&name) {
            self.regressors.push(name);
        }
        self
    }
}

impl Forecaster for SeasonalRegression {
    fn name(&self) -> &'static str {
        "seasonal_regression"
    }

    fn regressors(&self) -> &[String] {
        &self.regressors
    }

    fn fit(&self, history: &DataFrame) -> Result<Box<dyn FittedModel>, ForecastError> {
        let ds = timestamps(history)?;
        let y = history.column(TARGET_COLUMN)?.f64()?;
        let columns = regressor_columns(history, &self.regressors)?;

        let mut train_ts = Vec::new();
        let mut train_y = Vec::new();
        let mut train_x: Vec<Vec<f64>> = vec![Vec::new(); self.regressors.len()];

        for (row, ts) in ds.iter().enumerate() {
            let Some(target) = y.get(row) else {
                continue;
            };
            if !target.is_finite() {
                continue;
            }
            for ((slot, name), values) in train_x.iter_mut().zip(&self.regressors).zip(&columns) {
                let value = values[row].ok_or_else(|| ForecastError::MissingRegressorValue {
                    name: name.clone(),
                    row,
                })?;
                slot.push(value);
            }
            train_ts.push(*ts);
            train_y.push(target);
        }

        if train_y.len() < 2 {
            return Err(ForecastError::InsufficientData {
                needed: 2,
                got: train_y.len(),
            });
        }

        let t_start = train_ts.iter().copied().min().unwrap_or_default();
        let t_end = train_ts.iter().copied().max().unwrap_or_default();
        let t_span = if t_end > t_start {
            (t_end - t_start) as f64
        } else {
            MICROS_PER_DAY / 24.0
        };
        let span_days = (t_end - t_start) as f64 / MICROS_PER_DAY;

        let scales = train_x
            .iter()
            .map(|values| RegressorScale::from_values(values))
            .collect::<Vec<_>>();

        let mut model = SeasonalRegressionModel {
            t_start,
            t_span,
            daily: span_days >= 2.0,
            weekly: span_days >= 14.0,
            scales,
            regressors: self.regressors.clone(),
            beta: Vec::new(),
        };

        let mut row_values = vec![0.0; self.regressors.len()];
        let rows: Vec<Vec<f64>> = train_ts
            .iter()
            .enumerate()
            .map(|(idx, ts)| {
                for (slot, values) in row_values.iter_mut().zip(&train_x) {
                    *slot = values[idx];
                }
                model.design_row(*ts, &row_values)
            })
            .collect();

        model.beta = fit_least_squares(&rows, &train_y).ok_or(ForecastError::Singular)?;

        debug!(
            model = self.name(),
            observations = train_y.len(),
            parameters = model.beta.len(),
            daily = model.daily,
            weekly = model.weekly,
            "fitted forecast model"
        );

        Ok(Box::new(model))
    }
}

#[derive(Debug, Clone)]
struct RegressorScale {
    mean: f64,
    std: f64,
}

impl RegressorScale {
    fn from_values(values: &[f64]) -> Self {
        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let std = if values.len() > 1 {
            let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
            var.sqrt()
        } else {
            0.0
        };
        Self {
            mean,
            std: if std > 0.0 && std.is_finite() { std } else { 1.0 },
        }
    }

    fn standardize(&self, value: f64) -> f64 {
        (value - self.mean) / self.std
    }
}

/// Fitted coefficients of [`SeasonalRegression`].
#[derive(Debug, Clone)]
pub struct SeasonalRegressionModel {
    t_start: i64,
    t_span: f64,
    daily: bool,
    weekly: bool,
    scales: Vec<RegressorScale>,
    regressors: Vec<String>,
    beta: Vec<f64>,
}

impl SeasonalRegressionModel {
    pub fn coefficients(&self) -> &[f64] {
        &self.beta
    }

    fn design_row(&self, ts: i64, regressor_values: &[f64]) -> Vec<f64> {
        let t = (ts - self.t_start) as f64 / self.t_span;
        let days = ts as f64 / MICROS_PER_DAY;

        let mut row = Vec::with_capacity(
            2 + 2 * (DAILY_FOURIER_ORDER + WEEKLY_FOURIER_ORDER) + regressor_values.len(),
        );
        row.push(1.0);
        row.push(t);
        if self.daily {
            push_fourier_terms(&mut row, days, DAILY_PERIOD_DAYS, DAILY_FOURIER_ORDER);
        }
        if self.weekly {
            push_fourier_terms(&mut row, days, WEEKLY_PERIOD_DAYS, WEEKLY_FOURIER_ORDER);
        }
        for (scale, value) in self.scales.iter().zip(regressor_values) {
            row.push(scale.standardize(*value));
        }
        row
    }
}

impl FittedModel for SeasonalRegressionModel {
    fn regressors(&self) -> &[String] {
        &self.regressors
    }

    fn predict(&self, future: &DataFrame) -> Result<Vec<f64>, ForecastError> {
        let ds = timestamps(future)?;
        let columns = regressor_columns(future, &self.regressors)?;

        let mut row_values = vec![0.0; self.regressors.len()];
        let mut predictions = Vec::with_capacity(ds.len());
        for (row, ts) in ds.iter().enumerate() {
            for ((slot, name), values) in
                row_values.iter_mut().zip(&self.regressors).zip(&columns)
            {
                *slot = values[row].ok_or_else(|| ForecastError::MissingRegressorValue {
                    name: name.clone(),
                    row,
                })?;
            }
            let features = self.design_row(*ts, &row_values);
            let yhat = features
                .iter()
                .zip(&self.beta)
                .map(|(x, b)| x * b)
                .sum::<f64>();
            predictions.push(yhat);
        }

        Ok(predictions)
    }
}

fn push_fourier_terms(row: &mut Vec<f64>, days: f64, period: f64, order: usize) {
    for k in 1..=order {
        let angle = 2.0 * PI * k as f64 * days / period;
        row.push(angle.sin());
        row.push(angle.cos());
    }
}

fn timestamps(df: &DataFrame) -> Result<Vec<i64>, ForecastError> {
    let ds = df.column(DS_COLUMN)?.as_materialized_series().datetime()?;
    let mut values = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        let ts = ds
            .get(idx)
            .ok_or(ForecastError::MissingTimestamp { row: idx })?;
        values.push(ts);
    }
    Ok(values)
}

fn regressor_columns(
    df: &DataFrame,
    regressors: &[String],
) -> Result<Vec<Vec<Option<f64>>>, ForecastError> {
    regressors
        .iter()
        .map(|name| -> Result<Vec<Option<f64>>, ForecastError> {
            let column = df
                .column(name)
                .map_err(|_| ForecastError::MissingRegressor(name.clone()))?;
            Ok(column.f64()?.into_iter().collect())
        })
        .collect()
}
