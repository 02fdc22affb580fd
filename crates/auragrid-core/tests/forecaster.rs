use std::f64::consts::PI;

use anyhow::Result;
use auragrid_core::forecaster::{renewable_forecaster, ForecastError, Forecaster};
use auragrid_parser::{ds_dtype, MICROS_PER_HOUR};
use polars::prelude::*;

// 2024-03-01 00:00:00 UTC
const START_MICROS: i64 = 1_709_251_200_000_000;

fn solar(h: i64) -> f64 {
    (40.0 * (2.0 * PI * (h - 6) as f64 / 24.0).sin()).max(0.0)
}

fn wind(h: i64) -> f64 {
    300.0 + 40.0 * ((h * 7) % 11) as f64 / 11.0
}

fn exact_target(h: i64) -> f64 {
    500.0 + 2.0 * solar(h) + 3.0 * wind(h)
}

fn frame(hours: i64, target: impl Fn(i64) -> Option<f64>) -> Result<DataFrame> {
    frame_with_solar(hours, target, |h| Some(solar(h)))
}

fn frame_with_solar(
    hours: i64,
    target: impl Fn(i64) -> Option<f64>,
    solar_at: impl Fn(i64) -> Option<f64>,
) -> Result<DataFrame> {
    let ds = Series::new(
        "ds".into(),
        (0..hours)
            .map(|h| START_MICROS + h * MICROS_PER_HOUR)
            .collect::<Vec<_>>(),
    )
    .cast(&ds_dtype())?;
    let df = DataFrame::new(vec![
        ds.into(),
        Series::new("y".into(), (0..hours).map(&target).collect::<Vec<_>>()).into(),
        Series::new("solar_mw".into(), (0..hours).map(&solar_at).collect::<Vec<_>>()).into(),
        Series::new("wind_mw".into(), (0..hours).map(wind).collect::<Vec<_>>()).into(),
    ])?;
    Ok(df)
}

#[test]
fn recovers_regressor_driven_target() -> Result<()> {
    let history = frame(72, |h| Some(exact_target(h)))?;
    let model = renewable_forecaster().fit(&history)?;

    let yhat = model.predict(&history)?;
    assert_eq!(yhat.len(), 72);
    for (h, value) in yhat.iter().enumerate() {
        let expected = exact_target(h as i64);
        assert!(
            (value - expected).abs() < 1e-3,
            "hour {h}: predicted {value}, expected {expected}"
        );
    }
    Ok(())
}

#[test]
fn rows_without_target_are_skipped_but_predicted() -> Result<()> {
    let history = frame(72, |h| (h != 30).then(|| exact_target(h)))?;
    let model = renewable_forecaster().fit(&history)?;

    let yhat = model.predict(&history)?;
    assert!((yhat[30] - exact_target(30)).abs() < 1e-3);
    Ok(())
}

#[test]
fn identical_inputs_give_identical_predictions() -> Result<()> {
    let history = frame(96, |h| Some(exact_target(h) + (h % 3) as f64))?;
    let first = renewable_forecaster().fit(&history)?.predict(&history)?;
    let second = renewable_forecaster().fit(&history)?.predict(&history)?;
    assert_eq!(first, second);
    Ok(())
}

#[test]
fn fewer_than_two_targets_is_insufficient() -> Result<()> {
    let history = frame(24, |h| (h == 0).then_some(100.0))?;
    let err = renewable_forecaster().fit(&history).err().expect("fit must fail");
    assert!(matches!(
        err,
        ForecastError::InsufficientData { needed: 2, got: 1 }
    ));
    Ok(())
}

#[test]
fn future_frame_without_regressor_is_rejected() -> Result<()> {
    let history = frame(48, |h| Some(exact_target(h)))?;
    let model = renewable_forecaster().fit(&history)?;

    let future = history.drop("wind_mw")?;
    let err = model.predict(&future).expect_err("wind is required");
    assert!(matches!(err, ForecastError::MissingRegressor(name) if name == "wind_mw"));
    Ok(())
}

#[test]
fn null_regressor_on_training_row_is_rejected() -> Result<()> {
    let history = frame_with_solar(
        48,
        |h| Some(exact_target(h)),
        |h| (h != 5).then(|| solar(h)),
    )?;

    let err = renewable_forecaster().fit(&history).err().expect("fit must fail");
    assert!(matches!(
        err,
        ForecastError::MissingRegressorValue { ref name, row: 5 } if name == "solar_mw"
    ));
    Ok(())
}

#[test]
fn registered_regressors_carry_into_the_model() -> Result<()> {
    let forecaster = renewable_forecaster();
    assert_eq!(forecaster.name(), "seasonal_regression");
    assert_eq!(forecaster.regressors(), ["solar_mw", "wind_mw"]);

    let model = forecaster.fit(&frame(24, |h| Some(exact_target(h)))?)?;
    assert_eq!(model.regressors(), forecaster.regressors());
    Ok(())
}
