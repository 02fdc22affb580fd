use std::fs;
use std::path::PathBuf;

use chrono::NaiveDateTime;

use crate::errors::ParserError;
use crate::formats::{coerce_f64, floor_to_hour, parse_utc_timestamp};
use crate::model::{SourceKind, DS_COLUMN, SOLAR_COLUMN, TARGET_COLUMN, WIND_COLUMN};
use crate::{parse_load_series, parse_renewable_series, read_load_series};

fn fixture_path(path: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/data")
        .join(path)
}

fn fixture(path: &str) -> String {
    let full_path = fixture_path(path);
    fs::read_to_string(&full_path)
        .unwrap_or_else(|err| panic!("failed to read fixture {}: {}", full_path.display(), err))
}

fn micros(ts: &str) -> i64 {
    NaiveDateTime::parse_from_str(ts, "%Y-%m-%d %H:%M:%S")
        .expect("parse timestamp")
        .and_utc()
        .timestamp_micros()
}

#[test]
fn load_series_keeps_only_ds_and_target() {
    let df = parse_load_series(&fixture("load_system_total.csv")).expect("load parse failed");

    assert_eq!(df.get_column_names(), SourceKind::Load.columns());
    assert_eq!(df.column(TARGET_COLUMN).unwrap().null_count(), 0);
}

#[test]
fn load_series_drops_unparseable_values() {
    let df = parse_load_series(&fixture("load_system_total.csv")).expect("load parse failed");

    // "n/a" at 03:00 and the empty cell at 05:00 are removed, not imputed.
    assert_eq!(df.height(), 4);
    let ds = df.column(DS_COLUMN).unwrap().datetime().unwrap();
    let kept: Vec<i64> = (0..df.height()).filter_map(|idx| ds.get(idx)).collect();
    assert_eq!(
        kept,
        vec![
            micros("2024-03-01 01:00:00"),
            micros("2024-03-01 02:00:00"),
            micros("2024-03-01 04:00:00"),
            micros("2024-03-01 06:00:00"),
        ]
    );

    let y = df.column(TARGET_COLUMN).unwrap().f64().unwrap();
    assert_eq!(y.get(0), Some(7210.5));
    assert_eq!(y.get(3), Some(6401.9));
}

#[test]
fn load_series_missing_header_is_format_error() {
    let err = parse_load_series(&fixture("load_wrong_header.csv")).unwrap_err();
    match err {
        ParserError::MissingColumn { column, .. } => {
            assert_eq!(column, "UTC Timestamp (Interval Ending)");
        }
        other => panic!("expected MissingColumn, got {other:?}"),
    }
}

#[test]
fn load_series_rejects_invalid_timestamp() {
    let content = "UTC Timestamp (Interval Ending),SystemTotal Forecast Load (MW)\n\
                   2024-03-01 01:00:00,100\n\
                   yesterday,200\n";
    let err = parse_load_series(content).unwrap_err();
    match err {
        ParserError::InvalidTimestamp {
            line_index, value, ..
        } => {
            assert_eq!(line_index, 3);
            assert_eq!(value, "yesterday");
        }
        other => panic!("expected InvalidTimestamp, got {other:?}"),
    }
}

#[test]
fn renewable_series_keeps_missing_values_and_dedupes_hours() {
    let df = parse_renewable_series(&fixture("renewables_hourly.csv"))
        .expect("renewable parse failed");

    assert_eq!(df.get_column_names(), SourceKind::Renewables.columns());
    // 04:00 appears twice; the later row wins.
    assert_eq!(df.height(), 5);

    let wind = df.column(WIND_COLUMN).unwrap().f64().unwrap();
    assert_eq!(wind.get(2), None);
    assert_eq!(wind.get(3), Some(380.0));

    let solar = df.column(SOLAR_COLUMN).unwrap().f64().unwrap();
    assert_eq!(solar.get(4), Some(1.2));
}

#[test]
fn renewable_series_requires_all_columns() {
    let err = parse_renewable_series("ds,solar_mw\n2024-03-01 01:00:00,1.0\n").unwrap_err();
    assert!(matches!(
        err,
        ParserError::MissingColumn {
            column: "wind_mw",
            ..
        }
    ));
}

#[test]
fn timestamps_with_offsets_are_converted_to_utc() {
    let expected = NaiveDateTime::parse_from_str("2024-03-01 05:00:00", "%Y-%m-%d %H:%M:%S")
        .expect("parse expected");

    assert_eq!(parse_utc_timestamp("2024-03-01 00:00:00-05:00"), Some(expected));
    assert_eq!(parse_utc_timestamp("2024-03-01T05:00:00Z"), Some(expected));
    assert_eq!(parse_utc_timestamp("2024-03-01 05:00:00"), Some(expected));
    assert_eq!(parse_utc_timestamp("03/01/2024 05:00"), Some(expected));
    assert_eq!(parse_utc_timestamp("not a time"), None);
}

#[test]
fn sub_hour_timestamps_floor_to_the_hour() {
    let ts = micros("2024-03-01 05:59:59");
    assert_eq!(floor_to_hour(ts), micros("2024-03-01 05:00:00"));
    assert_eq!(floor_to_hour(micros("1969-12-31 23:30:00")), micros("1969-12-31 23:00:00"));
}

#[test]
fn numeric_coercion_rejects_non_finite_values() {
    assert_eq!(coerce_f64(" 12.5 "), Some(12.5));
    assert_eq!(coerce_f64("NaN"), None);
    assert_eq!(coerce_f64("inf"), None);
    assert_eq!(coerce_f64("1,234"), None);
    assert_eq!(coerce_f64(""), None);
}

#[test]
fn reading_a_missing_file_reports_the_path() {
    let path = fixture_path("does_not_exist.csv");
    let err = read_load_series(&path).unwrap_err();
    match err {
        ParserError::Io { path: reported, .. } => assert_eq!(reported, path),
        other => panic!("expected Io error, got {other:?}"),
    }
}
