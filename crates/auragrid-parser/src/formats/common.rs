use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDateTime};
use csv::{ReaderBuilder, StringRecord};
use polars::prelude::*;

use crate::errors::ParserError;
use crate::model::{ds_dtype, DS_COLUMN, MICROS_PER_HOUR};

static OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%:z",
    "%Y-%m-%d %H:%M:%S%#z",
    "%Y-%m-%dT%H:%M:%S%#z",
];

static NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// Parses a timestamp cell into a naive UTC datetime.
///
/// Values carrying an offset are converted to UTC before the offset is dropped;
/// values without one are taken to already be UTC.
pub fn parse_utc_timestamp(value: &str) -> Option<NaiveDateTime> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_utc());
    }
    for fmt in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(trimmed, fmt) {
            return Some(dt.naive_utc());
        }
    }
    for fmt in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Some(dt);
        }
    }
    None
}

/// Numeric coercion: anything that is not a finite float becomes missing.
pub fn coerce_f64(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|parsed| parsed.is_finite())
}

pub fn floor_to_hour(micros: i64) -> i64 {
    micros.div_euclid(MICROS_PER_HOUR) * MICROS_PER_HOUR
}

pub(crate) fn read_records(
    parser: &'static str,
    content: &str,
) -> Result<(StringRecord, Vec<StringRecord>), ParserError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let headers = reader
        .headers()
        .map_err(|source| ParserError::Csv { parser, source })?
        .clone();

    let mut records = Vec::new();
    for record in reader.records() {
        records.push(record.map_err(|source| ParserError::Csv { parser, source })?);
    }

    Ok((headers, records))
}

pub(crate) fn column_index(
    parser: &'static str,
    headers: &StringRecord,
    column: &'static str,
) -> Result<usize, ParserError> {
    headers
        .iter()
        .position(|header| header.trim() == column)
        .ok_or(ParserError::MissingColumn { parser, column })
}

pub(crate) fn timestamp_cell(
    parser: &'static str,
    record: &StringRecord,
    index: usize,
    line_index: usize,
) -> Result<i64, ParserError> {
    let raw = record.get(index).unwrap_or_default();
    let parsed = parse_utc_timestamp(raw).ok_or_else(|| ParserError::InvalidTimestamp {
        parser,
        line_index,
        value: raw.to_string(),
    })?;
    Ok(floor_to_hour(parsed.and_utc().timestamp_micros()))
}

pub(crate) fn value_cell(record: &StringRecord, index: usize) -> Option<f64> {
    record.get(index).and_then(coerce_f64)
}

/// Collects rows keyed by hour so the output is sorted and one row per hour,
/// later rows replacing earlier ones.
pub(crate) struct HourlyRows<const N: usize> {
    rows: BTreeMap<i64, [Option<f64>; N]>,
    replaced: usize,
}

impl<const N: usize> HourlyRows<N> {
    pub fn new() -> Self {
        Self {
            rows: BTreeMap::new(),
            replaced: 0,
        }
    }

    pub fn insert(&mut self, hour_micros: i64, values: [Option<f64>; N]) {
        if self.rows.insert(hour_micros, values).is_some() {
            self.replaced += 1;
        }
    }

    pub fn replaced(&self) -> usize {
        self.replaced
    }

    pub fn build(
        self,
        parser: &'static str,
        names: [&'static str; N],
    ) -> Result<DataFrame, ParserError> {
        let height = self.rows.len();
        let mut timestamps = Vec::with_capacity(height);
        let mut values: Vec<Vec<Option<f64>>> = (0..N).map(|_| Vec::with_capacity(height)).collect();

        for (hour, row) in self.rows {
            timestamps.push(hour);
            for (column, value) in values.iter_mut().zip(row) {
                column.push(value);
            }
        }

        let ds = Series::new(DS_COLUMN.into(), timestamps)
            .cast(&ds_dtype())
            .map_err(|source| ParserError::Frame { parser, source })?;

        let mut columns: Vec<Column> = Vec::with_capacity(N + 1);
        columns.push(ds.into());
        for (name, data) in names.into_iter().zip(values) {
            columns.push(Series::new(name.into(), data).into());
        }

        DataFrame::new(columns).map_err(|source| ParserError::Frame { parser, source })
    }
}
