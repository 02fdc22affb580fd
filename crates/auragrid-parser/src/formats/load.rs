use polars::prelude::DataFrame;
use tracing::debug;

use crate::errors::ParserError;
use crate::model::{SourceKind, LOAD_TIMESTAMP_HEADER, LOAD_VALUE_HEADER, TARGET_COLUMN};
use crate::registry::SeriesParser;

use super::{column_index, read_records, timestamp_cell, value_cell, HourlyRows};

/// System load export: one row per interval, keyed by the interval-ending UTC
/// timestamp. Only the timestamp and total load columns are kept.
pub struct LoadSeriesParser;

impl Default for LoadSeriesParser {
    fn default() -> Self {
        Self
    }
}

impl LoadSeriesParser {
    const NAME: &'static str = "LOAD_SERIES";
}

impl SeriesParser for LoadSeriesParser {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn kind(&self) -> SourceKind {
        SourceKind::Load
    }

    fn parse(&self, content: &str) -> Result<DataFrame, ParserError> {
        let (headers, records) = read_records(Self::NAME, content)?;
        let ts_idx = column_index(Self::NAME, &headers, LOAD_TIMESTAMP_HEADER)?;
        let load_idx = column_index(Self::NAME, &headers, LOAD_VALUE_HEADER)?;

        let mut rows = HourlyRows::<1>::new();
        let mut dropped = 0usize;

        for (offset, record) in records.iter().enumerate() {
            // header occupies line 1
            let line_index = offset + 2;
            let hour = timestamp_cell(Self::NAME, record, ts_idx, line_index)?;
            match value_cell(record, load_idx) {
                Some(load) => rows.insert(hour, [Some(load)]),
                None => dropped += 1,
            }
        }

        debug!(
            parser = Self::NAME,
            rows = records.len(),
            dropped_unparseable = dropped,
            duplicate_hours = rows.replaced(),
            "parsed load series"
        );

        rows.build(Self::NAME, [TARGET_COLUMN])
    }
}
