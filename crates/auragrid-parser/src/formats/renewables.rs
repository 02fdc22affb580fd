use polars::prelude::DataFrame;
use tracing::debug;

use crate::errors::ParserError;
use crate::model::{SourceKind, DS_COLUMN, SOLAR_COLUMN, WIND_COLUMN};
use crate::registry::SeriesParser;

use super::{column_index, read_records, timestamp_cell, value_cell, HourlyRows};

/// Hourly solar and wind generation. Unparseable values are kept as missing;
/// rows are only discarded later, once they have been matched against load.
pub struct RenewableSeriesParser;

impl Default for RenewableSeriesParser {
    fn default() -> Self {
        Self
    }
}

impl RenewableSeriesParser {
    const NAME: &'static str = "RENEWABLE_SERIES";
}

impl SeriesParser for RenewableSeriesParser {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn kind(&self) -> SourceKind {
        SourceKind::Renewables
    }

    fn parse(&self, content: &str) -> Result<DataFrame, ParserError> {
        let (headers, records) = read_records(Self::NAME, content)?;
        let ts_idx = column_index(Self::NAME, &headers, DS_COLUMN)?;
        let solar_idx = column_index(Self::NAME, &headers, SOLAR_COLUMN)?;
        let wind_idx = column_index(Self::NAME, &headers, WIND_COLUMN)?;

        let mut rows = HourlyRows::<2>::new();
        let mut incomplete = 0usize;

        for (offset, record) in records.iter().enumerate() {
            let line_index = offset + 2;
            let hour = timestamp_cell(Self::NAME, record, ts_idx, line_index)?;
            let solar = value_cell(record, solar_idx);
            let wind = value_cell(record, wind_idx);
            if solar.is_none() || wind.is_none() {
                incomplete += 1;
            }
            rows.insert(hour, [solar, wind]);
        }

        debug!(
            parser = Self::NAME,
            rows = records.len(),
            incomplete,
            duplicate_hours = rows.replaced(),
            "parsed renewable series"
        );

        rows.build(Self::NAME, [SOLAR_COLUMN, WIND_COLUMN])
    }
}
