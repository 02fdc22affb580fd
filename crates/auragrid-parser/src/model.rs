use std::fmt;

use polars::prelude::*;

/// Canonical column holding the naive UTC hour of each row.
pub const DS_COLUMN: &str = "ds";
/// Canonical column holding observed load in MW.
pub const TARGET_COLUMN: &str = "y";
pub const SOLAR_COLUMN: &str = "solar_mw";
pub const WIND_COLUMN: &str = "wind_mw";

/// Header names as they appear in the load source file.
pub const LOAD_TIMESTAMP_HEADER: &str = "UTC Timestamp (Interval Ending)";
pub const LOAD_VALUE_HEADER: &str = "SystemTotal Forecast Load (MW)";

pub const MICROS_PER_HOUR: i64 = 3_600 * 1_000_000;

pub fn ds_dtype() -> DataType {
    DataType::Datetime(TimeUnit::Microseconds, None)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    Load,
    Renewables,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Load => "load",
            SourceKind::Renewables => "renewables",
        }
    }

    /// Columns produced by parsing a source of this kind, in output order.
    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            SourceKind::Load => &[DS_COLUMN, TARGET_COLUMN],
            SourceKind::Renewables => &[DS_COLUMN, SOLAR_COLUMN, WIND_COLUMN],
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
