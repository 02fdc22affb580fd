mod common;
mod load;
mod renewables;

pub use common::{coerce_f64, floor_to_hour, parse_utc_timestamp};
pub(crate) use common::{column_index, read_records, timestamp_cell, value_cell, HourlyRows};
pub use load::LoadSeriesParser;
pub use renewables::RenewableSeriesParser;
