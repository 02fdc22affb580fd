pub mod errors;
pub mod formats;
pub mod model;
mod registry;

pub use errors::ParserError;
pub use model::{
    ds_dtype, SourceKind, DS_COLUMN, LOAD_TIMESTAMP_HEADER, LOAD_VALUE_HEADER, MICROS_PER_HOUR,
    SOLAR_COLUMN, TARGET_COLUMN, WIND_COLUMN,
};
pub use registry::{
    parse_load_series, parse_renewable_series, read_load_series, read_renewable_series,
    read_series, SeriesParser,
};

#[cfg(test)]
mod tests;
