use std::fs;
use std::path::Path;

use polars::prelude::DataFrame;
use tracing::info;

use crate::errors::ParserError;
use crate::formats::{LoadSeriesParser, RenewableSeriesParser};
use crate::model::SourceKind;

pub trait SeriesParser {
    fn name(&self) -> &'static str;
    fn kind(&self) -> SourceKind;
    fn parse(&self, content: &str) -> Result<DataFrame, ParserError>;
}

/// Cleaned load series with columns `ds`, `y`.
pub fn parse_load_series(content: &str) -> Result<DataFrame, ParserError> {
    LoadSeriesParser.parse(content)
}

/// Renewable series with columns `ds`, `solar_mw`, `wind_mw`.
pub fn parse_renewable_series(content: &str) -> Result<DataFrame, ParserError> {
    RenewableSeriesParser.parse(content)
}

pub fn read_load_series(path: &Path) -> Result<DataFrame, ParserError> {
    read_series(path, &LoadSeriesParser)
}

pub fn read_renewable_series(path: &Path) -> Result<DataFrame, ParserError> {
    read_series(path, &RenewableSeriesParser)
}

pub fn read_series(path: &Path, parser: &dyn SeriesParser) -> Result<DataFrame, ParserError> {
    let content = fs::read_to_string(path).map_err(|source| ParserError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let df = parser.parse(&content)?;
    info!(
        source = %parser.kind(),
        path = %path.display(),
        rows = df.height(),
        "loaded series"
    );
    Ok(df)
}
