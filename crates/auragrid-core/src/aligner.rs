use std::collections::HashMap;

use auragrid_parser::{DS_COLUMN, SOLAR_COLUMN, TARGET_COLUMN, WIND_COLUMN};
use polars::lazy::dsl::*;
use polars::prelude::*;
use tracing::{debug, info};

use crate::error::{PipelineError, Result};
use crate::frame::{ds_column, ds_values, f64_column, f64_values, hourly_range};
use crate::gap_fill::{backward_fill, forward_fill, interpolate_linear};

/// Merges the renewable regressors onto the load series and reindexes the
/// result onto a gap-free hourly grid.
///
/// The grid spans the first and last load timestamp. Rows that lack either
/// regressor after the join are dropped and come back as gap rows, so their
/// regressors are filled (interpolation, then forward fill, then backward fill)
/// while `y` stays missing. Output columns: `ds`, `y`, `solar_mw`, `wind_mw`.
pub fn align_history(load: &DataFrame, renewables: &DataFrame) -> Result<DataFrame> {
    if load.height() == 0 {
        return Err(PipelineError::InsufficientData(
            "load series has no usable rows".into(),
        ));
    }

    let merged = load
        .clone()
        .lazy()
        .select([col(DS_COLUMN), col(TARGET_COLUMN)])
        .join(
            renewables
                .clone()
                .lazy()
                .select([col(DS_COLUMN), col(SOLAR_COLUMN), col(WIND_COLUMN)]),
            [col(DS_COLUMN)],
            [col(DS_COLUMN)],
            JoinArgs::new(JoinType::Left),
        )
        .collect()?;

    let merged_ds = ds_values(&merged)?;
    let (Some(&start), Some(&end)) = (merged_ds.iter().min(), merged_ds.iter().max()) else {
        return Err(PipelineError::InsufficientData(
            "merged series has no timestamps".into(),
        ));
    };

    let complete = merged
        .lazy()
        .filter(
            col(SOLAR_COLUMN)
                .is_not_null()
                .and(col(WIND_COLUMN).is_not_null()),
        )
        .collect()?;

    let dropped = merged_ds.len() - complete.height();
    if dropped > 0 {
        debug!(dropped, "dropped load rows without both regressors");
    }

    let complete_ds = ds_values(&complete)?;
    let y = f64_values(&complete, TARGET_COLUMN)?;
    let solar = f64_values(&complete, SOLAR_COLUMN)?;
    let wind = f64_values(&complete, WIND_COLUMN)?;

    let mut by_hour: HashMap<i64, (Option<f64>, Option<f64>, Option<f64>)> =
        HashMap::with_capacity(complete_ds.len());
    for (idx, ts) in complete_ds.iter().enumerate() {
        by_hour.insert(*ts, (y[idx], solar[idx], wind[idx]));
    }

    let grid = hourly_range(start, end);
    let mut grid_y = Vec::with_capacity(grid.len());
    let mut grid_solar = Vec::with_capacity(grid.len());
    let mut grid_wind = Vec::with_capacity(grid.len());
    let mut gap_rows = 0usize;
    for ts in &grid {
        let (y, solar, wind) = by_hour.get(ts).copied().unwrap_or_else(|| {
            gap_rows += 1;
            (None, None, None)
        });
        grid_y.push(y);
        grid_solar.push(solar);
        grid_wind.push(wind);
    }

    let grid_solar = fill_regressor(SOLAR_COLUMN, &grid_solar)?;
    let grid_wind = fill_regressor(WIND_COLUMN, &grid_wind)?;

    info!(
        rows = grid.len(),
        gap_rows,
        missing_target = grid_y.iter().filter(|value| value.is_none()).count(),
        "aligned history onto hourly grid"
    );

    let aligned = DataFrame::new(vec![
        ds_column(grid)?,
        f64_column(TARGET_COLUMN, grid_y),
        f64_column(SOLAR_COLUMN, grid_solar),
        f64_column(WIND_COLUMN, grid_wind),
    ])?;
    Ok(aligned)
}

fn fill_regressor(name: &str, values: &[Option<f64>]) -> Result<Vec<Option<f64>>> {
    let mut filled = interpolate_linear(values);
    forward_fill(&mut filled);
    backward_fill(&mut filled);

    if filled.iter().any(Option::is_none) {
        return Err(PipelineError::InsufficientData(format!(
            "no observed {name} values to fill the history with"
        )));
    }
    Ok(filled)
}
