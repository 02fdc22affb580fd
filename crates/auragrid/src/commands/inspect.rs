use std::path::PathBuf;

use anyhow::{Context, Result};
use auragrid_core::{read_forecast, DataPaths, ForecastRecord};
use clap::Args;
use comfy_table::Table;

#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Directory holding forecast.json
    #[arg(long, default_value = "data")]
    pub data_dir: PathBuf,
    /// Number of rows to print
    #[arg(long, default_value_t = 12)]
    pub limit: usize,
}

pub fn handle_inspect_command(args: InspectArgs) -> Result<()> {
    let paths = DataPaths::in_dir(&args.data_dir);
    let records = read_forecast(&paths.forecast)
        .with_context(|| format!("failed to read {}", paths.forecast.display()))?;

    println!("{}", render_table(&records, args.limit));
    println!(
        "{} of {} points from {}",
        records.len().min(args.limit),
        records.len(),
        paths.forecast.display()
    );
    Ok(())
}

fn render_table(records: &[ForecastRecord], limit: usize) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        "ds",
        "load_pred_mw",
        "solar_mw",
        "wind_mw",
        "renewable_share",
        "carbon_kg_per_mwh",
    ]);
    for record in records.iter().take(limit) {
        table.add_row(vec![
            record.ds.clone(),
            format!("{:.2}", record.load_pred_mw),
            optional(record.solar_mw, 2),
            optional(record.wind_mw, 2),
            optional(record.renewable_share, 3),
            optional(record.carbon_intensity_kg_per_mwh, 2),
        ]);
    }
    table
}

fn optional(value: Option<f64>, precision: usize) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.precision$}"))
}
