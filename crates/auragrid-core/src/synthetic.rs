//! Deterministic placeholder forecast used when no input data is available.

use chrono::{DateTime, Duration, Timelike, Utc};

use crate::deriver::round2;
use crate::outputs::ForecastRecord;

/// `hours` hourly records starting at `start` (truncated to whole seconds).
///
/// Load follows a half sine around 220 MW, solar a clipped daytime bump and
/// wind a slow swell around 55 MW. Derived metrics are left empty.
pub fn build_stub_dataset(start: DateTime<Utc>, hours: usize) -> Vec<ForecastRecord> {
    let start = start.with_nanosecond(0).unwrap_or(start);

    let load = linspace(0.0, 3.14, hours);
    let solar = linspace(-1.5, 1.5, hours);
    let wind = linspace(0.0, 4.2, hours);

    (0..hours)
        .map(|idx| {
            let ts = start + Duration::hours(idx as i64);
            ForecastRecord {
                ds: ts.format("%Y-%m-%d %H:%M:%S+00:00").to_string(),
                load_pred_mw: round2(220.0 + 35.0 * load[idx].sin()),
                solar_mw: Some(round2(40.0 * solar[idx].sin().max(0.0))),
                wind_mw: Some(round2(55.0 + 20.0 * wind[idx].sin())),
                renewable_share: None,
                carbon_intensity_kg_per_mwh: None,
            }
        })
        .collect()
}

/// `n` evenly spaced values from `start` to `end`, both included.
fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n).map(|i| start + step * i as f64).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn linspace_includes_both_endpoints() {
        let values = linspace(0.0, 4.2, 3);
        assert_eq!(values, vec![0.0, 2.1, 4.2]);
        assert_eq!(linspace(1.0, 2.0, 1), vec![1.0]);
        assert!(linspace(1.0, 2.0, 0).is_empty());
    }

    #[test]
    fn stub_has_hourly_rows_without_derived_fields() {
        let start = Utc.with_ymd_and_hms(2024, 3, 1, 6, 30, 15).unwrap();
        let records = build_stub_dataset(start, 48);

        assert_eq!(records.len(), 48);
        assert_eq!(records[0].ds, "2024-03-01 06:30:15+00:00");
        assert_eq!(records[47].ds, "2024-03-03 05:30:15+00:00");
        assert_eq!(records[0].load_pred_mw, 220.0);
        assert_eq!(records[0].solar_mw, Some(0.0));
        assert_eq!(records[0].wind_mw, Some(55.0));
        assert!(records.iter().all(|r| r.renewable_share.is_none()));
        assert!(records
            .iter()
            .all(|r| (185.0..=255.0).contains(&r.load_pred_mw)));
    }
}
