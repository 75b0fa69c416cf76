use std::collections::BTreeMap;

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Timelike};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::models::Observation;

/// Time bucket width for the resampled line chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Frequency {
    /// Start of the bucket containing `datetime`.
    ///
    /// Weeks are ISO weeks starting Monday; months and years are labeled by
    /// their first day.
    pub fn bucket_start(&self, datetime: NaiveDateTime) -> NaiveDateTime {
        let date = datetime.date();
        let bucket_date = match self {
            Frequency::Hourly | Frequency::Daily => date,
            Frequency::Weekly => {
                date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
            }
            Frequency::Monthly => {
                NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap_or(date)
            }
            Frequency::Yearly => NaiveDate::from_ymd_opt(date.year(), 1, 1).unwrap_or(date),
        };

        let hour = match self {
            Frequency::Hourly => datetime.hour(),
            _ => 0,
        };

        bucket_date
            .and_hms_opt(hour, 0, 0)
            .unwrap_or_else(|| bucket_date.and_time(datetime.time()))
    }
}

/// Mean of one metric for one station within one time bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesPoint {
    pub station: String,
    pub bucket_start: NaiveDateTime,
    pub mean: f64,
}

/// Resample the filtered rows into per-station bucket means.
///
/// Null metric values are skipped; a bucket only appears when at least one
/// row contributed a value. Output is sorted by (station, bucket start).
pub fn time_series(
    filtered: &[&Observation],
    metric: &str,
    frequency: Frequency,
) -> Vec<TimeSeriesPoint> {
    let mut groups: BTreeMap<(String, NaiveDateTime), (f64, u64)> = BTreeMap::new();

    for record in filtered {
        let Some(value) = record.metric(metric) else {
            continue;
        };
        let bucket = frequency.bucket_start(record.datetime);
        let entry = groups.entry((record.station.clone(), bucket)).or_insert((0.0, 0));
        entry.0 += value;
        entry.1 += 1;
    }

    groups
        .into_iter()
        .map(|((station, bucket_start), (sum, count))| TimeSeriesPoint {
            station,
            bucket_start,
            mean: sum / count as f64,
        })
        .collect()
}
