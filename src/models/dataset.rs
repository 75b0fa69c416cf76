use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::Observation;

/// The complete loaded record set.
///
/// Built once by the loader and read-only afterwards: the pipeline borrows
/// it and every derived output is a projection, never a mutation. Station
/// order is first-encounter order from the source file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dataset {
    records: Vec<Observation>,
    stations: Vec<String>,
    date_range: Option<(NaiveDate, NaiveDate)>,
}

impl Dataset {
    pub fn from_records(records: Vec<Observation>) -> Self {
        let mut stations: Vec<String> = Vec::new();
        let mut date_range: Option<(NaiveDate, NaiveDate)> = None;

        for record in &records {
            if !stations.iter().any(|s| s == &record.station) {
                stations.push(record.station.clone());
            }
            date_range = match date_range {
                None => Some((record.date, record.date)),
                Some((min, max)) => Some((min.min(record.date), max.max(record.date))),
            };
        }

        Self {
            records,
            stations,
            date_range,
        }
    }

    pub fn records(&self) -> &[Observation] {
        &self.records
    }

    /// Unique station identifiers, in first-encounter order.
    pub fn stations(&self) -> &[String] {
        &self.stations
    }

    /// Inclusive calendar-date bounds, `None` for an empty dataset.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        self.date_range
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Observation;
    use chrono::NaiveDate;

    fn obs(station: &str, year: i32, month: u32, day: u32) -> Observation {
        Observation::builder()
            .datetime(
                NaiveDate::from_ymd_opt(year, month, day)
                    .unwrap()
                    .and_hms_opt(8, 0, 0)
                    .unwrap(),
            )
            .station(station)
            .build()
            .unwrap()
    }

    #[test]
    fn test_from_records_derives_stations_and_range() {
        let dataset = Dataset::from_records(vec![
            obs("Wanliu", 2014, 5, 2),
            obs("Aotizhongxin", 2013, 3, 1),
            obs("Wanliu", 2015, 1, 20),
        ]);

        assert_eq!(dataset.len(), 3);
        assert_eq!(dataset.stations(), &["Wanliu", "Aotizhongxin"]);
        assert_eq!(
            dataset.date_range(),
            Some((
                NaiveDate::from_ymd_opt(2013, 3, 1).unwrap(),
                NaiveDate::from_ymd_opt(2015, 1, 20).unwrap()
            ))
        );
    }

    #[test]
    fn test_empty_dataset() {
        let dataset = Dataset::from_records(Vec::new());
        assert!(dataset.is_empty());
        assert!(dataset.stations().is_empty());
        assert_eq!(dataset.date_range(), None);
    }
}
