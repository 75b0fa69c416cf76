use std::collections::BTreeMap;
use std::path::Path;

use chrono::NaiveDateTime;
use tracing::{debug, info};

use crate::config::DatasetConfig;
use crate::error::{DashboardError, Result};
use crate::models::{Category, Dataset, Observation};
use crate::utils::constants::NULL_SENTINELS;

/// One-shot CSV loader for the merged observation table.
///
/// Columns are resolved by header name from the configured identifiers and
/// metric lists. A malformed datetime aborts the whole load: no partial
/// dataset is ever served.
pub struct ObservationReader {
    config: DatasetConfig,
}

impl ObservationReader {
    pub fn new(config: DatasetConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DatasetConfig {
        &self.config
    }

    /// Read every observation from the file into an immutable [`Dataset`].
    pub fn read_observations(&self, path: &Path) -> Result<Dataset> {
        let mut reader = csv::Reader::from_path(path)?;

        let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();
        let columns = self.resolve_columns(&headers)?;

        let mut records = Vec::new();

        for (index, result) in reader.records().enumerate() {
            let row = index + 2; // 1-based, after the header line
            let record = result?;
            records.push(self.parse_record(&record, &columns, row)?);
        }

        info!(
            records = records.len(),
            stations = %count_stations(&records),
            "loaded observation table from {}",
            path.display()
        );

        Ok(Dataset::from_records(records))
    }

    fn resolve_columns(&self, headers: &[String]) -> Result<ColumnIndices> {
        let position = |name: &str| -> Result<usize> {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| DashboardError::MissingColumn(name.to_string()))
        };

        let mut metrics = Vec::new();
        for name in self.config.all_metrics() {
            metrics.push((name.to_string(), position(name)?));
        }
        debug!(metric_columns = metrics.len(), "resolved header columns");

        Ok(ColumnIndices {
            datetime: position(&self.config.datetime_column)?,
            station: position(&self.config.station_column)?,
            category: position(&self.config.category_column)?,
            wind_direction: position(&self.config.wind_direction_column)?,
            metrics,
        })
    }

    fn parse_record(
        &self,
        record: &csv::StringRecord,
        columns: &ColumnIndices,
        row: usize,
    ) -> Result<Observation> {
        let datetime_value = record.get(columns.datetime).unwrap_or("").trim();
        let datetime =
            NaiveDateTime::parse_from_str(datetime_value, &self.config.datetime_format).map_err(
                |_| DashboardError::DatetimeParse {
                    row,
                    value: datetime_value.to_string(),
                },
            )?;

        let station = record.get(columns.station).unwrap_or("").trim().to_string();
        if station.is_empty() {
            return Err(DashboardError::InvalidFormat(format!(
                "Empty station identifier in row {}",
                row
            )));
        }

        let category = match record.get(columns.category).map(str::trim) {
            None | Some("") => None,
            Some(label) if is_null(label) => None,
            Some(label) => Some(
                Category::parse(label)
                    .ok_or_else(|| DashboardError::UnknownCategory(label.to_string()))?,
            ),
        };

        let wind_direction = match record.get(columns.wind_direction).map(str::trim) {
            None | Some("") => None,
            Some(value) if is_null(value) => None,
            Some(value) => Some(value.to_string()),
        };

        let mut metrics = BTreeMap::new();
        for (name, index) in &columns.metrics {
            let cell = record.get(*index).unwrap_or("").trim();
            if cell.is_empty() || is_null(cell) {
                continue;
            }
            let value = cell.parse::<f64>().map_err(|_| {
                DashboardError::InvalidFormat(format!(
                    "Invalid value '{}' for metric '{}' in row {}",
                    cell, name, row
                ))
            })?;
            metrics.insert(name.clone(), value);
        }

        Ok(Observation::new(
            datetime,
            station,
            category,
            wind_direction,
            metrics,
        ))
    }
}

impl Default for ObservationReader {
    fn default() -> Self {
        Self::new(DatasetConfig::default())
    }
}

struct ColumnIndices {
    datetime: usize,
    station: usize,
    category: usize,
    wind_direction: usize,
    metrics: Vec<(String, usize)>,
}

fn is_null(cell: &str) -> bool {
    NULL_SENTINELS.contains(&cell)
}

fn count_stations(records: &[Observation]) -> usize {
    let mut stations: Vec<&str> = records.iter().map(|r| r.station.as_str()).collect();
    stations.sort_unstable();
    stations.dedup();
    stations.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Timelike};
    use std::io::Write;
    use tempfile::NamedTempFile;

    const HEADER: &str =
        "PM2.5,PM10,SO2,NO2,CO,O3,TEMP,PRES,DEWP,RAIN,wd,WSPM,station,datetime,Category";

    fn write_csv(lines: &[&str]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{}", HEADER).unwrap();
        for line in lines {
            writeln!(file, "{}", line).unwrap();
        }
        file
    }

    #[test]
    fn test_read_observations() {
        let file = write_csv(&[
            "12.0,20.0,3.0,15.0,300.0,80.0,1.5,1023.0,-12.0,0.0,NW,2.1,Aotizhongxin,2013-03-01 00:00:00,Excellent",
            "160.0,190.0,9.0,60.0,1300.0,4.0,0.2,1022.0,-13.0,0.0,N,1.4,Wanliu,2013-03-01 01:00:00,Heavily Polluted",
        ]);

        let reader = ObservationReader::default();
        let dataset = reader.read_observations(file.path()).unwrap();

        assert_eq!(dataset.len(), 2);
        let first = &dataset.records()[0];
        assert_eq!(first.station, "Aotizhongxin");
        assert_eq!(first.date, NaiveDate::from_ymd_opt(2013, 3, 1).unwrap());
        assert_eq!(first.hour, 0);
        assert_eq!(first.datetime.hour(), 0);
        assert_eq!(first.category, Some(Category::Excellent));
        assert_eq!(first.wind_direction.as_deref(), Some("NW"));
        assert_eq!(first.metric("PM2.5"), Some(12.0));
        assert_eq!(first.metric("WSPM"), Some(2.1));

        let second = &dataset.records()[1];
        assert_eq!(second.hour, 1);
        assert_eq!(second.category, Some(Category::HeavilyPolluted));
    }

    #[test]
    fn test_na_cells_become_null() {
        let file = write_csv(&[
            "NA,20.0,3.0,15.0,300.0,80.0,1.5,1023.0,-12.0,0.0,NA,2.1,Gucheng,2013-03-01 02:00:00,",
        ]);

        let reader = ObservationReader::default();
        let dataset = reader.read_observations(file.path()).unwrap();

        let record = &dataset.records()[0];
        assert_eq!(record.metric("PM2.5"), None);
        assert_eq!(record.metric("PM10"), Some(20.0));
        assert_eq!(record.wind_direction, None);
        assert_eq!(record.category, None);
    }

    #[test]
    fn test_malformed_datetime_aborts_load() {
        let file = write_csv(&[
            "12.0,20.0,3.0,15.0,300.0,80.0,1.5,1023.0,-12.0,0.0,NW,2.1,Dingling,2013-03-01 00:00:00,Good",
            "12.0,20.0,3.0,15.0,300.0,80.0,1.5,1023.0,-12.0,0.0,NW,2.1,Dingling,not-a-timestamp,Good",
        ]);

        let reader = ObservationReader::default();
        let result = reader.read_observations(file.path());

        assert!(matches!(
            result,
            Err(DashboardError::DatetimeParse { row: 3, .. })
        ));
    }

    #[test]
    fn test_unknown_category_aborts_load() {
        let file = write_csv(&[
            "12.0,20.0,3.0,15.0,300.0,80.0,1.5,1023.0,-12.0,0.0,NW,2.1,Dingling,2013-03-01 00:00:00,Apocalyptic",
        ]);

        let reader = ObservationReader::default();
        let result = reader.read_observations(file.path());

        assert!(matches!(result, Err(DashboardError::UnknownCategory(_))));
    }

    #[test]
    fn test_missing_column_is_reported() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "datetime,station").unwrap();
        writeln!(file, "2013-03-01 00:00:00,Wanliu").unwrap();

        let reader = ObservationReader::default();
        let result = reader.read_observations(file.path());

        assert!(matches!(result, Err(DashboardError::MissingColumn(_))));
    }

    #[test]
    fn test_invalid_metric_value_aborts_load() {
        let file = write_csv(&[
            "garbage,20.0,3.0,15.0,300.0,80.0,1.5,1023.0,-12.0,0.0,NW,2.1,Dingling,2013-03-01 00:00:00,Good",
        ]);

        let reader = ObservationReader::default();
        let result = reader.read_observations(file.path());

        assert!(matches!(result, Err(DashboardError::InvalidFormat(_))));
    }
}
