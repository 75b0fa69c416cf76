use std::path::Path;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{DashboardError, Result};
use crate::utils::constants::{
    DEFAULT_CATEGORY_COLUMN, DEFAULT_DATETIME_COLUMN, DEFAULT_DATETIME_FORMAT,
    DEFAULT_POLLUTANT_METRICS, DEFAULT_REFERENCE_POLLUTANT, DEFAULT_STATION_COLUMN,
    DEFAULT_WEATHER_METRICS, DEFAULT_WIND_DIRECTION_COLUMN,
};

/// Names of the identifier columns and metric columns in the source table.
///
/// The metric field lists are explicit configuration rather than column
/// positions, so reordering the source file cannot silently change which
/// columns are treated as pollutants or weather measurements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct DatasetConfig {
    pub datetime_column: String,
    pub station_column: String,
    pub category_column: String,
    pub wind_direction_column: String,

    /// chrono format string for the datetime column
    pub datetime_format: String,

    #[validate(length(min = 1))]
    pub pollutant_metrics: Vec<String>,

    #[validate(length(min = 1))]
    pub weather_metrics: Vec<String>,

    /// Pollutant whose non-null count stands in for the row count in the
    /// per-station stacked output. Must be one of `pollutant_metrics`.
    pub reference_pollutant: String,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            datetime_column: DEFAULT_DATETIME_COLUMN.to_string(),
            station_column: DEFAULT_STATION_COLUMN.to_string(),
            category_column: DEFAULT_CATEGORY_COLUMN.to_string(),
            wind_direction_column: DEFAULT_WIND_DIRECTION_COLUMN.to_string(),
            datetime_format: DEFAULT_DATETIME_FORMAT.to_string(),
            pollutant_metrics: DEFAULT_POLLUTANT_METRICS
                .iter()
                .map(|m| m.to_string())
                .collect(),
            weather_metrics: DEFAULT_WEATHER_METRICS
                .iter()
                .map(|m| m.to_string())
                .collect(),
            reference_pollutant: DEFAULT_REFERENCE_POLLUTANT.to_string(),
        }
    }
}

impl DatasetConfig {
    /// Load configuration from a TOML file, layered over the defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path))
            .build()?;

        let config: DatasetConfig = settings.try_deserialize()?;
        config.check()?;
        Ok(config)
    }

    /// Validate field constraints and cross-field consistency.
    pub fn check(&self) -> Result<()> {
        self.validate()?;

        if !self
            .pollutant_metrics
            .iter()
            .any(|m| m == &self.reference_pollutant)
        {
            return Err(DashboardError::Config(format!(
                "reference pollutant '{}' is not in the pollutant metric list",
                self.reference_pollutant
            )));
        }

        Ok(())
    }

    pub fn is_pollutant(&self, name: &str) -> bool {
        self.pollutant_metrics.iter().any(|m| m == name)
    }

    pub fn is_known_metric(&self, name: &str) -> bool {
        self.is_pollutant(name) || self.weather_metrics.iter().any(|m| m == name)
    }

    /// All metric column names, pollutants first.
    pub fn all_metrics(&self) -> impl Iterator<Item = &str> + '_ {
        self.pollutant_metrics
            .iter()
            .chain(self.weather_metrics.iter())
            .map(String::as_str)
    }
}
