use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::{DashboardError, Result};
use crate::models::Category;

/// One hourly observation from a monitoring station.
///
/// `date` and `hour` are derived from `datetime` at construction so the
/// filter predicates never re-split timestamps. Metric values are keyed by
/// the configured column name; an absent key means the cell was null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub datetime: NaiveDateTime,
    pub date: NaiveDate,
    pub hour: u32,
    pub station: String,
    pub category: Option<Category>,
    pub wind_direction: Option<String>,
    pub metrics: BTreeMap<String, f64>,
}

impl Observation {
    pub fn new(
        datetime: NaiveDateTime,
        station: String,
        category: Option<Category>,
        wind_direction: Option<String>,
        metrics: BTreeMap<String, f64>,
    ) -> Self {
        Self {
            date: datetime.date(),
            hour: datetime.hour(),
            datetime,
            station,
            category,
            wind_direction,
            metrics,
        }
    }

    pub fn builder() -> ObservationBuilder {
        ObservationBuilder::new()
    }

    /// Value of a named metric, `None` when the cell was null.
    pub fn metric(&self, name: &str) -> Option<f64> {
        self.metrics.get(name).copied()
    }

    pub fn has_metric(&self, name: &str) -> bool {
        self.metrics.contains_key(name)
    }
}

pub struct ObservationBuilder {
    datetime: Option<NaiveDateTime>,
    station: Option<String>,
    category: Option<Category>,
    wind_direction: Option<String>,
    metrics: BTreeMap<String, f64>,
}

impl Default for ObservationBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ObservationBuilder {
    pub fn new() -> Self {
        Self {
            datetime: None,
            station: None,
            category: None,
            wind_direction: None,
            metrics: BTreeMap::new(),
        }
    }

    pub fn datetime(mut self, datetime: NaiveDateTime) -> Self {
        self.datetime = Some(datetime);
        self
    }

    pub fn station(mut self, station: impl Into<String>) -> Self {
        self.station = Some(station.into());
        self
    }

    pub fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn wind_direction(mut self, direction: impl Into<String>) -> Self {
        self.wind_direction = Some(direction.into());
        self
    }

    pub fn metric(mut self, name: impl Into<String>, value: f64) -> Self {
        self.metrics.insert(name.into(), value);
        self
    }

    pub fn build(self) -> Result<Observation> {
        let datetime = self
            .datetime
            .ok_or_else(|| DashboardError::MissingData("datetime".to_string()))?;
        let station = self
            .station
            .ok_or_else(|| DashboardError::MissingData("station".to_string()))?;

        Ok(Observation::new(
            datetime,
            station,
            self.category,
            self.wind_direction,
            self.metrics,
        ))
    }
}
