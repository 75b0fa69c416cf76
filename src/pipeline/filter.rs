use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::Result;
use crate::models::{Category, Dataset, Observation};
use crate::utils::constants::{MAX_HOUR, MIN_HOUR};

/// The active selector combination: stations, category, date range, hour
/// range. An empty station set and a `None` category are the "all" sentinels.
///
/// Recreated on every interaction; it has no identity beyond a single
/// pipeline invocation. Hour bounds are inclusive on both ends; a start hour
/// above the end hour selects nothing (no wraparound).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct FilterSpec {
    pub stations: BTreeSet<String>,
    pub category: Option<Category>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[validate(range(min = 0, max = 23))]
    pub start_hour: u32,
    #[validate(range(min = 0, max = 23))]
    pub end_hour: u32,
}

impl FilterSpec {
    pub fn builder() -> FilterSpecBuilder {
        FilterSpecBuilder::new()
    }

    /// The all-pass spec over the dataset's own date range.
    pub fn unfiltered(dataset: &Dataset) -> Self {
        let (start_date, end_date) = dataset
            .date_range()
            .unwrap_or((NaiveDate::MIN, NaiveDate::MAX));
        Self {
            stations: BTreeSet::new(),
            category: None,
            start_date,
            end_date,
            start_hour: MIN_HOUR,
            end_hour: MAX_HOUR,
        }
    }

    /// Whether a record passes all four selector predicates.
    pub fn matches(&self, record: &Observation) -> bool {
        let station_ok = self.stations.is_empty() || self.stations.contains(&record.station);
        let category_ok = match self.category {
            None => true,
            Some(category) => record.category == Some(category),
        };
        let date_ok = self.start_date <= record.date && record.date <= self.end_date;
        let hour_ok = self.start_hour <= record.hour && record.hour <= self.end_hour;

        station_ok && category_ok && date_ok && hour_ok
    }
}

/// Keep every record the spec selects. Pure projection: the input is
/// borrowed, never reordered or mutated.
pub fn apply_filters<'a>(records: &'a [Observation], spec: &FilterSpec) -> Vec<&'a Observation> {
    records.iter().filter(|r| spec.matches(r)).collect()
}

pub struct FilterSpecBuilder {
    stations: BTreeSet<String>,
    category: Option<Category>,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    start_hour: u32,
    end_hour: u32,
}

impl Default for FilterSpecBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl FilterSpecBuilder {
    pub fn new() -> Self {
        Self {
            stations: BTreeSet::new(),
            category: None,
            start_date: None,
            end_date: None,
            start_hour: MIN_HOUR,
            end_hour: MAX_HOUR,
        }
    }

    pub fn station(mut self, station: impl Into<String>) -> Self {
        self.stations.insert(station.into());
        self
    }

    pub fn stations<I, S>(mut self, stations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.stations.extend(stations.into_iter().map(Into::into));
        self
    }

    pub fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn date_range(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self
    }

    pub fn hour_range(mut self, start: u32, end: u32) -> Self {
        self.start_hour = start;
        self.end_hour = end;
        self
    }

    /// Missing date bounds default to the full calendar.
    pub fn build(self) -> Result<FilterSpec> {
        let spec = FilterSpec {
            stations: self.stations,
            category: self.category,
            start_date: self.start_date.unwrap_or(NaiveDate::MIN),
            end_date: self.end_date.unwrap_or(NaiveDate::MAX),
            start_hour: self.start_hour,
            end_hour: self.end_hour,
        };
        spec.validate()?;
        Ok(spec)
    }
}
