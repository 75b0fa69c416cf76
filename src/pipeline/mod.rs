pub mod aggregate;
pub mod filter;
pub mod timeseries;

pub use aggregate::{
    best_worst_stations, category_distribution, kpi_day_counts, scatter_pairs,
    stacked_category_counts, wind_rose_counts, CategoryCount, ScatterPoint, StationCategoryCounts,
    StationMean, StationRanking, WindRoseEntry,
};
pub use filter::{apply_filters, FilterSpec, FilterSpecBuilder};
pub use timeseries::{time_series, Frequency, TimeSeriesPoint};

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;
use validator::Validate;

use crate::config::DatasetConfig;
use crate::error::{DashboardError, Result};
use crate::models::{Category, Dataset};

/// The metric and frequency selectors owned by the chart widgets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSelections {
    /// Pollutant plotted in the resampled line chart
    pub timeseries_metric: String,
    pub frequency: Frequency,
    /// Pollutant the best/worst ranking is computed over
    pub ranking_metric: String,
    /// Scatter axes; pollutant or weather metrics
    pub scatter_x: String,
    pub scatter_y: String,
}

impl ChartSelections {
    /// Selections matching the dashboard's initial widget state.
    pub fn defaults(config: &DatasetConfig) -> Self {
        let pollutant = config.reference_pollutant.clone();
        let weather = config
            .weather_metrics
            .first()
            .cloned()
            .unwrap_or_else(|| pollutant.clone());
        Self {
            timeseries_metric: pollutant.clone(),
            frequency: Frequency::Daily,
            ranking_metric: pollutant.clone(),
            scatter_x: pollutant,
            scatter_y: weather,
        }
    }
}

/// Everything the rendering layer needs for one filter state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardData {
    pub kpi_day_counts: BTreeMap<Category, u64>,
    pub category_distribution: Vec<CategoryCount>,
    pub time_series: Vec<TimeSeriesPoint>,
    pub station_ranking: StationRanking,
    pub scatter: Vec<ScatterPoint>,
    pub stacked_categories: Vec<StationCategoryCounts>,
    pub wind_rose: Vec<WindRoseEntry>,
    /// Number of rows the filter kept
    pub filtered_rows: usize,
}

/// Recompute every chart output for one (dataset, filter, selections) state.
///
/// This is the single entry point the host calls on each filter change. It
/// validates the hour bounds and metric names up front, applies the filter
/// once, and derives all outputs from that one pass. The dataset is only
/// borrowed; nothing is cached between invocations.
pub fn compute_all(
    dataset: &Dataset,
    spec: &FilterSpec,
    selections: &ChartSelections,
    config: &DatasetConfig,
) -> Result<DashboardData> {
    spec.validate()?;
    check_pollutant(config, &selections.timeseries_metric)?;
    check_pollutant(config, &selections.ranking_metric)?;
    check_metric(config, &selections.scatter_x)?;
    check_metric(config, &selections.scatter_y)?;

    let filtered = apply_filters(dataset.records(), spec);
    debug!(
        filtered = filtered.len(),
        total = dataset.len(),
        "applied filter spec"
    );

    Ok(DashboardData {
        kpi_day_counts: kpi_day_counts(&filtered),
        category_distribution: category_distribution(dataset.records()),
        time_series: time_series(
            &filtered,
            &selections.timeseries_metric,
            selections.frequency,
        ),
        station_ranking: best_worst_stations(&filtered, &selections.ranking_metric),
        scatter: scatter_pairs(&filtered, &selections.scatter_x, &selections.scatter_y),
        stacked_categories: stacked_category_counts(&filtered, &config.reference_pollutant),
        wind_rose: wind_rose_counts(dataset.records()),
        filtered_rows: filtered.len(),
    })
}

fn check_pollutant(config: &DatasetConfig, name: &str) -> Result<()> {
    if config.is_pollutant(name) {
        Ok(())
    } else {
        Err(DashboardError::UnknownMetric(name.to_string()))
    }
}

fn check_metric(config: &DatasetConfig, name: &str) -> Result<()> {
    if config.is_known_metric(name) {
        Ok(())
    } else {
        Err(DashboardError::UnknownMetric(name.to_string()))
    }
}
