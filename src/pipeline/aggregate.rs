use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{Category, Observation, ALL_CATEGORIES};
use crate::utils::constants::RANKING_SIZE;

/// Row count for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub category: Category,
    pub count: u64,
}

/// Mean of the ranking metric for one station.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationMean {
    pub station: String,
    pub mean: f64,
}

/// The five best (lowest-mean) and five worst (highest-mean) stations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationRanking {
    pub best: Vec<StationMean>,
    pub worst: Vec<StationMean>,
}

/// One correlation point, annotated with its station for coloring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterPoint {
    pub station: String,
    pub x: f64,
    pub y: f64,
}

/// Per-category counts for one station, zero-filled over all categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationCategoryCounts {
    pub station: String,
    pub counts: BTreeMap<Category, u64>,
}

/// Row count for one (category, wind direction) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindRoseEntry {
    pub category: Category,
    pub wind_direction: String,
    pub count: u64,
}

/// Distinct observation days per category over the filtered rows.
///
/// A station-day with several hourly rows in the same category counts once.
/// Every category is present, zero-filled, so the KPI layout always draws
/// one cell per category in canonical order.
pub fn kpi_day_counts(filtered: &[&Observation]) -> BTreeMap<Category, u64> {
    let mut days: BTreeMap<Category, BTreeSet<NaiveDate>> = BTreeMap::new();

    for record in filtered {
        if let Some(category) = record.category {
            days.entry(category).or_default().insert(record.date);
        }
    }

    ALL_CATEGORIES
        .iter()
        .map(|&category| {
            let count = days.get(&category).map_or(0, |dates| dates.len() as u64);
            (category, count)
        })
        .collect()
}

/// Row counts per category over the full, unfiltered record set.
///
/// The pie chart shows the dataset-wide distribution regardless of the
/// active filter. Rows without a category are not counted; absent
/// categories appear with count 0, in canonical order.
pub fn category_distribution(records: &[Observation]) -> Vec<CategoryCount> {
    let mut counts: BTreeMap<Category, u64> = BTreeMap::new();

    for record in records {
        if let Some(category) = record.category {
            *counts.entry(category).or_insert(0) += 1;
        }
    }

    ALL_CATEGORIES
        .iter()
        .map(|&category| CategoryCount {
            category,
            count: counts.get(&category).copied().unwrap_or(0),
        })
        .collect()
}

/// Rank stations by their mean of `metric` over the filtered rows.
///
/// Stations with no non-null value for the metric are unranked. Ties break
/// by station name so repeated runs agree. With fewer than ten ranked
/// stations the two lists overlap; that is intentional and preserved.
pub fn best_worst_stations(filtered: &[&Observation], metric: &str) -> StationRanking {
    let mut sums: BTreeMap<&str, (f64, u64)> = BTreeMap::new();

    for record in filtered {
        if let Some(value) = record.metric(metric) {
            let entry = sums.entry(record.station.as_str()).or_insert((0.0, 0));
            entry.0 += value;
            entry.1 += 1;
        }
    }

    let mut means: Vec<StationMean> = sums
        .into_iter()
        .map(|(station, (sum, count))| StationMean {
            station: station.to_string(),
            mean: sum / count as f64,
        })
        .collect();

    means.sort_by(|a, b| {
        a.mean
            .total_cmp(&b.mean)
            .then_with(|| a.station.cmp(&b.station))
    });
    let best: Vec<StationMean> = means.iter().take(RANKING_SIZE).cloned().collect();

    means.sort_by(|a, b| {
        b.mean
            .total_cmp(&a.mean)
            .then_with(|| a.station.cmp(&b.station))
    });
    let worst: Vec<StationMean> = means.into_iter().take(RANKING_SIZE).collect();

    StationRanking { best, worst }
}

/// One point per filtered row where both metrics are non-null, in row order.
pub fn scatter_pairs(
    filtered: &[&Observation],
    metric_x: &str,
    metric_y: &str,
) -> Vec<ScatterPoint> {
    filtered
        .iter()
        .filter_map(|record| {
            let x = record.metric(metric_x)?;
            let y = record.metric(metric_y)?;
            Some(ScatterPoint {
                station: record.station.clone(),
                x,
                y,
            })
        })
        .collect()
}

/// Per-station, per-category counts of rows with a non-null reference
/// pollutant — the row-count proxy the stacked chart is built on.
///
/// Only stations with at least one categorized row appear. Stations come
/// out in reverse lexical order; each carries all categories, zero-filled.
pub fn stacked_category_counts(
    filtered: &[&Observation],
    reference_metric: &str,
) -> Vec<StationCategoryCounts> {
    let mut stations: BTreeMap<&str, BTreeMap<Category, u64>> = BTreeMap::new();

    for record in filtered {
        let Some(category) = record.category else {
            continue;
        };
        let counts = stations
            .entry(record.station.as_str())
            .or_insert_with(|| ALL_CATEGORIES.iter().map(|&c| (c, 0)).collect());
        if record.has_metric(reference_metric) {
            *counts.entry(category).or_insert(0) += 1;
        }
    }

    stations
        .into_iter()
        .rev()
        .map(|(station, counts)| StationCategoryCounts {
            station: station.to_string(),
            counts,
        })
        .collect()
}

/// Row counts per (wind direction, category) pair over the full, unfiltered
/// record set — the wind rose ignores the active filter by design.
///
/// Rows missing either field are excluded; only present pairs are emitted,
/// ordered by canonical category, then wind-direction label.
pub fn wind_rose_counts(records: &[Observation]) -> Vec<WindRoseEntry> {
    let mut counts: BTreeMap<(Category, &str), u64> = BTreeMap::new();

    for record in records {
        let (Some(category), Some(direction)) = (record.category, record.wind_direction.as_deref())
        else {
            continue;
        };
        *counts.entry((category, direction)).or_insert(0) += 1;
    }

    counts
        .into_iter()
        .map(|((category, wind_direction), count)| WindRoseEntry {
            category,
            wind_direction: wind_direction.to_string(),
            count,
        })
        .collect()
}
