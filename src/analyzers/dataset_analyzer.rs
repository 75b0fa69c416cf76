use chrono::NaiveDate;

use crate::config::DatasetConfig;
use crate::models::Dataset;
use crate::pipeline::{category_distribution, CategoryCount};

/// Whole-dataset summary shown by the CLI before any filtering.
#[derive(Debug)]
pub struct DatasetStatistics {
    pub total_records: usize,
    pub unique_stations: usize,
    pub date_range: Option<(NaiveDate, NaiveDate)>,
    pub category_totals: Vec<CategoryCount>,
    pub uncategorized_records: usize,
    pub metric_coverage: Vec<MetricCoverage>,
}

/// Null-value accounting for one metric column.
#[derive(Debug)]
pub struct MetricCoverage {
    pub metric: String,
    pub present: usize,
    pub missing: usize,
}

impl MetricCoverage {
    pub fn missing_percentage(&self) -> f64 {
        let total = self.present + self.missing;
        if total == 0 {
            0.0
        } else {
            (self.missing as f64 / total as f64) * 100.0
        }
    }
}

pub struct DatasetAnalyzer {
    config: DatasetConfig,
}

impl DatasetAnalyzer {
    pub fn new(config: DatasetConfig) -> Self {
        Self { config }
    }

    pub fn analyze(&self, dataset: &Dataset) -> DatasetStatistics {
        let records = dataset.records();

        let category_totals = category_distribution(records);
        let categorized: u64 = category_totals.iter().map(|c| c.count).sum();
        let uncategorized_records = records.len() - categorized as usize;

        let metric_coverage = self
            .config
            .all_metrics()
            .map(|metric| {
                let present = records.iter().filter(|r| r.has_metric(metric)).count();
                MetricCoverage {
                    metric: metric.to_string(),
                    present,
                    missing: records.len() - present,
                }
            })
            .collect();

        DatasetStatistics {
            total_records: records.len(),
            unique_stations: dataset.stations().len(),
            date_range: dataset.date_range(),
            category_totals,
            uncategorized_records,
            metric_coverage,
        }
    }
}

impl DatasetStatistics {
    pub fn summary(&self) -> String {
        let date_range = match self.date_range {
            Some((min, max)) => format!("{} to {}", min, max),
            None => "empty dataset".to_string(),
        };

        format!(
            "Records: {} total\n\
            Stations: {} stations\n\
            Date Range: {}\n\
            Uncategorized rows: {}",
            self.total_records, self.unique_stations, date_range, self.uncategorized_records
        )
    }

    pub fn detailed_summary(&self) -> String {
        let mut lines = vec![self.summary(), String::new()];

        lines.push("Category Totals:".to_string());
        for entry in &self.category_totals {
            lines.push(format!("- {}: {} rows", entry.category, entry.count));
        }

        lines.push(String::new());
        lines.push("Metric Coverage:".to_string());
        for coverage in &self.metric_coverage {
            lines.push(format!(
                "- {}: {} present, {} missing ({:.1}%)",
                coverage.metric,
                coverage.present,
                coverage.missing,
                coverage.missing_percentage()
            ));
        }

        lines.join("\n")
    }
}
