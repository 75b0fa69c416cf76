use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::info;

use crate::analyzers::DatasetAnalyzer;
use crate::cli::args::{Cli, Commands};
use crate::config::DatasetConfig;
use crate::error::{DashboardError, Result};
use crate::models::{Category, Dataset};
use crate::pipeline::{compute_all, ChartSelections, FilterSpec};
use crate::readers::ObservationReader;
use crate::utils::progress::ProgressReporter;

pub fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => DatasetConfig::from_file(path)?,
        None => DatasetConfig::default(),
    };

    match cli.command {
        Commands::Compute {
            input,
            output,
            stations,
            category,
            start_date,
            end_date,
            start_hour,
            end_hour,
            metric,
            frequency,
            ranking_metric,
            scatter_x,
            scatter_y,
            pretty,
        } => {
            let dataset = load_dataset(&config, &input)?;

            let mut builder = FilterSpec::builder()
                .stations(stations)
                .hour_range(start_hour, end_hour);
            if let Some(label) = category {
                let category = Category::parse(&label)
                    .ok_or_else(|| DashboardError::UnknownCategory(label))?;
                builder = builder.category(category);
            }
            let (dataset_start, dataset_end) = dataset
                .date_range()
                .unwrap_or((chrono::NaiveDate::MIN, chrono::NaiveDate::MAX));
            builder = builder.date_range(
                start_date.unwrap_or(dataset_start),
                end_date.unwrap_or(dataset_end),
            );
            let spec = builder.build()?;

            let selections = ChartSelections {
                ranking_metric: ranking_metric.unwrap_or_else(|| metric.clone()),
                timeseries_metric: metric,
                frequency,
                scatter_x,
                scatter_y,
            };

            let data = compute_all(&dataset, &spec, &selections, &config)?;
            info!(filtered = data.filtered_rows, "computed chart outputs");

            match output {
                Some(path) => {
                    let mut writer = BufWriter::new(File::create(&path)?);
                    write_json(&mut writer, &data, pretty)?;
                    println!("Wrote chart outputs to {}", path.display());
                }
                None => {
                    let stdout = std::io::stdout();
                    let mut writer = stdout.lock();
                    write_json(&mut writer, &data, pretty)?;
                    writeln!(writer)?;
                }
            }
        }

        Commands::Info { input, sample } => {
            let dataset = load_dataset(&config, &input)?;

            let analyzer = DatasetAnalyzer::new(config);
            let stats = analyzer.analyze(&dataset);
            println!("{}", stats.detailed_summary());

            if sample > 0 && !dataset.is_empty() {
                println!("\nSample Records (showing up to {} records):", sample);
                for (i, record) in dataset.records().iter().take(sample).enumerate() {
                    let category = record
                        .category
                        .map(|c| c.to_string())
                        .unwrap_or_else(|| "-".to_string());
                    let wind = record.wind_direction.as_deref().unwrap_or("-");
                    println!(
                        "{}. {} at {}: category={}, wd={}, {} metrics",
                        i + 1,
                        record.station,
                        record.datetime,
                        category,
                        wind,
                        record.metrics.len()
                    );
                }
            }
        }

        Commands::Validate { input } => {
            let dataset = load_dataset(&config, &input)?;

            let analyzer = DatasetAnalyzer::new(config);
            let stats = analyzer.analyze(&dataset);
            println!("{}", stats.summary());

            if dataset.is_empty() {
                println!("⚠️  Dataset loaded but contains no records");
            } else {
                println!("✅ Dataset loaded cleanly");
            }
        }
    }

    Ok(())
}

fn load_dataset(config: &DatasetConfig, input: &Path) -> Result<Dataset> {
    let progress = ProgressReporter::new_spinner("Loading observations...", false);

    let reader = ObservationReader::new(config.clone());
    let dataset = reader.read_observations(input)?;

    progress.finish_with_message(&format!(
        "Loaded {} records from {} stations",
        dataset.len(),
        dataset.stations().len()
    ));

    Ok(dataset)
}

fn write_json<W: Write>(
    writer: &mut W,
    data: &crate::pipeline::DashboardData,
    pretty: bool,
) -> Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut *writer, data)?;
    } else {
        serde_json::to_writer(&mut *writer, data)?;
    }
    writer.flush()?;
    Ok(())
}
