use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::pipeline::Frequency;

#[derive(Parser)]
#[command(name = "aq-dashboard")]
#[command(about = "Filter-and-aggregation engine for the Beijing air quality dashboard")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Dataset configuration file (TOML)")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Apply a filter selection and emit every chart output as JSON
    Compute {
        #[arg(short, long, help = "Input CSV file with merged observations")]
        input: PathBuf,

        #[arg(short, long, help = "Output JSON file [default: stdout]")]
        output: Option<PathBuf>,

        #[arg(
            long,
            value_delimiter = ',',
            help = "Stations to keep (comma separated) [default: all]"
        )]
        stations: Vec<String>,

        #[arg(long, help = "Category to keep [default: all]")]
        category: Option<String>,

        #[arg(long, help = "First date to keep [default: dataset start]")]
        start_date: Option<NaiveDate>,

        #[arg(long, help = "Last date to keep [default: dataset end]")]
        end_date: Option<NaiveDate>,

        #[arg(long, default_value = "0")]
        start_hour: u32,

        #[arg(long, default_value = "23")]
        end_hour: u32,

        #[arg(short, long, default_value = "PM2.5", help = "Time-series pollutant")]
        metric: String,

        #[arg(short, long, value_enum, default_value = "daily")]
        frequency: Frequency,

        #[arg(long, help = "Ranking pollutant [default: same as --metric]")]
        ranking_metric: Option<String>,

        #[arg(long, default_value = "PM2.5")]
        scatter_x: String,

        #[arg(long, default_value = "TEMP")]
        scatter_y: String,

        #[arg(long, default_value = "false", help = "Indent the JSON output")]
        pretty: bool,
    },

    /// Display summary information about a dataset
    Info {
        #[arg(short, long, help = "Input CSV file with merged observations")]
        input: PathBuf,

        #[arg(short, long, default_value = "10")]
        sample: usize,
    },

    /// Load a dataset and report coverage without computing outputs
    Validate {
        #[arg(short, long, help = "Input CSV file with merged observations")]
        input: PathBuf,
    },
}
