use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, DashboardError>;

/// Errors produced while loading, validating, and processing air quality data.
#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to parse datetime '{value}' in row {row}")]
    DatetimeParse { row: usize, value: String },

    #[error("Missing required column: {0}")]
    MissingColumn(String),

    #[error("Invalid data format: {0}")]
    InvalidFormat(String),

    #[error("Unknown category label: {0}")]
    UnknownCategory(String),

    #[error("Unknown metric: {0}")]
    UnknownMetric(String),

    #[error("Missing required data: {0}")]
    MissingData(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration file error: {0}")]
    ConfigFile(#[from] config::ConfigError),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),
}
