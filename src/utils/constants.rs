/// Identifier column defaults for the merged source table
pub const DEFAULT_DATETIME_COLUMN: &str = "datetime";
pub const DEFAULT_STATION_COLUMN: &str = "station";
pub const DEFAULT_CATEGORY_COLUMN: &str = "Category";
pub const DEFAULT_WIND_DIRECTION_COLUMN: &str = "wd";

/// Timestamp format of the merged source table
pub const DEFAULT_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Pollutant metric columns
pub const DEFAULT_POLLUTANT_METRICS: [&str; 6] = ["PM2.5", "PM10", "SO2", "NO2", "CO", "O3"];

/// Weather metric columns
pub const DEFAULT_WEATHER_METRICS: [&str; 5] = ["TEMP", "PRES", "DEWP", "RAIN", "WSPM"];

/// Reference pollutant used as the row-count proxy in the stacked chart
pub const DEFAULT_REFERENCE_POLLUTANT: &str = "PM2.5";

/// Cell values coerced to null during load
pub const NULL_SENTINELS: [&str; 3] = ["NA", "NaN", "nan"];

/// Hour-of-day bounds for the hour-range selector
pub const MIN_HOUR: u32 = 0;
pub const MAX_HOUR: u32 = 23;

/// Number of stations on each side of the best/worst ranking
pub const RANKING_SIZE: usize = 5;
