use std::io::Write;

use aq_dashboard::config::DatasetConfig;
use aq_dashboard::models::Category;
use aq_dashboard::pipeline::{compute_all, ChartSelections, FilterSpec, Frequency};
use aq_dashboard::readers::ObservationReader;
use chrono::NaiveDate;
use tempfile::NamedTempFile;

const HEADER: &str =
    "PM2.5,PM10,SO2,NO2,CO,O3,TEMP,PRES,DEWP,RAIN,wd,WSPM,station,datetime,Category";

fn write_dataset() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "{}", HEADER).unwrap();

    // Station A: two days of PM2.5 readings matching the daily-mean example
    for (day, hour, pm25, category) in [
        (1, 0, "10.0", "Excellent"),
        (1, 12, "20.0", "Excellent"),
        (2, 9, "30.0", "Good"),
    ] {
        writeln!(
            file,
            "{},30.0,4.0,20.0,400.0,60.0,1.0,1020.0,-10.0,0.0,NW,2.0,StationA,2013-03-0{} {:02}:00:00,{}",
            pm25, day, hour, category
        )
        .unwrap();
    }

    // Station B: heavily polluted rows, one with a null PM2.5
    writeln!(
        file,
        "200.0,250.0,20.0,90.0,2000.0,5.0,0.5,1021.0,-11.0,0.0,N,1.0,StationB,2013-03-01 08:00:00,Heavily Polluted"
    )
    .unwrap();
    writeln!(
        file,
        "NA,240.0,19.0,85.0,1900.0,6.0,0.4,1021.0,-11.0,0.0,NE,1.2,StationB,2013-03-01 09:00:00,Heavily Polluted"
    )
    .unwrap();

    // Station C: no category, no wind direction
    writeln!(
        file,
        "55.0,80.0,8.0,40.0,800.0,30.0,2.0,1019.0,-9.0,0.0,NA,3.0,StationC,2013-03-02 10:00:00,"
    )
    .unwrap();

    file
}

fn load() -> (aq_dashboard::models::Dataset, DatasetConfig) {
    let file = write_dataset();
    let config = DatasetConfig::default();
    let reader = ObservationReader::new(config.clone());
    let dataset = reader.read_observations(file.path()).unwrap();
    (dataset, config)
}

#[test]
fn test_load_then_compute_all() {
    let (dataset, config) = load();

    assert_eq!(dataset.len(), 6);
    assert_eq!(dataset.stations(), &["StationA", "StationB", "StationC"]);
    assert_eq!(
        dataset.date_range(),
        Some((
            NaiveDate::from_ymd_opt(2013, 3, 1).unwrap(),
            NaiveDate::from_ymd_opt(2013, 3, 2).unwrap()
        ))
    );

    let spec = FilterSpec::unfiltered(&dataset);
    let selections = ChartSelections::defaults(&config);
    let data = compute_all(&dataset, &spec, &selections, &config).unwrap();

    assert_eq!(data.filtered_rows, 6);

    // KPI counts distinct days per category, zero-filled over all six
    assert_eq!(data.kpi_day_counts.len(), 6);
    assert_eq!(data.kpi_day_counts[&Category::Excellent], 1);
    assert_eq!(data.kpi_day_counts[&Category::Good], 1);
    assert_eq!(data.kpi_day_counts[&Category::HeavilyPolluted], 1);
    assert_eq!(data.kpi_day_counts[&Category::ModeratelyPolluted], 0);

    // The daily time series reproduces the worked mean example
    let station_a: Vec<(&str, f64)> = data
        .time_series
        .iter()
        .filter(|p| p.station == "StationA")
        .map(|p| (p.station.as_str(), p.mean))
        .collect();
    assert_eq!(station_a, vec![("StationA", 15.0), ("StationA", 30.0)]);

    // Null PM2.5 rows are excluded from scatter but not from the KPI counts
    assert_eq!(data.scatter.len(), 5);

    // Stacked chart: stations in reverse lexical order, StationC absent
    // because its only row is uncategorized
    let stations: Vec<&str> = data
        .stacked_categories
        .iter()
        .map(|s| s.station.as_str())
        .collect();
    assert_eq!(stations, vec!["StationB", "StationA"]);

    // StationB has one categorized row with a null reference pollutant
    assert_eq!(
        data.stacked_categories[0].counts[&Category::HeavilyPolluted],
        1
    );
}

#[test]
fn test_filtered_compute_keeps_unfiltered_outputs() {
    let (dataset, config) = load();
    let selections = ChartSelections::defaults(&config);

    let everything = compute_all(
        &dataset,
        &FilterSpec::unfiltered(&dataset),
        &selections,
        &config,
    )
    .unwrap();

    let spec = FilterSpec::builder()
        .station("StationA")
        .category(Category::Excellent)
        .date_range(
            NaiveDate::from_ymd_opt(2013, 3, 1).unwrap(),
            NaiveDate::from_ymd_opt(2013, 3, 1).unwrap(),
        )
        .hour_range(0, 6)
        .build()
        .unwrap();
    let narrow = compute_all(&dataset, &spec, &selections, &config).unwrap();

    assert_eq!(narrow.filtered_rows, 1);
    assert_eq!(narrow.kpi_day_counts[&Category::Excellent], 1);
    assert_eq!(narrow.kpi_day_counts[&Category::Good], 0);

    // Pie chart and wind rose ignore the filter by contract
    assert_eq!(narrow.category_distribution, everything.category_distribution);
    assert_eq!(narrow.wind_rose, everything.wind_rose);

    // Wind rose is ordered by canonical category, then direction label
    let rose: Vec<(Category, &str)> = narrow
        .wind_rose
        .iter()
        .map(|e| (e.category, e.wind_direction.as_str()))
        .collect();
    assert_eq!(
        rose,
        vec![
            (Category::Excellent, "NW"),
            (Category::Good, "NW"),
            (Category::HeavilyPolluted, "N"),
            (Category::HeavilyPolluted, "NE"),
        ]
    );
}

#[test]
fn test_empty_selection_yields_zero_state() {
    let (dataset, config) = load();
    let selections = ChartSelections::defaults(&config);

    let spec = FilterSpec::builder().hour_range(20, 4).build().unwrap();
    let data = compute_all(&dataset, &spec, &selections, &config).unwrap();

    assert_eq!(data.filtered_rows, 0);
    assert!(data.kpi_day_counts.values().all(|&v| v == 0));
    assert!(data.time_series.is_empty());
    assert!(data.station_ranking.best.is_empty());
    assert!(data.station_ranking.worst.is_empty());
    assert!(data.scatter.is_empty());
    assert!(data.stacked_categories.is_empty());
}

#[test]
fn test_weekly_resampling_through_public_api() {
    let (dataset, config) = load();
    let mut selections = ChartSelections::defaults(&config);
    selections.frequency = Frequency::Weekly;

    let data = compute_all(
        &dataset,
        &FilterSpec::unfiltered(&dataset),
        &selections,
        &config,
    )
    .unwrap();

    // 2013-03-01 and 2013-03-02 fall in the ISO week starting Mon 2013-02-25
    let week_start = NaiveDate::from_ymd_opt(2013, 2, 25)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    let station_a: Vec<_> = data
        .time_series
        .iter()
        .filter(|p| p.station == "StationA")
        .collect();
    assert_eq!(station_a.len(), 1);
    assert_eq!(station_a[0].bucket_start, week_start);
    assert_eq!(station_a[0].mean, 20.0);
}

#[test]
fn test_outputs_serialize_to_json() {
    let (dataset, config) = load();
    let selections = ChartSelections::defaults(&config);
    let data = compute_all(
        &dataset,
        &FilterSpec::unfiltered(&dataset),
        &selections,
        &config,
    )
    .unwrap();

    let json = serde_json::to_string(&data).unwrap();

    // Category keys use the dataset labels the rendering layer expects
    assert!(json.contains("\"Heavily Polluted\""));
    assert!(json.contains("\"kpi_day_counts\""));
    assert!(json.contains("\"wind_rose\""));
}
