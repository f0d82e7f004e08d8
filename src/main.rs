//! CLI entry point for the bikeflow station-traffic tool.
//!
//! Provides subcommands for writing a single aggregation snapshot, listing
//! the busiest stations, and sweeping the time-of-day slider across a full
//! day the way the interactive map would.

use anyhow::Result;
use bikeflow::{
    buckets::MinuteBucketIndex,
    controller::FilterController,
    fetch::{BasicClient, fetch_bytes},
    model::{ANY_TIME_SENTINEL, Station, TimeFilter, Trip},
    output::{SweepRow, append_sweep_row, write_snapshot},
    parser::{parse_stations, parse_trips},
    traffic::compute_station_traffic,
    view::{binder::ViewBinder, map::MercatorCamera},
};
use clap::{Parser, Subcommand};
use std::ffi::OsStr;
use std::path::Path;
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

const DEFAULT_STATIONS_URL: &str = "https://dsc106.com/labs/lab07/data/bluebikes-stations.json";
const DEFAULT_TRIPS_URL: &str = "https://dsc106.com/labs/lab07/data/bluebikes-traffic-2024-03.csv";

// Initial camera over Boston, matching the interactive map.
const CAMERA_CENTER: (f64, f64) = (-71.09415, 42.36027);
const CAMERA_ZOOM: f64 = 12.0;

#[derive(Parser)]
#[command(name = "bikeflow")]
#[command(about = "Aggregate bike-share trips into per-station traffic", long_about = None)]
struct Cli {
    /// Station dataset: URL or local JSON file
    #[arg(long, default_value = DEFAULT_STATIONS_URL, global = true)]
    stations: String,

    /// Trip dataset: URL or local CSV file
    #[arg(long, default_value = DEFAULT_TRIPS_URL, global = true)]
    trips: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Aggregate at one slider position and write a per-station CSV
    Snapshot {
        /// Minute of day to filter on (-1 = any time)
        #[arg(short, long, default_value_t = ANY_TIME_SENTINEL)]
        minute: i32,

        /// CSV file to write the snapshot to
        #[arg(short, long, default_value = "snapshot.csv")]
        output: String,
    },
    /// Print the busiest stations for one slider position
    Top {
        /// Minute of day to filter on (-1 = any time)
        #[arg(short, long, default_value_t = ANY_TIME_SENTINEL)]
        minute: i32,

        /// Number of stations to print
        #[arg(short, long, default_value_t = 10)]
        count: usize,
    },
    /// Scrub the slider across the whole day and log one row per stop
    Sweep {
        /// Minutes between slider stops
        #[arg(long, default_value_t = 30)]
        step: u16,

        /// CSV file to append sweep rows to
        #[arg(short, long, default_value = "sweep.csv")]
        output: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/bikeflow.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("bikeflow.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse().unwrap()));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse().unwrap()));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    let (stations, trips) = load_datasets(&cli.stations, &cli.trips).await?;
    let index = MinuteBucketIndex::build(&trips);

    match cli.command {
        Commands::Snapshot { minute, output } => {
            let filter = TimeFilter::from_slider(minute);
            let traffic = compute_station_traffic(&stations, &trips, &index, filter);
            write_snapshot(&output, &traffic)?;
            info!(%output, stations = traffic.len(), ?filter, "Snapshot written");
        }
        Commands::Top { minute, count } => {
            let filter = TimeFilter::from_slider(minute);
            let mut traffic = compute_station_traffic(&stations, &trips, &index, filter);
            traffic.sort_by(|a, b| b.total_traffic.cmp(&a.total_traffic));

            for station in traffic.iter().take(count) {
                info!(
                    station = %station.short_name,
                    ratio = station.departure_ratio(),
                    "{} trips ({} departures, {} arrivals)",
                    station.total_traffic,
                    station.departures,
                    station.arrivals,
                );
            }
        }
        Commands::Sweep { step, output } => {
            sweep(&stations, &trips, &index, step.max(1), &output)?;
        }
    }

    Ok(())
}

/// Loads dataset bytes from a local file path or fetches them over HTTP.
#[tracing::instrument(fields(source = %src))]
async fn fetcher(src: &str) -> Result<Vec<u8>> {
    let bytes = if src.starts_with("http") {
        let client = BasicClient::new();
        fetch_bytes(&client, src).await?
    } else {
        std::fs::read(src)?
    };
    Ok(bytes)
}

/// Fetches and parses both datasets. The fetches run concurrently and
/// either failure aborts initialization with nothing rendered.
async fn load_datasets(stations_src: &str, trips_src: &str) -> Result<(Vec<Station>, Vec<Trip>)> {
    let (station_bytes, trip_bytes) = tokio::try_join!(fetcher(stations_src), fetcher(trips_src))?;

    let stations = parse_stations(&station_bytes)?;
    let trips = parse_trips(&trip_bytes)?;

    info!(
        stations = stations.len(),
        trips = trips.len(),
        "Datasets loaded"
    );
    Ok((stations, trips))
}

/// Drives the filter controller and view binder through a full day of
/// slider stops, appending one summary row per stop.
#[tracing::instrument(skip(stations, trips, index))]
fn sweep(
    stations: &[Station],
    trips: &[Trip],
    index: &MinuteBucketIndex,
    step: u16,
    output: &str,
) -> Result<()> {
    let camera = MercatorCamera::new(
        CAMERA_CENTER.0,
        CAMERA_CENTER.1,
        CAMERA_ZOOM,
        1024.0,
        768.0,
    );

    // First render: unfiltered traffic fixes the radius-scale domain.
    let initial = compute_station_traffic(stations, trips, index, TimeFilter::AnyTime);
    let mut binder = ViewBinder::new(&initial, &camera);
    let mut controller = FilterController::new();

    for minute in (0u16..1440).step_by(usize::from(step)) {
        let traffic =
            controller.on_slider_input(i32::from(minute), stations, trips, index, &mut binder);

        let label = controller
            .time_label()
            .unwrap_or_else(|| "(any time)".to_string());
        let total_departures: u32 = traffic.iter().map(|s| s.departures).sum();
        let total_arrivals: u32 = traffic.iter().map(|s| s.arrivals).sum();
        let busiest = traffic.iter().max_by_key(|s| s.total_traffic);

        let row = SweepRow {
            minute,
            label,
            total_departures,
            total_arrivals,
            busiest_station: busiest.map(|s| s.short_name.clone()).unwrap_or_default(),
            busiest_total: busiest.map(|s| s.total_traffic).unwrap_or(0),
        };
        append_sweep_row(output, &row)?;
    }

    info!(%output, markers = binder.len(), "Sweep complete");
    Ok(())
}
