//! Deserialization of the two input datasets.
//!
//! Stations arrive as GBFS-style JSON (`{"data": {"stations": [...]}}`),
//! trips as a CSV export. Malformed input is a load error surfaced here,
//! before any aggregation runs.

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use serde::Deserialize;

use crate::model::{Station, Trip};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

#[derive(Deserialize)]
struct StationFeed {
    data: StationFeedData,
}

#[derive(Deserialize)]
struct StationFeedData {
    stations: Vec<Station>,
}

/// Decodes the station dataset from raw JSON bytes.
///
/// # Errors
///
/// Returns an error if the bytes are not valid JSON or the feed is missing
/// the `data.stations` array.
pub fn parse_stations(bytes: &[u8]) -> Result<Vec<Station>> {
    let feed: StationFeed = serde_json::from_slice(bytes).context("parsing station JSON")?;
    Ok(feed.data.stations)
}

/// One CSV row; extra columns in the export (ride id, bike type, member
/// status) are ignored by the header-driven reader.
#[derive(Deserialize)]
struct TripRecord {
    start_station_id: String,
    end_station_id: String,
    started_at: String,
    ended_at: String,
}

/// Decodes the trip dataset from raw CSV bytes, deriving each trip's
/// minute-of-day fields in the process.
///
/// # Errors
///
/// Returns an error on any row with missing columns or an unparseable
/// timestamp; a partially loaded trip list is never produced.
pub fn parse_trips(bytes: &[u8]) -> Result<Vec<Trip>> {
    let mut reader = csv::Reader::from_reader(bytes);
    let mut trips = Vec::new();

    for (row, result) in reader.deserialize().enumerate() {
        let record: TripRecord = result.with_context(|| format!("trip CSV row {}", row + 1))?;
        let started_at = parse_timestamp(&record.started_at)
            .with_context(|| format!("trip CSV row {}: started_at", row + 1))?;
        let ended_at = parse_timestamp(&record.ended_at)
            .with_context(|| format!("trip CSV row {}: ended_at", row + 1))?;

        trips.push(Trip::new(
            record.start_station_id,
            record.end_station_id,
            started_at,
            ended_at,
        ));
    }

    Ok(trips)
}

fn parse_timestamp(raw: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw.trim(), TIMESTAMP_FORMAT)
        .with_context(|| format!("invalid timestamp {raw:?}"))
}
