//! Output formatting and persistence for aggregated station traffic.
//!
//! Supports pretty-printing, JSON serialization, and CSV snapshots.

use anyhow::Result;
use serde::Serialize;
use std::fs::OpenOptions;
use std::path::Path;
use tracing::{debug, info};

use crate::model::StationTraffic;

/// Logs station traffic using Rust's debug pretty-print format.
pub fn print_pretty(traffic: &[StationTraffic]) {
    debug!("{:#?}", traffic);
}

/// Logs station traffic as pretty-printed JSON.
pub fn print_json(traffic: &[StationTraffic]) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(traffic)?);
    Ok(())
}

/// Writes one full aggregation pass as a CSV file, replacing any previous
/// snapshot at the same path.
pub fn write_snapshot(path: &str, traffic: &[StationTraffic]) -> Result<()> {
    debug!(path, stations = traffic.len(), "Writing snapshot CSV");

    let mut writer = csv::Writer::from_path(path)?;
    for row in traffic {
        writer.serialize(row)?;
    }
    writer.flush()?;

    Ok(())
}

/// One row of a day sweep: the aggregate picture at a single slider stop.
#[derive(Debug, Serialize)]
pub struct SweepRow {
    pub minute: u16,
    pub label: String,
    pub total_departures: u32,
    pub total_arrivals: u32,
    pub busiest_station: String,
    pub busiest_total: u32,
}

/// Appends a [`SweepRow`] to a CSV file.
///
/// Creates the file with headers if it does not already exist.
pub fn append_sweep_row(path: &str, row: &SweepRow) -> Result<()> {
    let file_exists = Path::new(path).exists();
    debug!(path, file_exists, minute = row.minute, "Appending sweep row");

    let file = OpenOptions::new().append(true).create(true).open(path)?;

    let mut writer = csv::WriterBuilder::new()
        .has_headers(!file_exists) // IMPORTANT when appending
        .from_writer(file);

    writer.serialize(row)?;
    writer.flush()?;

    Ok(())
}
