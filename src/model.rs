//! Core data types: stations, trips, per-station traffic, and the
//! time-of-day filter driven by the slider.

use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize};

/// Number of minute-of-day buckets in one day.
pub const MINUTES_PER_DAY: u16 = 1440;

/// Slider value meaning "no time filter".
pub const ANY_TIME_SENTINEL: i32 = -1;

/// A fixed bike-share dock location. Identity only; traffic counts live on
/// [`StationTraffic`] so repeated aggregation passes never mutate shared
/// station records.
#[derive(Debug, Clone, Deserialize)]
pub struct Station {
    pub short_name: String,
    #[serde(deserialize_with = "lenient_f64")]
    pub lon: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub lat: f64,
}

/// The station feed serves coordinates as either JSON numbers or numeric
/// strings depending on the export; accept both.
fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Num(f64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Num(n) => Ok(n),
        Raw::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

/// A single rental event. Immutable once loaded; the minute-of-day fields
/// are derived from the timestamps exactly once at construction.
#[derive(Debug, Clone)]
pub struct Trip {
    pub start_station_id: String,
    pub end_station_id: String,
    pub started_at: NaiveDateTime,
    pub ended_at: NaiveDateTime,
    pub start_minute: u16,
    pub end_minute: u16,
}

impl Trip {
    pub fn new(
        start_station_id: String,
        end_station_id: String,
        started_at: NaiveDateTime,
        ended_at: NaiveDateTime,
    ) -> Self {
        Self {
            start_minute: minutes_since_midnight(started_at),
            end_minute: minutes_since_midnight(ended_at),
            start_station_id,
            end_station_id,
            started_at,
            ended_at,
        }
    }
}

/// Wall-clock minute-of-day in `[0, 1439]`, ignoring the date.
pub fn minutes_since_midnight(t: NaiveDateTime) -> u16 {
    (t.hour() * 60 + t.minute()) as u16
}

/// Refreshed per-station counts for one aggregation pass. Always built
/// fresh from the station identity fields; `total_traffic` has no
/// derivation path other than `departures + arrivals`.
#[derive(Debug, Clone, Serialize)]
pub struct StationTraffic {
    pub short_name: String,
    pub lon: f64,
    pub lat: f64,
    pub departures: u32,
    pub arrivals: u32,
    pub total_traffic: u32,
}

impl StationTraffic {
    pub fn new(station: &Station, departures: u32, arrivals: u32) -> Self {
        Self {
            short_name: station.short_name.clone(),
            lon: station.lon,
            lat: station.lat,
            departures,
            arrivals,
            total_traffic: departures + arrivals,
        }
    }

    /// Fraction of traffic that is departures. A station with no traffic in
    /// the current window reports 0.5, meaning "balanced / no data" rather
    /// than all-departure or all-arrival.
    pub fn departure_ratio(&self) -> f64 {
        if self.total_traffic == 0 {
            0.5
        } else {
            f64::from(self.departures) / f64::from(self.total_traffic)
        }
    }
}

/// Current slider state: either no filter, or a specific minute-of-day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeFilter {
    AnyTime,
    Minute(u16),
}

impl TimeFilter {
    /// Maps a raw slider value to a filter. Any negative value is the
    /// "any time" sentinel; in-range values select that minute.
    pub fn from_slider(raw: i32) -> Self {
        if raw < 0 {
            TimeFilter::AnyTime
        } else {
            TimeFilter::Minute((raw as u16).min(MINUTES_PER_DAY - 1))
        }
    }
}
