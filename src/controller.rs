//! Slider-driven filter state.
//!
//! The controller owns the current [`TimeFilter`] and, on every slider
//! input, re-aggregates and pushes the result through the binder's refresh
//! path. It never repositions markers; positions only change on camera
//! events.

use chrono::NaiveTime;
use tracing::debug;

use crate::buckets::MinuteBucketIndex;
use crate::model::{Station, StationTraffic, TimeFilter, Trip};
use crate::traffic::compute_station_traffic;
use crate::view::binder::ViewBinder;

pub struct FilterController {
    filter: TimeFilter,
}

impl FilterController {
    /// Initial state is unfiltered.
    pub fn new() -> Self {
        Self {
            filter: TimeFilter::AnyTime,
        }
    }

    pub fn filter(&self) -> TimeFilter {
        self.filter
    }

    /// Handles one slider input event: updates the filter, recomputes the
    /// station traffic, and refreshes the binder's marker attributes.
    /// Returns the fresh aggregation pass.
    pub fn on_slider_input(
        &mut self,
        raw: i32,
        stations: &[Station],
        trips: &[Trip],
        index: &MinuteBucketIndex,
        binder: &mut ViewBinder,
    ) -> Vec<StationTraffic> {
        self.filter = TimeFilter::from_slider(raw);
        debug!(raw, filter = ?self.filter, "Slider input");

        let traffic = compute_station_traffic(stations, trips, index, self.filter);
        binder.refresh(&traffic);

        traffic
    }

    /// Human-readable label for the current filter, or `None` when
    /// unfiltered (the caller shows its "any time" label instead).
    pub fn time_label(&self) -> Option<String> {
        match self.filter {
            TimeFilter::AnyTime => None,
            TimeFilter::Minute(m) => Some(format_minutes(m)),
        }
    }
}

impl Default for FilterController {
    fn default() -> Self {
        Self::new()
    }
}

/// Formats a minute-of-day as a localized short time, e.g. `8:20 AM`.
pub fn format_minutes(minute: u16) -> String {
    let m = u32::from(minute) % 1440;
    let time = NaiveTime::from_hms_opt(m / 60, m % 60, 0).unwrap_or(NaiveTime::MIN);
    time.format("%-I:%M %p").to_string()
}
