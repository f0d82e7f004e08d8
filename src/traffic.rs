//! Per-station traffic aggregation.

use std::collections::HashMap;

use crate::buckets::MinuteBucketIndex;
use crate::model::{Station, StationTraffic, TimeFilter, Trip};

/// Aggregates trips into per-station departure/arrival counts under a
/// time-of-day filter.
///
/// Pure with respect to its inputs: every pass starts from the canonical
/// station identity fields and returns fresh [`StationTraffic`] values, so
/// repeated filters never compound on shared records. Stations with no
/// matching trips report zero counts; trips referencing an id with no
/// station are counted toward nothing.
pub fn compute_station_traffic(
    stations: &[Station],
    trips: &[Trip],
    index: &MinuteBucketIndex,
    filter: TimeFilter,
) -> Vec<StationTraffic> {
    let mut departures: HashMap<&str, u32> = HashMap::new();
    let mut arrivals: HashMap<&str, u32> = HashMap::new();

    match filter {
        // Unfiltered is the union of all buckets, i.e. the raw trip list.
        TimeFilter::AnyTime => {
            for trip in trips {
                *departures.entry(&trip.start_station_id).or_default() += 1;
                *arrivals.entry(&trip.end_station_id).or_default() += 1;
            }
        }
        TimeFilter::Minute(m) => {
            for i in index.departures_near(m) {
                let trip = &trips[i as usize];
                *departures.entry(&trip.start_station_id).or_default() += 1;
            }
            for i in index.arrivals_near(m) {
                let trip = &trips[i as usize];
                *arrivals.entry(&trip.end_station_id).or_default() += 1;
            }
        }
    }

    stations
        .iter()
        .map(|station| {
            let dep = departures
                .get(station.short_name.as_str())
                .copied()
                .unwrap_or(0);
            let arr = arrivals
                .get(station.short_name.as_str())
                .copied()
                .unwrap_or(0);
            StationTraffic::new(station, dep, arr)
        })
        .collect()
}
