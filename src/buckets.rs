//! Minute-of-day bucket index over the trip list.
//!
//! Built once after load and never mutated afterwards; the aggregator is
//! handed the index explicitly rather than reaching for module state.

use crate::model::{MINUTES_PER_DAY, Trip};

/// Half-width of the filter window, in minutes.
pub const WINDOW_MINUTES: u16 = 60;

/// 1440 departure buckets and 1440 arrival buckets of trip indices. Bucket
/// `i` holds the trips whose relevant minute-of-day equals `i`; a trip
/// appears in exactly one departure bucket and exactly one arrival bucket
/// (possibly the same minute).
#[derive(Debug)]
pub struct MinuteBucketIndex {
    departures: Vec<Vec<u32>>,
    arrivals: Vec<Vec<u32>>,
}

impl MinuteBucketIndex {
    pub fn build(trips: &[Trip]) -> Self {
        let minutes = usize::from(MINUTES_PER_DAY);
        let mut departures = vec![Vec::new(); minutes];
        let mut arrivals = vec![Vec::new(); minutes];

        for (i, trip) in trips.iter().enumerate() {
            departures[usize::from(trip.start_minute)].push(i as u32);
            arrivals[usize::from(trip.end_minute)].push(i as u32);
        }

        Self {
            departures,
            arrivals,
        }
    }

    /// Trip indices departing within the circular window around `minute`.
    pub fn departures_near(&self, minute: u16) -> Vec<u32> {
        collect_window(&self.departures, minute)
    }

    /// Trip indices arriving within the circular window around `minute`.
    pub fn arrivals_near(&self, minute: u16) -> Vec<u32> {
        collect_window(&self.arrivals, minute)
    }
}

/// Bucket indices for the circular range
/// `[(m - 60 + 1440) mod 1440, (m + 60) mod 1440)`, wrapping through
/// midnight when the bounds cross it.
pub fn circular_window(minute: u16) -> impl Iterator<Item = usize> {
    let span = u32::from(MINUTES_PER_DAY);
    let start = (u32::from(minute) + span - u32::from(WINDOW_MINUTES)) % span;
    (0..u32::from(WINDOW_MINUTES) * 2).map(move |k| ((start + k) % span) as usize)
}

fn collect_window(buckets: &[Vec<u32>], minute: u16) -> Vec<u32> {
    let mut out = Vec::new();
    for bucket in circular_window(minute) {
        out.extend_from_slice(&buckets[bucket]);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};

    fn ts(minute: u16) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(u32::from(minute) / 60, u32::from(minute) % 60, 0)
            .unwrap()
    }

    fn trip(start_minute: u16, end_minute: u16) -> Trip {
        Trip::new("A".into(), "B".into(), ts(start_minute), ts(end_minute))
    }

    #[test]
    fn test_build_places_trip_in_both_buckets() {
        let trips = vec![trip(10, 20)];
        let index = MinuteBucketIndex::build(&trips);

        assert_eq!(index.departures_near(10), vec![0]);
        assert_eq!(index.arrivals_near(20), vec![0]);
    }

    #[test]
    fn test_same_minute_start_and_end() {
        let trips = vec![trip(300, 300)];
        let index = MinuteBucketIndex::build(&trips);

        assert_eq!(index.departures_near(300), vec![0]);
        assert_eq!(index.arrivals_near(300), vec![0]);
    }

    #[test]
    fn test_window_is_half_open_120_minutes() {
        let window: Vec<usize> = circular_window(500).collect();
        assert_eq!(window.len(), 120);
        assert_eq!(window[0], 440);
        assert_eq!(*window.last().unwrap(), 559);
    }

    #[test]
    fn test_window_wraps_through_midnight() {
        let window: Vec<usize> = circular_window(5).collect();
        assert_eq!(window[0], 1385);
        assert!(window.contains(&1439));
        assert!(window.contains(&0));
        assert!(window.contains(&64));
        assert!(!window.contains(&65));
    }

    #[test]
    fn test_filter_five_includes_minute_1439() {
        let trips = vec![trip(1439, 1439)];
        let index = MinuteBucketIndex::build(&trips);
        assert_eq!(index.departures_near(5), vec![0]);
    }

    #[test]
    fn test_filter_five_excludes_minute_700() {
        let trips = vec![trip(700, 700)];
        let index = MinuteBucketIndex::build(&trips);
        assert!(index.departures_near(5).is_empty());
    }

    #[test]
    fn test_filter_1430_wraps_to_include_minute_10() {
        let trips = vec![trip(10, 10)];
        let index = MinuteBucketIndex::build(&trips);
        assert_eq!(index.departures_near(1430), vec![0]);
        assert_eq!(index.arrivals_near(1430), vec![0]);
    }
}
