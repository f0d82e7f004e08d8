use bikeflow::buckets::MinuteBucketIndex;
use bikeflow::controller::FilterController;
use bikeflow::model::TimeFilter;
use bikeflow::parser::{parse_stations, parse_trips};
use bikeflow::traffic::compute_station_traffic;
use bikeflow::view::binder::ViewBinder;
use bikeflow::view::map::MercatorCamera;

fn load_fixtures() -> (Vec<bikeflow::model::Station>, Vec<bikeflow::model::Trip>) {
    let stations =
        parse_stations(include_bytes!("fixtures/stations.json")).expect("Failed to parse stations");
    let trips = parse_trips(include_bytes!("fixtures/trips.csv")).expect("Failed to parse trips");
    (stations, trips)
}

#[test]
fn test_full_pipeline_unfiltered() {
    let (stations, trips) = load_fixtures();
    assert_eq!(stations.len(), 3);
    assert_eq!(trips.len(), 5);

    let index = MinuteBucketIndex::build(&trips);
    let traffic = compute_station_traffic(&stations, &trips, &index, TimeFilter::AnyTime);

    let by_id = |id: &str| traffic.iter().find(|s| s.short_name == id).unwrap();
    assert_eq!(by_id("A32000").departures, 2);
    assert_eq!(by_id("A32000").arrivals, 2);
    assert_eq!(by_id("A32000").total_traffic, 4);
    assert_eq!(by_id("M32006").total_traffic, 3);
    assert_eq!(by_id("B32012").total_traffic, 2);

    // One trip starts at an id with no station; it drops out of the sums.
    let total_departures: u32 = traffic.iter().map(|s| s.departures).sum();
    assert_eq!(total_departures, 4);
    let total_arrivals: u32 = traffic.iter().map(|s| s.arrivals).sum();
    assert_eq!(total_arrivals, 5);

    for s in &traffic {
        assert_eq!(s.total_traffic, s.departures + s.arrivals);
    }
}

#[test]
fn test_full_pipeline_midnight_wraparound() {
    let (stations, trips) = load_fixtures();
    let index = MinuteBucketIndex::build(&trips);

    // The only trip near minute 5 is the one spanning midnight
    // (start 23:59, end 00:08).
    let traffic = compute_station_traffic(&stations, &trips, &index, TimeFilter::Minute(5));
    let a = traffic.iter().find(|s| s.short_name == "A32000").unwrap();
    assert_eq!(a.departures, 1);
    assert_eq!(a.arrivals, 1);

    let others: u32 = traffic
        .iter()
        .filter(|s| s.short_name != "A32000")
        .map(|s| s.total_traffic)
        .sum();
    assert_eq!(others, 0);
}

#[test]
fn test_full_pipeline_slider_session() {
    let (stations, trips) = load_fixtures();
    let index = MinuteBucketIndex::build(&trips);

    let mut camera = MercatorCamera::new(-71.09415, 42.36027, 12.0, 1000.0, 800.0);
    let initial = compute_station_traffic(&stations, &trips, &index, TimeFilter::AnyTime);
    let mut binder = ViewBinder::new(&initial, &camera);
    let mut controller = FilterController::new();

    assert_eq!(binder.len(), 3);
    // A32000 carries the load-time maximum, so it gets the full radius.
    assert_eq!(binder.marker("A32000").unwrap().radius, 25.0);

    // Scrub to the morning rush window.
    controller.on_slider_input(500, &stations, &trips, &index, &mut binder);
    assert_eq!(controller.time_label().unwrap(), "8:20 AM");
    let m = binder.marker("M32006").unwrap();
    assert_eq!(m.tooltip, "2 trips (1 departures, 1 arrivals)");

    // The midday trip is outside the window; B32012 only shows the
    // unmatched trip's arrival.
    let b = binder.marker("B32012").unwrap();
    assert_eq!(b.tooltip, "1 trips (0 departures, 1 arrivals)");
    assert_eq!(b.flow_class, 0.0);

    // Camera pan repositions markers without touching traffic attributes.
    let before = binder.marker("A32000").unwrap().clone();
    camera.pan_to(-71.2, 42.36027);
    binder.reposition(&camera);
    let after = binder.marker("A32000").unwrap();
    assert_ne!(after.x, before.x);
    assert_eq!(after.radius, before.radius);
    assert_eq!(after.tooltip, before.tooltip);

    // Back to the sentinel: unfiltered counts return, markers survive.
    controller.on_slider_input(-1, &stations, &trips, &index, &mut binder);
    assert_eq!(controller.filter(), TimeFilter::AnyTime);
    assert!(controller.time_label().is_none());
    assert_eq!(binder.len(), 3);
    assert_eq!(
        binder.marker("A32000").unwrap().tooltip,
        "4 trips (2 departures, 2 arrivals)"
    );
}
