//! Keeps one visual marker per station in sync with the current traffic
//! and camera.
//!
//! Markers are keyed by station id and created exactly once, on the first
//! render; after that they are updated in place. Traffic refreshes and
//! camera repositions are independent paths: a filter change never moves a
//! marker and a camera move never resizes one.

use std::collections::HashMap;

use tracing::debug;

use crate::model::StationTraffic;
use crate::view::map::Projection;
use crate::view::scale::{self, RadiusScale};

#[derive(Debug, Clone)]
pub struct Marker {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub departure_ratio: f64,
    pub flow_class: f64,
    pub tooltip: String,
}

/// Station identity retained for repositioning; fixed after the first
/// render, no stations are added or removed at runtime.
#[derive(Debug, Clone)]
struct Site {
    short_name: String,
    lon: f64,
    lat: f64,
}

pub struct ViewBinder {
    scale: RadiusScale,
    sites: Vec<Site>,
    markers: HashMap<String, Marker>,
}

impl ViewBinder {
    /// First render: fits the radius scale to the initial (unfiltered)
    /// traffic and creates one marker per station.
    pub fn new(initial: &[StationTraffic], projection: &impl Projection) -> Self {
        let scale = RadiusScale::fit(initial);
        let sites = initial
            .iter()
            .map(|s| Site {
                short_name: s.short_name.clone(),
                lon: s.lon,
                lat: s.lat,
            })
            .collect();

        let mut binder = Self {
            scale,
            sites,
            markers: HashMap::new(),
        };

        for traffic in initial {
            let p = projection.project(traffic.lon, traffic.lat);
            binder.markers.insert(
                traffic.short_name.clone(),
                Marker {
                    x: p.x,
                    y: p.y,
                    radius: binder.scale.radius(traffic.total_traffic),
                    departure_ratio: traffic.departure_ratio(),
                    flow_class: scale::flow_class(traffic.departure_ratio()),
                    tooltip: tooltip(traffic),
                },
            );
        }

        debug!(markers = binder.markers.len(), "Initial marker render");
        binder
    }

    /// Applies a fresh aggregation pass to the existing markers, updating
    /// radius, ratio, flow class, and tooltip in place. Positions are left
    /// untouched; only camera events move markers.
    pub fn refresh(&mut self, traffic: &[StationTraffic]) {
        for t in traffic {
            if let Some(marker) = self.markers.get_mut(&t.short_name) {
                marker.radius = self.scale.radius(t.total_traffic);
                marker.departure_ratio = t.departure_ratio();
                marker.flow_class = scale::flow_class(marker.departure_ratio);
                marker.tooltip = tooltip(t);
            }
        }
    }

    /// Re-projects every station through the current camera. Runs on every
    /// pan/zoom/resize event and never touches traffic-derived attributes.
    pub fn reposition(&mut self, projection: &impl Projection) {
        for site in &self.sites {
            if let Some(marker) = self.markers.get_mut(&site.short_name) {
                let p = projection.project(site.lon, site.lat);
                marker.x = p.x;
                marker.y = p.y;
            }
        }
    }

    pub fn marker(&self, short_name: &str) -> Option<&Marker> {
        self.markers.get(short_name)
    }

    pub fn markers(&self) -> impl Iterator<Item = (&str, &Marker)> {
        self.markers.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}

fn tooltip(traffic: &StationTraffic) -> String {
    format!(
        "{} trips ({} departures, {} arrivals)",
        traffic.total_traffic, traffic.departures, traffic.arrivals
    )
}
