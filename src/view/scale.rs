//! Visual scales for the station markers.

use crate::model::StationTraffic;

pub const MIN_RADIUS: f64 = 5.0;
pub const MAX_RADIUS: f64 = 25.0;

/// Square-root scale from total traffic to marker radius in `[5, 25]`.
///
/// The domain maximum is fixed when the scale is fitted to the initial
/// unfiltered traffic and is not recomputed per filter, so marker sizes stay
/// comparable across time windows.
#[derive(Debug, Clone, Copy)]
pub struct RadiusScale {
    domain_max: f64,
}

impl RadiusScale {
    /// Fits the scale to the traffic at initial load.
    pub fn fit(traffic: &[StationTraffic]) -> Self {
        let domain_max = traffic
            .iter()
            .map(|s| s.total_traffic)
            .max()
            .unwrap_or(0)
            .into();
        Self { domain_max }
    }

    pub fn radius(&self, total_traffic: u32) -> f64 {
        if self.domain_max <= 0.0 {
            return MIN_RADIUS;
        }
        let t = f64::from(total_traffic).sqrt() / self.domain_max.sqrt();
        (MIN_RADIUS + t * (MAX_RADIUS - MIN_RADIUS)).min(MAX_RADIUS)
    }
}

/// Quantizes a departure ratio in `[0, 1]` into three flow classes:
/// 0.0 (arrival-heavy), 0.5 (balanced), 1.0 (departure-heavy). Drives the
/// marker color encoding.
pub fn flow_class(ratio: f64) -> f64 {
    match ratio {
        r if r < 1.0 / 3.0 => 0.0,
        r if r < 2.0 / 3.0 => 0.5,
        _ => 1.0,
    }
}
