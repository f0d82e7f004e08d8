//! Projection seam to the map engine.
//!
//! The binder only ever sees [`Projection`]; [`MercatorCamera`] is the
//! concrete Web Mercator camera used by the CLI drivers and tests. Its
//! `pan_to`/`zoom_to`/`resize` mutators correspond to the engine's
//! move/zoom/resize events.

use std::f64::consts::PI;

/// Pixel size of one world tile at zoom 0.
const TILE_SIZE: f64 = 512.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

/// Maps a geographic coordinate to current screen coordinates.
pub trait Projection {
    fn project(&self, lon: f64, lat: f64) -> ScreenPoint;
}

/// A Web Mercator camera over a pixel viewport.
#[derive(Debug, Clone, Copy)]
pub struct MercatorCamera {
    center_lon: f64,
    center_lat: f64,
    zoom: f64,
    width: f64,
    height: f64,
}

impl MercatorCamera {
    pub fn new(center_lon: f64, center_lat: f64, zoom: f64, width: f64, height: f64) -> Self {
        Self {
            center_lon,
            center_lat,
            zoom,
            width,
            height,
        }
    }

    pub fn pan_to(&mut self, center_lon: f64, center_lat: f64) {
        self.center_lon = center_lon;
        self.center_lat = center_lat;
    }

    pub fn zoom_to(&mut self, zoom: f64) {
        self.zoom = zoom;
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    /// Normalized world coordinates in `[0, 1)`: x linear in longitude,
    /// y the forward Mercator of latitude (y = 0 is north).
    fn world(lon: f64, lat: f64) -> (f64, f64) {
        let x = (lon + 180.0) / 360.0;
        let lat_rad = lat.to_radians();
        let y = (1.0 - (lat_rad.tan() + 1.0 / lat_rad.cos()).ln() / PI) / 2.0;
        (x, y)
    }
}

impl Projection for MercatorCamera {
    fn project(&self, lon: f64, lat: f64) -> ScreenPoint {
        let scale = TILE_SIZE * self.zoom.exp2();
        let (wx, wy) = Self::world(lon, lat);
        let (cx, cy) = Self::world(self.center_lon, self.center_lat);

        ScreenPoint {
            x: (wx - cx) * scale + self.width / 2.0,
            y: (wy - cy) * scale + self.height / 2.0,
        }
    }
}
