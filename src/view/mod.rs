//! Marker rendering state: the radius scale, the projection seam to the
//! map engine, and the binder that keeps one marker per station in sync
//! with both the current filter and the camera.

pub mod binder;
pub mod map;
pub mod scale;
