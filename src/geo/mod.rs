// src/geo/mod.rs
//! Geographic regions and their mapping onto the cell grid

pub mod region;
pub mod transform;

pub use region::{Coordinate, Region, METERS_PER_DEGREE};
pub use transform::CoordinateTransform;
