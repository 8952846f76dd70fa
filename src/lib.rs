// src/lib.rs
//! Map Grid Library
//!
//! Keeps a sparse set of map tiles resident for a visible region that moves
//! around. The plane is cut into fixed-size cells; whenever the region
//! changes the store reports exactly which tiles were created and which
//! were evicted, and leaves every other tile alone.

pub mod config;
pub mod display;
pub mod error;
pub mod geo;
pub mod grid;
pub mod tiles;

// Re-export main types for convenience
pub use config::GridConfig;
pub use error::{GridError, Result};
pub use geo::{Coordinate, CoordinateTransform, Region};
pub use grid::{GridIndex, IndexRange, SparseGrid};
pub use tiles::{FnFactory, StoreView, Tile, TileDelta, TileFactory, TileStore};
