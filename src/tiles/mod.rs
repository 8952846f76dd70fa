// src/tiles/mod.rs
//! Resident tiles, their construction and the store that diffs them

pub mod factory;
pub mod store;
pub mod tile;

pub use factory::{FnFactory, StoreView, TileFactory};
pub use store::TileStore;
pub use tile::{Tile, TileDelta};
