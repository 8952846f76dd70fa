// src/grid/mod.rs
//! Cell indices and sparse grid storage

pub mod index;
pub mod sparse;

pub use index::{GridIndex, IndexRange};
pub use sparse::SparseGrid;
