// src/error.rs
//! Error types for the map grid

use crate::grid::GridIndex;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, GridError>;

#[derive(Debug, Error)]
pub enum GridError {
    #[error("Invalid tile size: latitude span {lat_span}, longitude span {lon_span} (both must be positive)")]
    InvalidTileSize { lat_span: f64, lon_span: f64 },

    #[error("Invalid region: {0}")]
    InvalidRegion(String),

    #[error("Region too large: {cells} cells requested, limit is {max}")]
    RegionTooLarge { cells: u128, max: u64 },

    #[error("Tile factory failed at {index}")]
    Factory {
        index: GridIndex,
        #[source]
        source: anyhow::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}
