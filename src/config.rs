// src/config.rs
//! Grid configuration with JSON file storage

use crate::{
    error::{GridError, Result},
    geo::{Coordinate, Region},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Upper bound on the cells one region may expand to.
pub const DEFAULT_MAX_CELLS: u64 = 65_536;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Centre of the cell with index (0, 0)
    pub origin_lat: f64,
    pub origin_lon: f64,
    /// Cell size in degrees, used unless `tile_size_meters` is set
    pub tile_lat_span: f64,
    pub tile_lon_span: f64,
    /// Square cell size in metres, measured at the origin
    pub tile_size_meters: Option<f64>,
    pub max_cells: u64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            origin_lat: 0.0,
            origin_lon: 0.0,
            tile_lat_span: 0.1,
            tile_lon_span: 0.1,
            tile_size_meters: None,
            max_cells: DEFAULT_MAX_CELLS,
        }
    }
}

impl GridConfig {
    /// Square cells of `span` degrees centred on the origin.
    pub fn with_tile_span(span: f64) -> Self {
        Self {
            tile_lat_span: span,
            tile_lon_span: span,
            ..Self::default()
        }
    }

    /// Square cells of `meters` metres centred on the origin.
    pub fn with_tile_size_meters(meters: f64) -> Self {
        Self {
            tile_size_meters: Some(meters),
            ..Self::default()
        }
    }

    /// The region of cell (0, 0), which fixes size and alignment of every
    /// other cell.
    pub fn origin(&self) -> Region {
        let center = Coordinate::new(self.origin_lat, self.origin_lon);
        match self.tile_size_meters {
            Some(meters) => Region::from_distance(center, meters, meters),
            None => Region::new(center.latitude, center.longitude, self.tile_lat_span, self.tile_lon_span),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_cells == 0 {
            return Err(GridError::Config("max_cells must be at least 1".to_string()));
        }
        if let Some(meters) = self.tile_size_meters {
            if !(meters.is_finite() && meters > 0.0) {
                return Err(GridError::Config(format!("tile_size_meters must be positive, got {}", meters)));
            }
        }
        Ok(())
    }

    /// Load configuration from the default location, falling back to
    /// defaults when no file exists yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::get_config_path()?)
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::get_config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&contents)?;
        config.validate()?;

        log::debug!("Loaded grid config from {}", path.display());
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Create config directory if it doesn't exist
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Config file path, `$HOME/.config/map-grid/config.json`
    pub fn get_config_path() -> Result<PathBuf> {
        let home = std::env::var("HOME")
            .map_err(|_| GridError::Config("HOME environment variable not set".to_string()))?;

        Ok(PathBuf::from(home).join(".config").join("map-grid").join("config.json"))
    }
}
