// src/main.rs
//! Map Grid demo - pans a viewport across generated places and reports
//! which tiles each move creates and evicts

use anyhow::Context;
use clap::{Parser, ValueEnum};
use log::{debug, info};
use map_grid::{
    display::TerminalDisplay, Coordinate, CoordinateTransform, GridConfig, IndexRange, Region, SparseGrid,
    TileDelta, TileStore,
};
use std::{path::PathBuf, thread, time::Duration};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Replace the resident set on every move
    Update,
    /// Crop to the view, then fill it
    CropFill,
}

#[derive(Debug, Parser)]
#[command(name = "map-grid", about = "Keep map tiles resident for a moving viewport")]
struct Args {
    /// Grid configuration file (defaults to ~/.config/map-grid/config.json)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Tile size in degrees, overrides the configuration
    #[arg(long)]
    tile_size: Option<f64>,

    /// Tile size in metres, overrides the configuration
    #[arg(long, conflicts_with = "tile_size")]
    tile_meters: Option<f64>,

    /// Number of viewport moves
    #[arg(long, default_value_t = 12)]
    steps: usize,

    #[arg(long, default_value_t = 60.17)]
    start_lat: f64,

    #[arg(long, default_value_t = 24.94)]
    start_lon: f64,

    /// Viewport height in degrees
    #[arg(long, default_value_t = 0.6)]
    view_height: f64,

    /// Viewport width in degrees
    #[arg(long, default_value_t = 1.2)]
    view_width: f64,

    /// Viewport movement per step, degrees of latitude
    #[arg(long, default_value_t = 0.05)]
    step_lat: f64,

    /// Viewport movement per step, degrees of longitude
    #[arg(long, default_value_t = 0.15)]
    step_lon: f64,

    #[arg(long, value_enum, default_value_t = Mode::Update)]
    mode: Mode,

    /// Number of generated places scattered around the start position
    #[arg(long, default_value_t = 5000)]
    points: usize,

    /// Draw the grid after every step
    #[arg(long)]
    render: bool,

    /// Pause between rendered steps, milliseconds
    #[arg(long, default_value_t = 400)]
    interval_ms: u64,

    /// Write the effective configuration back to the config file
    #[arg(long)]
    save_config: bool,
}

#[derive(Debug, Clone)]
struct Place {
    name: String,
    coordinate: Coordinate,
    population: u32,
}

/// Places spread evenly over a square of `extent` degrees around `center`,
/// using the golden-ratio sequence so every run sees the same map.
fn generate_places(center: Coordinate, extent: f64, count: usize) -> Vec<Place> {
    const PHI: f64 = 0.618_033_988_749_895;
    const PSI: f64 = 0.754_877_666_246_693;

    (0..count)
        .map(|i| {
            let u = (0.5 + PHI * i as f64).fract();
            let v = (0.5 + PSI * i as f64).fract();
            Place {
                name: format!("place-{}", i),
                coordinate: Coordinate::new(
                    center.latitude + (v - 0.5) * extent,
                    center.longitude + (u - 0.5) * extent * 2.0,
                ),
                population: 500 + ((i * 7919) % 100_000) as u32,
            }
        })
        .collect()
}

/// Bucket places by the cell that contains them.
fn index_places(places: Vec<Place>, transform: &CoordinateTransform) -> anyhow::Result<SparseGrid<Vec<Place>>> {
    let mut grid: SparseGrid<Vec<Place>> = SparseGrid::new();
    for place in places {
        let index = transform.index_for_coordinate(place.coordinate)?;
        match grid.get_mut(index) {
            Some(bucket) => bucket.push(place),
            None => {
                grid.insert(index, vec![place]);
            }
        }
    }
    Ok(grid)
}

/// `range` grown by one cell on every side, clamped to the index bounds.
fn with_margin(range: &IndexRange) -> IndexRange {
    IndexRange {
        x1: range.x1.saturating_sub(1),
        x2: range.x2.saturating_add(1),
        y1: range.y1.saturating_sub(1),
        y2: range.y2.saturating_add(1),
    }
}

fn load_config(args: &Args) -> anyhow::Result<GridConfig> {
    let mut config = match &args.config {
        Some(path) => GridConfig::load_from(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => GridConfig::load().unwrap_or_default(),
    };

    if let Some(span) = args.tile_size {
        config.tile_lat_span = span;
        config.tile_lon_span = span;
        config.tile_size_meters = None;
    }
    if let Some(meters) = args.tile_meters {
        config.tile_size_meters = Some(meters);
    }
    config.validate()?;
    Ok(config)
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();
    let config = load_config(&args)?;

    if args.save_config {
        match &args.config {
            Some(path) => config.save_to(path)?,
            None => config.save()?,
        }
        info!("Configuration saved");
    }

    let transform = CoordinateTransform::new(config.origin()).context("Invalid tile size")?;
    let start = Coordinate::new(args.start_lat, args.start_lon);
    let places = generate_places(start, 4.0, args.points);
    let place_grid = index_places(places, &transform)?;
    debug!("Indexed {} places into {} cells", args.points, place_grid.len());

    let mut store = TileStore::with_fn(&config, |index, _view| {
        Ok(place_grid.get(index).cloned().unwrap_or_default())
    })?;

    println!("Starting Map Grid demo...");
    println!("Tile origin {}, mode {:?}", config.origin(), args.mode);

    let display = TerminalDisplay::new();
    let mut stdout = std::io::stdout();
    let mut viewport = Region::new(args.start_lat, args.start_lon, args.view_height, args.view_width);

    for step in 0..args.steps {
        let delta = match args.mode {
            Mode::Update => store.update(&viewport)?,
            Mode::CropFill => {
                let cropped = store.crop(&viewport)?;
                let filled = store.fill(&viewport)?;
                TileDelta::new(filled.added, cropped.removed)
            }
        };

        let places_added: usize = delta.added.iter().map(|tile| tile.item().len()).sum();
        let places_removed: usize = delta.removed.iter().map(|tile| tile.item().len()).sum();
        let population: u64 = store
            .tiles()
            .flat_map(|tile| tile.item().iter())
            .map(|place| u64::from(place.population))
            .sum();

        if args.render {
            let range = store.transform().region_to_index_range(&viewport)?;
            let window = with_margin(&range);
            display.render(&mut stdout, step, &store, &delta, &window)?;
            thread::sleep(Duration::from_millis(args.interval_ms));
        }

        println!(
            "step {:>3} {}: +{} tiles ({} places) -{} tiles ({} places), {} resident, population {}",
            step,
            viewport,
            delta.added.len(),
            places_added,
            delta.removed.len(),
            places_removed,
            store.len(),
            population
        );
        if let Some(tile) = delta.added.iter().find(|tile| !tile.item().is_empty()) {
            debug!("first new tile {} holds {}", tile.index(), tile.item()[0].name);
        }

        viewport = viewport.translated(args.step_lat, args.step_lon);
    }

    Ok(())
}
