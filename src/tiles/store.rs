// src/tiles/store.rs
//! Tile store that keeps exactly the visible cells resident
//!
//! Every mutating operation runs in two phases. First it works out which
//! tiles to evict and builds every new tile, handing the factory a view of
//! the untouched store. Only when all content exists is the store changed.
//! A factory error therefore leaves the store exactly as it was.

use crate::{
    config::GridConfig,
    error::{GridError, Result},
    geo::{Coordinate, CoordinateTransform, Region},
    grid::{GridIndex, IndexRange, SparseGrid},
    tiles::{FnFactory, StoreView, Tile, TileDelta, TileFactory},
};
use log::{debug, trace, warn};
use std::collections::HashSet;

pub struct TileStore<T, F> {
    transform: CoordinateTransform,
    tiles: SparseGrid<Tile<T>>,
    factory: F,
    max_cells: u64,
}

impl<T, F> TileStore<T, FnFactory<F>>
where
    F: Fn(GridIndex, &StoreView<'_, T>) -> anyhow::Result<T>,
{
    /// Store whose tiles are built by a closure.
    pub fn with_fn(config: &GridConfig, create: F) -> Result<Self> {
        Self::new(config, FnFactory(create))
    }
}

impl<T, F> TileStore<T, F>
where
    F: TileFactory<T>,
{
    /// Fails on a non-positive tile size or an invalid configuration.
    pub fn new(config: &GridConfig, factory: F) -> Result<Self> {
        config.validate()?;
        let transform = CoordinateTransform::new(config.origin())?;
        Ok(Self {
            transform,
            tiles: SparseGrid::new(),
            factory,
            max_cells: config.max_cells,
        })
    }

    /// Make the resident set match `region` exactly.
    pub fn update(&mut self, region: &Region) -> Result<TileDelta<T>> {
        let range = self.checked_range(region)?;
        let delta = self.update_indices(range.indices())?;
        debug!(
            "update {}: +{} -{} ({} resident)",
            range,
            delta.added.len(),
            delta.removed.len(),
            self.tiles.len()
        );
        Ok(delta)
    }

    /// Make the resident set match `targets` exactly. Tiles that stay
    /// resident are not reported and keep their content.
    pub fn update_indices<I>(&mut self, targets: I) -> Result<TileDelta<T>>
    where
        I: IntoIterator<Item = GridIndex>,
    {
        let mut remaining: HashSet<GridIndex> = targets.into_iter().collect();

        let mut evicted = Vec::new();
        for index in self.tiles.indices() {
            if !remaining.remove(&index) {
                evicted.push(index);
            }
        }

        let added = self.create_tiles(remaining)?;
        let removed = evicted
            .into_iter()
            .filter_map(|index| self.tiles.remove(index))
            .collect();
        self.insert_tiles(&added);

        Ok(TileDelta::new(added, removed))
    }

    /// Create the missing tiles of `region` without evicting anything.
    pub fn fill(&mut self, region: &Region) -> Result<TileDelta<T>> {
        let range = self.checked_range(region)?;
        let missing: Vec<GridIndex> = range.indices().filter(|&index| !self.tiles.contains(index)).collect();

        let added = self.create_tiles(missing)?;
        self.insert_tiles(&added);

        debug!("fill {}: +{} ({} resident)", range, added.len(), self.tiles.len());
        Ok(TileDelta::new(added, Vec::new()))
    }

    /// Evict every tile whose cell shares no area with `region`.
    ///
    /// Cells that only partly overlap the region stay resident, as do cells
    /// lying wholly inside it. Nothing is created.
    ///
    /// A cell that only touches the region along an edge is evicted, even
    /// though [`TileStore::update`] covers it when the region's east or north
    /// edge falls exactly on a cell boundary. Crop followed by fill on such a
    /// region rebuilds those boundary cells.
    pub fn crop(&mut self, region: &Region) -> Result<TileDelta<T>> {
        region.validate()?;

        let outside: Vec<GridIndex> = self
            .tiles
            .indices()
            .filter(|&index| !self.transform.index_to_region(index).intersects(region))
            .collect();

        let removed: Vec<Tile<T>> = outside
            .into_iter()
            .filter_map(|index| self.tiles.remove(index))
            .collect();

        debug!("crop {}: -{} ({} resident)", region, removed.len(), self.tiles.len());
        Ok(TileDelta::new(Vec::new(), removed))
    }

    fn create_tiles<I>(&self, indices: I) -> Result<Vec<Tile<T>>>
    where
        I: IntoIterator<Item = GridIndex>,
    {
        let view = self.view();
        indices
            .into_iter()
            .map(|index| {
                trace!("creating tile {}", index);
                self.factory
                    .create(index, &view)
                    .map(|item| Tile::new(index, item))
                    .map_err(|source| {
                        warn!("tile factory failed at {}: {:#}", index, source);
                        GridError::Factory { index, source }
                    })
            })
            .collect()
    }

    fn checked_range(&self, region: &Region) -> Result<IndexRange> {
        let range = self.transform.region_to_index_range(region)?;
        let cells = range.cell_count();
        if cells > u128::from(self.max_cells) {
            warn!("rejecting {}: {} cells exceeds limit of {}", region, cells, self.max_cells);
            return Err(GridError::RegionTooLarge {
                cells,
                max: self.max_cells,
            });
        }
        Ok(range)
    }
}

impl<T, F> TileStore<T, F> {
    fn insert_tiles(&mut self, tiles: &[Tile<T>]) {
        for tile in tiles {
            self.tiles.insert(tile.index(), tile.clone());
        }
    }

    /// Read-only view of the current resident set.
    pub fn view(&self) -> StoreView<'_, T> {
        StoreView::new(&self.tiles, &self.transform)
    }

    pub fn transform(&self) -> &CoordinateTransform {
        &self.transform
    }

    pub fn max_cells(&self) -> u64 {
        self.max_cells
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn contains(&self, index: GridIndex) -> bool {
        self.tiles.contains(index)
    }

    pub fn get(&self, index: GridIndex) -> Option<&Tile<T>> {
        self.tiles.get(index)
    }

    /// All resident tiles, in no particular order.
    pub fn tiles(&self) -> impl Iterator<Item = &Tile<T>> + '_ {
        self.tiles.values()
    }

    /// Resident tiles among the cells covering `region`.
    pub fn tiles_in_region(&self, region: &Region) -> Result<Vec<&Tile<T>>> {
        let range = self.transform.region_to_index_range(region)?;
        if range.cell_count() > self.tiles.len() as u128 {
            // Cheaper to test the resident tiles than to walk the rectangle
            return Ok(self.tiles.values().filter(|tile| range.contains(tile.index())).collect());
        }
        Ok(range.indices().filter_map(|index| self.tiles.get(index)).collect())
    }

    /// Resident tile whose cell contains `coordinate`.
    pub fn tile_at(&self, coordinate: Coordinate) -> Result<Option<&Tile<T>>> {
        let index = self.transform.index_for_coordinate(coordinate)?;
        Ok(self.tiles.get(index))
    }

    /// Region covered by the cell at `index`.
    pub fn region_of(&self, index: GridIndex) -> Region {
        self.transform.index_to_region(index)
    }
}
