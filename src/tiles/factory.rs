// src/tiles/factory.rs
//! Pluggable construction of tile content

use crate::{
    geo::{CoordinateTransform, Region},
    grid::{GridIndex, SparseGrid},
    tiles::Tile,
};

/// Produces the content of a tile that has just become visible.
///
/// Implementations get a read-only view of the store as it was before the
/// running operation started. Returning an error aborts the whole operation
/// and leaves the store untouched.
pub trait TileFactory<T> {
    fn create(&self, index: GridIndex, store: &StoreView<'_, T>) -> anyhow::Result<T>;
}

/// Adapter turning a closure into a [`TileFactory`].
#[derive(Debug, Clone, Copy)]
pub struct FnFactory<F>(pub F);

impl<F> FnFactory<F> {
    pub fn new<T>(create: F) -> Self
    where
        F: Fn(GridIndex, &StoreView<'_, T>) -> anyhow::Result<T>,
    {
        Self(create)
    }
}

impl<T, F> TileFactory<T> for FnFactory<F>
where
    F: Fn(GridIndex, &StoreView<'_, T>) -> anyhow::Result<T>,
{
    fn create(&self, index: GridIndex, store: &StoreView<'_, T>) -> anyhow::Result<T> {
        (self.0)(index, store)
    }
}

/// Read-only snapshot of a tile store handed to factories.
pub struct StoreView<'a, T> {
    tiles: &'a SparseGrid<Tile<T>>,
    transform: &'a CoordinateTransform,
}

impl<'a, T> StoreView<'a, T> {
    pub(crate) fn new(tiles: &'a SparseGrid<Tile<T>>, transform: &'a CoordinateTransform) -> Self {
        Self { tiles, transform }
    }

    pub fn get(&self, index: GridIndex) -> Option<&'a T> {
        self.tiles.get(index).map(Tile::item)
    }

    pub fn tile(&self, index: GridIndex) -> Option<&'a Tile<T>> {
        self.tiles.get(index)
    }

    pub fn contains(&self, index: GridIndex) -> bool {
        self.tiles.contains(index)
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn tiles(&self) -> impl Iterator<Item = &'a Tile<T>> + 'a {
        self.tiles.values()
    }

    /// Region covered by the cell at `index`.
    pub fn region_of(&self, index: GridIndex) -> Region {
        self.transform.index_to_region(index)
    }

    /// Resident tiles in the eight cells around `index`.
    pub fn neighbors(&self, index: GridIndex) -> impl Iterator<Item = &'a Tile<T>> + 'a {
        let tiles = self.tiles;
        (-1..=1)
            .flat_map(move |dy| (-1..=1).map(move |dx| (dx, dy)))
            .filter(|&(dx, dy)| dx != 0 || dy != 0)
            .filter_map(move |(dx, dy)| {
                let x = index.x.checked_add(dx)?;
                let y = index.y.checked_add(dy)?;
                tiles.get(GridIndex::new(x, y))
            })
    }
}

impl<T> Clone for StoreView<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for StoreView<'_, T> {}
