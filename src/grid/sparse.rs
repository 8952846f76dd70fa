// src/grid/sparse.rs
//! Sparse two-level storage keyed by signed cell index

use super::GridIndex;
use std::collections::HashMap;

/// Optional value per signed 2D index, with no bounds and no density
/// assumption.
///
/// Rows are keyed by `y`, columns inside a row by `x`. A row that loses its
/// last entry is dropped.
#[derive(Debug, Clone)]
pub struct SparseGrid<T> {
    rows: HashMap<i64, HashMap<i64, T>>,
    len: usize,
}

impl<T> SparseGrid<T> {
    pub fn new() -> Self {
        Self {
            rows: HashMap::new(),
            len: 0,
        }
    }

    pub fn get(&self, index: GridIndex) -> Option<&T> {
        self.rows.get(&index.y)?.get(&index.x)
    }

    pub fn get_mut(&mut self, index: GridIndex) -> Option<&mut T> {
        self.rows.get_mut(&index.y)?.get_mut(&index.x)
    }

    /// Store `value` at `index`, or remove the entry when `value` is `None`.
    /// Returns whatever was there before.
    pub fn set(&mut self, index: GridIndex, value: Option<T>) -> Option<T> {
        match value {
            Some(value) => self.insert(index, value),
            None => self.remove(index),
        }
    }

    pub fn insert(&mut self, index: GridIndex, value: T) -> Option<T> {
        let previous = self.rows.entry(index.y).or_default().insert(index.x, value);
        if previous.is_none() {
            self.len += 1;
        }
        previous
    }

    pub fn remove(&mut self, index: GridIndex) -> Option<T> {
        let row = self.rows.get_mut(&index.y)?;
        let removed = row.remove(&index.x)?;
        if row.is_empty() {
            self.rows.remove(&index.y);
        }
        self.len -= 1;
        Some(removed)
    }

    pub fn contains(&self, index: GridIndex) -> bool {
        self.get(index).is_some()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn clear(&mut self) {
        self.rows.clear();
        self.len = 0;
    }

    /// Every stored `(index, value)` pair, in no particular order.
    ///
    /// The iterator borrows the grid, so it always sees one consistent state
    /// and can be requested again for a fresh pass.
    pub fn entries(&self) -> impl Iterator<Item = (GridIndex, &T)> + '_ {
        self.rows.iter().flat_map(|(&y, row)| {
            row.iter().map(move |(&x, value)| (GridIndex::new(x, y), value))
        })
    }

    /// Stored indices only.
    pub fn indices(&self) -> impl Iterator<Item = GridIndex> + '_ {
        self.entries().map(|(index, _)| index)
    }

    pub fn values(&self) -> impl Iterator<Item = &T> + '_ {
        self.rows.values().flat_map(|row| row.values())
    }
}

impl<T> Default for SparseGrid<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<(GridIndex, T)> for SparseGrid<T> {
    fn from_iter<I: IntoIterator<Item = (GridIndex, T)>>(iter: I) -> Self {
        let mut grid = Self::new();
        for (index, value) in iter {
            grid.insert(index, value);
        }
        grid
    }
}
