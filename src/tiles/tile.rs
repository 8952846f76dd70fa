// src/tiles/tile.rs
//! Tiles and the deltas produced when the resident set changes

use crate::grid::GridIndex;
use std::sync::Arc;

/// Content bound to one grid cell. The content is shared, never rebuilt:
/// the tile handed out in a delta and the one kept in the store point at the
/// same allocation.
#[derive(Debug)]
pub struct Tile<T> {
    index: GridIndex,
    item: Arc<T>,
}

impl<T> Tile<T> {
    pub fn new(index: GridIndex, item: T) -> Self {
        Self {
            index,
            item: Arc::new(item),
        }
    }

    pub fn index(&self) -> GridIndex {
        self.index
    }

    pub fn item(&self) -> &T {
        &self.item
    }

    /// Shared handle to the content, for callers that outlive the store.
    pub fn shared_item(&self) -> Arc<T> {
        Arc::clone(&self.item)
    }

    /// True when both tiles hold the very same content allocation.
    pub fn same_content(&self, other: &Tile<T>) -> bool {
        Arc::ptr_eq(&self.item, &other.item)
    }
}

impl<T> Clone for Tile<T> {
    fn clone(&self) -> Self {
        Self {
            index: self.index,
            item: Arc::clone(&self.item),
        }
    }
}

/// Tiles created and evicted by one store operation. Order carries no
/// meaning.
#[derive(Debug)]
pub struct TileDelta<T> {
    pub added: Vec<Tile<T>>,
    pub removed: Vec<Tile<T>>,
}

impl<T> TileDelta<T> {
    pub fn new(added: Vec<Tile<T>>, removed: Vec<Tile<T>>) -> Self {
        Self { added, removed }
    }

    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }

    pub fn added_indices(&self) -> impl Iterator<Item = GridIndex> + '_ {
        self.added.iter().map(Tile::index)
    }

    pub fn removed_indices(&self) -> impl Iterator<Item = GridIndex> + '_ {
        self.removed.iter().map(Tile::index)
    }
}

impl<T> Default for TileDelta<T> {
    fn default() -> Self {
        Self {
            added: Vec::new(),
            removed: Vec::new(),
        }
    }
}

impl<T> Clone for TileDelta<T> {
    fn clone(&self) -> Self {
        Self {
            added: self.added.clone(),
            removed: self.removed.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clone_shares_content() {
        let tile = Tile::new(GridIndex::new(1, 2), vec![1, 2, 3]);
        let copy = tile.clone();
        assert!(tile.same_content(&copy));
        assert_eq!(copy.index(), GridIndex::new(1, 2));
        assert_eq!(copy.item(), &vec![1, 2, 3]);

        let rebuilt = Tile::new(GridIndex::new(1, 2), vec![1, 2, 3]);
        assert!(!tile.same_content(&rebuilt));
    }

    #[test]
    fn test_delta_indices() {
        let delta = TileDelta::new(
            vec![Tile::new(GridIndex::new(3, 0), ())],
            vec![Tile::new(GridIndex::new(0, 0), ()), Tile::new(GridIndex::new(0, 1), ())],
        );
        assert!(!delta.is_empty());
        assert_eq!(delta.added_indices().collect::<Vec<_>>(), vec![GridIndex::new(3, 0)]);
        assert_eq!(delta.removed_indices().count(), 2);
        assert!(TileDelta::<()>::default().is_empty());
    }
}
