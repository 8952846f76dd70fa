// tests/tile_store.rs
//! End-to-end behaviour of the tile store through the public API

use map_grid::{Coordinate, GridConfig, GridError, GridIndex, Region, StoreView, Tile, TileFactory, TileStore};
use std::collections::HashSet;

fn unit_config() -> GridConfig {
    let mut config = GridConfig::with_tile_span(1.0);
    config.origin_lat = 0.5;
    config.origin_lon = 0.5;
    config
}

fn resident<T, F>(store: &TileStore<T, F>) -> HashSet<GridIndex> {
    store.tiles().map(Tile::index).collect()
}

/// Labels each tile with its index and the resident count at creation.
struct LabelFactory;

impl TileFactory<String> for LabelFactory {
    fn create(&self, index: GridIndex, store: &StoreView<'_, String>) -> anyhow::Result<String> {
        Ok(format!("{} after {}", index, store.len()))
    }
}

#[test]
fn panning_conserves_tiles() {
    let mut store = TileStore::with_fn(&unit_config(), |index, _| Ok(index)).unwrap();
    let mut view = Region::new(1.0, 1.5, 1.6, 2.8);

    let mut previous = resident(&store);
    for _ in 0..20 {
        let delta = store.update(&view).unwrap();
        let added: HashSet<GridIndex> = delta.added_indices().collect();
        let removed: HashSet<GridIndex> = delta.removed_indices().collect();

        // previous + added - removed == current, with no index in both
        assert!(added.is_disjoint(&removed));
        let mut expected: HashSet<GridIndex> = previous.difference(&removed).copied().collect();
        expected.extend(added.iter().copied());
        assert_eq!(resident(&store), expected);

        for tile in store.tiles() {
            assert_eq!(*tile.item(), tile.index());
        }

        previous = resident(&store);
        view = view.translated(0.35, 0.6);
    }
}

#[test]
fn custom_factory_sees_earlier_tiles() {
    let mut store: TileStore<String, _> = TileStore::new(&unit_config(), LabelFactory).unwrap();

    store.update(&Region::new(0.5, 0.5, 0.5, 0.5)).unwrap();
    store.update(&Region::new(0.5, 1.0, 0.5, 1.5)).unwrap();

    let tile = store.get(GridIndex::new(1, 0)).unwrap();
    assert_eq!(tile.item().as_str(), "(1, 0) after 1");
    assert_eq!(store.len(), 2);
}

#[test]
fn crop_never_evicts_a_covered_cell() {
    let mut store = TileStore::with_fn(&unit_config(), |_, _| Ok(())).unwrap();
    store.update(&Region::new(0.0, 0.0, 8.0, 8.0)).unwrap();

    let view = Region::new(-0.7, 1.3, 2.1, 1.5);
    store.crop(&view).unwrap();

    let covering: HashSet<GridIndex> = store
        .transform()
        .region_to_index_range(&view)
        .unwrap()
        .indices()
        .collect();
    assert!(covering.is_subset(&resident(&store)));
    for index in resident(&store) {
        assert!(store.region_of(index).intersects(&view));
    }
}

#[test]
fn invalid_regions_are_rejected() {
    let mut store = TileStore::with_fn(&unit_config(), |_, _| Ok(())).unwrap();

    let err = store.update(&Region::new(0.0, 0.0, -1.0, 1.0)).unwrap_err();
    assert!(matches!(err, GridError::InvalidRegion(_)));

    let err = store.fill(&Region::new(f64::NAN, 0.0, 1.0, 1.0)).unwrap_err();
    assert!(matches!(err, GridError::InvalidRegion(_)));
    assert!(store.is_empty());
}

#[test]
fn metre_sized_cells_cover_a_city_view() {
    let mut config = GridConfig::with_tile_size_meters(1_000.0);
    config.origin_lat = 60.17;
    config.origin_lon = 24.94;
    let mut store = TileStore::with_fn(&config, |index, view| Ok(view.region_of(index))).unwrap();

    let delta = store
        .update(&Region::from_distance(Coordinate::new(60.17, 24.94), 4_500.0, 4_500.0))
        .unwrap();

    // 4.5 km centred on a 1 km cell spans five cells each way
    assert_eq!(delta.added.len(), 25);
    for tile in &delta.added {
        assert_eq!(*tile.item(), store.region_of(tile.index()));
    }
}
