// src/geo/transform.rs
//! Conversion between degree regions and integer cell indices
//!
//! Cells are aligned to the south-west corner of the origin region and are
//! exactly one origin span wide and tall. Cell `(x, y)` covers the half-open
//! box `[west0 + x*w, west0 + (x+1)*w) x [south0 + y*h, south0 + (y+1)*h)`,
//! so every point belongs to exactly one cell.
//!
//! Longitude wraparound at the antimeridian and polar clipping are not
//! handled: a region crossing ±180° produces indices on both sides of the
//! origin rather than wrapping.

use crate::{
    error::{GridError, Result},
    geo::{Coordinate, Region},
    grid::{GridIndex, IndexRange},
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateTransform {
    origin: Region,
}

impl CoordinateTransform {
    /// Fails when either origin span is not a positive finite number.
    pub fn new(origin: Region) -> Result<Self> {
        let valid_span = |span: f64| span.is_finite() && span > 0.0;
        if !valid_span(origin.lat_span) || !valid_span(origin.lon_span) {
            return Err(GridError::InvalidTileSize {
                lat_span: origin.lat_span,
                lon_span: origin.lon_span,
            });
        }
        if !origin.center_lat.is_finite() || !origin.center_lon.is_finite() {
            return Err(GridError::InvalidRegion(format!("origin centre is not finite: {}", origin)));
        }
        Ok(Self { origin })
    }

    pub fn origin(&self) -> Region {
        self.origin
    }

    /// Smallest index rectangle covering `region`.
    ///
    /// Every edge is floored, the high edges included, so each edge lands in
    /// the cell that contains it and regions sharing an edge leave no gap.
    pub fn region_to_index_range(&self, region: &Region) -> Result<IndexRange> {
        region.validate()?;

        Ok(IndexRange {
            x1: self.column(region.west())?,
            x2: self.column(region.east())?,
            y1: self.row(region.south())?,
            y2: self.row(region.north())?,
        })
    }

    /// Region covered by the cell at `index`.
    pub fn index_to_region(&self, index: GridIndex) -> Region {
        Region::new(
            self.origin.center_lat + self.origin.lat_span * index.y as f64,
            self.origin.center_lon + self.origin.lon_span * index.x as f64,
            self.origin.lat_span,
            self.origin.lon_span,
        )
    }

    /// Cell containing `coordinate`.
    pub fn index_for_coordinate(&self, coordinate: Coordinate) -> Result<GridIndex> {
        Ok(GridIndex::new(
            self.column(coordinate.longitude)?,
            self.row(coordinate.latitude)?,
        ))
    }

    fn column(&self, longitude: f64) -> Result<i64> {
        to_cell((longitude - self.origin.west()) / self.origin.lon_span)
    }

    fn row(&self, latitude: f64) -> Result<i64> {
        to_cell((latitude - self.origin.south()) / self.origin.lat_span)
    }
}

fn to_cell(offset: f64) -> Result<i64> {
    let cell = offset.floor();
    // i64::MAX as f64 rounds up to 2^63, which is already out of range
    if !cell.is_finite() || cell < i64::MIN as f64 || cell >= i64::MAX as f64 {
        return Err(GridError::InvalidRegion(format!("cell offset {} is out of range", offset)));
    }
    Ok(cell as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_transform() -> CoordinateTransform {
        // Cells one degree square with edges on whole degrees
        CoordinateTransform::new(Region::new(0.5, 0.5, 1.0, 1.0)).unwrap()
    }

    #[test]
    fn test_rejects_non_positive_tile_size() {
        assert!(matches!(
            CoordinateTransform::new(Region::new(0.0, 0.0, 0.0, 1.0)),
            Err(GridError::InvalidTileSize { .. })
        ));
        assert!(matches!(
            CoordinateTransform::new(Region::new(0.0, 0.0, 1.0, -1.0)),
            Err(GridError::InvalidTileSize { .. })
        ));
        assert!(matches!(
            CoordinateTransform::new(Region::new(0.0, 0.0, f64::NAN, 1.0)),
            Err(GridError::InvalidTileSize { .. })
        ));
    }

    #[test]
    fn test_region_to_index_range() {
        let transform = unit_transform();
        // lat 0.2..1.8, lon 0.1..2.9
        let region = Region::new(1.0, 1.5, 1.6, 2.8);
        let range = transform.region_to_index_range(&region).unwrap();
        assert_eq!(range, IndexRange { x1: 0, x2: 2, y1: 0, y2: 1 });
        assert_eq!(range.cell_count(), 6);
    }

    #[test]
    fn test_negative_side_of_origin() {
        let transform = unit_transform();
        let region = Region::new(-1.5, -0.5, 0.5, 0.5);
        let range = transform.region_to_index_range(&region).unwrap();
        assert_eq!(range, IndexRange { x1: -1, x2: -1, y1: -2, y2: -2 });
    }

    #[test]
    fn test_adjacent_regions_leave_no_gap() {
        let transform = unit_transform();
        let left = Region::from_bounds(Coordinate::new(0.1, 0.1), Coordinate::new(0.9, 2.5));
        let right = Region::from_bounds(Coordinate::new(0.1, 2.5), Coordinate::new(0.9, 4.9));

        let left = transform.region_to_index_range(&left).unwrap();
        let right = transform.region_to_index_range(&right).unwrap();
        // Both claim the column holding the shared edge; nothing in between is skipped
        assert_eq!(left.x2, 2);
        assert_eq!(right.x1, 2);
    }

    #[test]
    fn test_index_to_region_is_inverse() {
        let transform = CoordinateTransform::new(Region::new(0.0, 0.0, 0.25, 0.5)).unwrap();
        for index in [GridIndex::new(0, 0), GridIndex::new(-3, 7), GridIndex::new(12, -40)] {
            let cell = transform.index_to_region(index);
            assert_eq!(transform.index_for_coordinate(cell.center()).unwrap(), index);
            assert_eq!(
                transform.region_to_index_range(&Region::new(cell.center_lat, cell.center_lon, 0.0, 0.0)).unwrap(),
                IndexRange::new(index, index)
            );
        }
    }

    #[test]
    fn test_index_to_region_matches_origin_grid() {
        let transform = CoordinateTransform::new(Region::new(0.0, 0.0, 2.0, 3.0)).unwrap();
        let cell = transform.index_to_region(GridIndex::new(2, -1));
        assert_eq!(cell, Region::new(-2.0, 6.0, 2.0, 3.0));
    }

    #[test]
    fn test_cell_edges_are_half_open() {
        let transform = unit_transform();
        assert_eq!(
            transform.index_for_coordinate(Coordinate::new(1.0, 1.0)).unwrap(),
            GridIndex::new(1, 1)
        );
        assert_eq!(
            transform.index_for_coordinate(Coordinate::new(0.999, -0.001)).unwrap(),
            GridIndex::new(-1, 0)
        );
    }

    #[test]
    fn test_rejects_bad_regions() {
        let transform = unit_transform();
        assert!(matches!(
            transform.region_to_index_range(&Region::new(0.0, 0.0, -1.0, 1.0)),
            Err(GridError::InvalidRegion(_))
        ));
        assert!(matches!(
            transform.region_to_index_range(&Region::new(f64::INFINITY, 0.0, 1.0, 1.0)),
            Err(GridError::InvalidRegion(_))
        ));
        assert!(matches!(
            transform.region_to_index_range(&Region::new(0.0, 1e300, 1.0, 1.0)),
            Err(GridError::InvalidRegion(_))
        ));
    }
}
