// src/geo/region.rs
//! Geographic points and degree-aligned rectangles

use crate::error::{GridError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Metres per degree of latitude (and of longitude on the equator), from
/// the WGS84 equatorial circumference.
pub const METERS_PER_DEGREE: f64 = 40_075_016.686 / 360.0;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

/// Rectangle in degrees, described by its centre and its full spans.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Region {
    pub center_lat: f64,
    pub center_lon: f64,
    pub lat_span: f64,
    pub lon_span: f64,
}

impl Region {
    pub const fn new(center_lat: f64, center_lon: f64, lat_span: f64, lon_span: f64) -> Self {
        Self {
            center_lat,
            center_lon,
            lat_span,
            lon_span,
        }
    }

    /// Region spanning `lat_meters` north-south and `lon_meters` east-west
    /// around `center`.
    ///
    /// Longitude degrees shrink with the cosine of the latitude, so the
    /// longitudinal span grows away from the equator.
    pub fn from_distance(center: Coordinate, lat_meters: f64, lon_meters: f64) -> Self {
        let lat_span = lat_meters / METERS_PER_DEGREE;
        let lon_span = lon_meters / (METERS_PER_DEGREE * center.latitude.to_radians().cos());
        Self::new(center.latitude, center.longitude, lat_span, lon_span)
    }

    /// Region bounded by two corners given in any order.
    pub fn from_bounds(a: Coordinate, b: Coordinate) -> Self {
        let south = a.latitude.min(b.latitude);
        let north = a.latitude.max(b.latitude);
        let west = a.longitude.min(b.longitude);
        let east = a.longitude.max(b.longitude);
        Self::new(
            (south + north) / 2.0,
            (west + east) / 2.0,
            north - south,
            east - west,
        )
    }

    pub fn center(&self) -> Coordinate {
        Coordinate::new(self.center_lat, self.center_lon)
    }

    pub fn south(&self) -> f64 {
        self.center_lat - self.lat_span / 2.0
    }

    pub fn north(&self) -> f64 {
        self.center_lat + self.lat_span / 2.0
    }

    pub fn west(&self) -> f64 {
        self.center_lon - self.lon_span / 2.0
    }

    pub fn east(&self) -> f64 {
        self.center_lon + self.lon_span / 2.0
    }

    pub fn is_finite(&self) -> bool {
        self.center_lat.is_finite()
            && self.center_lon.is_finite()
            && self.lat_span.is_finite()
            && self.lon_span.is_finite()
    }

    /// Rejects regions with non-finite numbers or a negative span.
    pub fn validate(&self) -> Result<()> {
        if !self.is_finite() {
            return Err(GridError::InvalidRegion(format!("non-finite region {:?}", self)));
        }
        if self.lat_span < 0.0 || self.lon_span < 0.0 {
            return Err(GridError::InvalidRegion(format!(
                "negative span ({}, {})",
                self.lat_span, self.lon_span
            )));
        }
        Ok(())
    }

    /// Same region moved by the given number of degrees.
    pub fn translated(&self, d_lat: f64, d_lon: f64) -> Self {
        Self::new(
            self.center_lat + d_lat,
            self.center_lon + d_lon,
            self.lat_span,
            self.lon_span,
        )
    }

    /// Point test, edges inclusive.
    pub fn contains(&self, point: Coordinate) -> bool {
        (self.south()..=self.north()).contains(&point.latitude)
            && (self.west()..=self.east()).contains(&point.longitude)
    }

    /// Area, in square degrees, shared by both regions. Touching edges share
    /// nothing.
    pub fn overlap_area(&self, other: &Region) -> f64 {
        let lat = overlap_length(self.south(), self.north(), other.south(), other.north());
        let lon = overlap_length(self.west(), self.east(), other.west(), other.east());
        lat * lon
    }

    /// True when the regions share a strictly positive area.
    ///
    /// Each axis is tested on its own, so overlaps too small for
    /// [`Region::overlap_area`] to represent still count.
    pub fn intersects(&self, other: &Region) -> bool {
        axes_overlap(
            (self.south(), self.north(), self.lat_span),
            (other.south(), other.north(), other.lat_span),
        ) && axes_overlap(
            (self.west(), self.east(), self.lon_span),
            (other.west(), other.east(), other.lon_span),
        )
    }
}

fn overlap_length(a_lo: f64, a_hi: f64, b_lo: f64, b_hi: f64) -> f64 {
    (a_hi.min(b_hi) - a_lo.max(b_lo)).max(0.0)
}

/// Positive-length overlap of two `(low, high, span)` intervals.
fn axes_overlap(a: (f64, f64, f64), b: (f64, f64, f64)) -> bool {
    let (a_lo, a_hi, a_span) = a;
    let (b_lo, b_hi, b_span) = b;
    if a_span <= 0.0 || b_span <= 0.0 {
        return false;
    }

    let lo = a_lo.max(b_lo);
    let hi = a_hi.min(b_hi);
    if lo < hi {
        return true;
    }
    // A positive span below the precision of its centre collapses both
    // edges onto one value; that point still lies inside the other interval.
    lo == hi && (a_lo == a_hi || b_lo == b_hi)
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{:.5}..{:.5} N, {:.5}..{:.5} E]",
            self.south(),
            self.north(),
            self.west(),
            self.east()
        )
    }
}
