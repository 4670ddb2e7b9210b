use std::{cmp, ops::Mul};

use serde::{Deserialize, Serialize};

/// Longitude degree length around 40.7°N.
pub const NYC_METERS_PER_DEGREE_LONGITUDE: Distance = Distance::from_meters(85_000.0);
pub const NYC_METERS_PER_DEGREE_LATITUDE: Distance = Distance::from_meters(111_000.0);

/// A `(longitude, latitude)` pair, the order map renderers expect.
pub type Position = (f64, f64);

/// Key of a square grid cell, see [`to_cell`].
pub type Cell = (i64, i64);

#[derive(Debug, Clone, Copy, Default)]
pub struct Distance(f64);

impl PartialEq for Distance {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl PartialOrd for Distance {
    fn partial_cmp(&self, other: &Self) -> Option<cmp::Ordering> {
        self.0.partial_cmp(&other.0)
    }
}

impl Mul<f64> for Distance {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self::Output {
        Self(self.0 * rhs)
    }
}

impl Distance {
    pub const fn from_meters(distance: f64) -> Self {
        Self(distance)
    }

    pub const fn from_kilometers(distance: f64) -> Self {
        Self(distance * 1000.0)
    }

    pub const fn as_meters(&self) -> f64 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0.0
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    /// Parses a raw latitude/longitude pair as found in GTFS tables.
    /// Returns `None` when either value is absent or not a finite number.
    pub fn parse(latitude: Option<&str>, longitude: Option<&str>) -> Option<Self> {
        let latitude: f64 = latitude?.trim().parse().ok()?;
        let longitude: f64 = longitude?.trim().parse().ok()?;
        if latitude.is_finite() && longitude.is_finite() {
            Some(Self {
                latitude,
                longitude,
            })
        } else {
            None
        }
    }

    pub fn position(&self) -> Position {
        (self.longitude, self.latitude)
    }
}

/// Snaps a position to a grid of `precision` decimal places. Four places is
/// roughly 11 m at mid latitudes.
pub fn to_cell(position: Position, precision: i32) -> Cell {
    let scale = 10f64.powi(precision);
    let (lon, lat) = position;
    ((lon * scale).round() as i64, (lat * scale).round() as i64)
}

#[test]
fn parse_rejects_garbage() {
    assert!(Coordinate::parse(Some("40.7"), Some("abc")).is_none());
    assert!(Coordinate::parse(None, Some("-73.9")).is_none());
    assert!(Coordinate::parse(Some("NaN"), Some("-73.9")).is_none());
    let coordinate = Coordinate::parse(Some(" 40.75 "), Some("-73.98")).unwrap();
    assert_eq!(coordinate.position(), (-73.98, 40.75));
}

#[test]
fn nearby_points_share_a_cell() {
    let a = to_cell((-73.98761, 40.75012), 4);
    let b = to_cell((-73.98759, 40.75014), 4);
    let c = to_cell((-73.98700, 40.75014), 4);
    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn distance_cmp_test() {
    let dist_a = Distance::from_meters(1000.0);
    let dist_b = Distance::from_kilometers(0.5);
    assert!(dist_a > dist_b);
    assert_eq!(dist_b * 2.0, Distance::from_kilometers(1.0));
}
