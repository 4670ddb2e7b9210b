//! Builders turning decoded feed rows into dataset entities.
//!
//! Every builder reads from a [`FeedIndex`], built once per operator and
//! never mutated afterwards.

pub mod index;
pub mod offset;
pub mod ordering;
pub mod routes;
pub mod shapes;
pub mod stations;

pub use index::FeedIndex;

use crate::shared::{Distance, NYC_METERS_PER_DEGREE_LATITUDE, NYC_METERS_PER_DEGREE_LONGITUDE};

/// Geometry constants used by shape selection and line offsetting.
#[derive(Debug, Clone)]
pub struct Config {
    /// Western terminals closer than this, in degrees on both axes, belong to
    /// the same branch (about 1.5 km).
    pub cluster_tolerance_degrees: f64,
    /// Decimal places coordinates are rounded to when looking for shared
    /// track.
    pub grid_precision: i32,
    /// Sideways distance between two neighbouring parallel lines.
    pub offset_step: Distance,
    /// Only valid near the latitude they were measured at.
    pub meters_per_degree_longitude: Distance,
    pub meters_per_degree_latitude: Distance,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cluster_tolerance_degrees: 0.015,
            grid_precision: 4,
            offset_step: Distance::from_meters(10.0),
            meters_per_degree_longitude: NYC_METERS_PER_DEGREE_LONGITUDE,
            meters_per_degree_latitude: NYC_METERS_PER_DEGREE_LATITUDE,
        }
    }
}

/// Prefixes a raw feed id with its operator so ids stay unique across feeds.
pub fn qualify(operator_id: &str, raw_id: &str) -> String {
    format!("{operator_id}:{raw_id}")
}

#[test]
fn qualified_ids_carry_the_operator() {
    assert_eq!(qualify("subway", "A"), "subway:A");
    assert_ne!(qualify("lirr", "1"), qualify("metro-north", "1"));
}
