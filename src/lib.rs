//! Turns static GTFS archives into normalized, map-ready transit datasets.
//!
//! One [`dataset::Dataset`] is produced per operator: its routes with
//! resolved colors and station order, its stations with parent/child
//! platforms collapsed, and one polyline per route branch, fanned out so
//! routes sharing track render side by side.

pub mod dataset;
pub mod gtfs;
pub mod operator;
pub mod pipeline;
pub mod shared;
pub mod transform;

pub mod prelude {
    pub use crate::dataset::{Accessibility, Dataset, Operator, Route, RouteGeometry, Station};
    pub use crate::gtfs::{GtfsArchive, GtfsData, Resource};
    pub use crate::operator::{LineColor, Mode, OperatorConfig, Registry};
    pub use crate::pipeline::{FeedSource, Job, Outcome, Pipeline, RunReport, Runner};
    pub use crate::shared::{Coordinate, Distance};
}
