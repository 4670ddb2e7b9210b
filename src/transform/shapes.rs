use rayon::prelude::*;
use std::{
    collections::{HashMap, HashSet},
    time::Instant,
};
use tracing::{debug, info};

use crate::{
    dataset::RouteGeometry,
    gtfs::{GtfsData, GtfsShape},
    shared::{Position, first_max_by_key},
    transform::{Config, FeedIndex, index::RouteTrips, qualify},
};

/// Points of every shape in the feed, ordered by `shape_pt_sequence`.
#[derive(Debug, Default)]
pub struct ShapePoints<'a> {
    points: HashMap<&'a str, Vec<Position>>,
}

impl<'a> ShapePoints<'a> {
    pub fn new(shapes: &'a [GtfsShape]) -> Self {
        let mut sequenced: HashMap<&str, Vec<(i64, Position)>> = HashMap::new();
        let mut dropped = 0usize;
        shapes.iter().for_each(|shape| match shape.coordinate() {
            Some(coordinate) => sequenced
                .entry(shape.shape_id.as_str())
                .or_default()
                .push((shape.sequence(), coordinate.position())),
            None => dropped += 1,
        });
        if dropped > 0 {
            debug!("Dropped {dropped} shape points without a usable coordinate");
        }

        let points = sequenced
            .into_iter()
            .map(|(shape_id, mut points)| {
                points.sort_by_key(|(sequence, _)| *sequence);
                (
                    shape_id,
                    points.into_iter().map(|(_, position)| position).collect(),
                )
            })
            .collect();
        Self { points }
    }

    pub fn get(&self, shape_id: &str) -> Option<&[Position]> {
        self.points
            .get(shape_id)
            .map(Vec::as_slice)
            .filter(|points| !points.is_empty())
    }
}

/// Where a shape starts in the west and how far east it reaches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeExtent<'a> {
    pub shape_id: &'a str,
    /// Westernmost point, the first one on ties.
    pub west: Position,
    pub east_longitude: f64,
    pub point_count: usize,
}

impl<'a> ShapeExtent<'a> {
    pub fn measure(shape_id: &'a str, points: &[Position]) -> Option<Self> {
        let first = *points.first()?;
        let west = points
            .iter()
            .fold(first, |west, point| if point.0 < west.0 { *point } else { west });
        let east_longitude = points
            .iter()
            .fold(f64::NEG_INFINITY, |east, point| east.max(point.0));
        Some(Self {
            shape_id,
            west,
            east_longitude,
            point_count: points.len(),
        })
    }
}

/// Shapes whose western terminals sit together, i.e. one branch of a route.
#[derive(Debug, Clone)]
pub struct Cluster<'a> {
    /// Western point of the shape that opened the cluster.
    pub reference: Position,
    pub members: Vec<ShapeExtent<'a>>,
}

impl<'a> Cluster<'a> {
    /// The member with the most points, the first one on ties.
    pub fn representative(&self) -> Option<&ShapeExtent<'a>> {
        first_max_by_key(&self.members, |shape| shape.point_count)
    }
}

/// Greedy first-fit clustering on western terminals.
///
/// A shape joins the first cluster whose reference point is closer than
/// `tolerance` degrees on both axes, or opens a new one. Clusters keep
/// insertion order and never merge, so the result depends on input order.
pub fn cluster_by_west_terminal<'a, I>(extents: I, tolerance: f64) -> Vec<Cluster<'a>>
where
    I: IntoIterator<Item = ShapeExtent<'a>>,
{
    let mut clusters: Vec<Cluster<'a>> = Vec::new();
    for extent in extents {
        let (lon, lat) = extent.west;
        let found = clusters.iter_mut().find(|cluster| {
            let (ref_lon, ref_lat) = cluster.reference;
            (lon - ref_lon).abs() < tolerance && (lat - ref_lat).abs() < tolerance
        });
        match found {
            Some(cluster) => cluster.members.push(extent),
            None => clusters.push(Cluster {
                reference: extent.west,
                members: vec![extent],
            }),
        }
    }
    clusters
}

/// One geometry per route branch. Feeds without any shape point fall back
/// to the stop coordinates of each route's representative trip.
pub fn select_geometries(
    data: &GtfsData,
    index: &FeedIndex,
    config: &Config,
) -> Vec<RouteGeometry> {
    debug!("Selecting route geometries...");
    let now = Instant::now();
    let geometries = match data.shapes.as_deref() {
        Some(shapes) if !shapes.is_empty() => from_shapes(shapes, index, config),
        _ => {
            info!("No shapes found, generating route geometries from stops");
            let geometries = from_stops(index);
            info!("Generated {} route geometries from stops", geometries.len());
            geometries
        }
    };
    debug!(
        "Selecting {} route geometries took {:?}",
        geometries.len(),
        now.elapsed()
    );
    geometries
}

fn from_shapes(shapes: &[GtfsShape], index: &FeedIndex, config: &Config) -> Vec<RouteGeometry> {
    let points = ShapePoints::new(shapes);
    let per_route: Vec<Vec<RouteGeometry>> = index
        .routes()
        .par_iter()
        .map(|route| route_geometries(route, index, &points, config))
        .collect();
    per_route.into_iter().flatten().collect()
}

fn route_geometries(
    route: &RouteTrips,
    index: &FeedIndex,
    points: &ShapePoints,
    config: &Config,
) -> Vec<RouteGeometry> {
    let mut seen: HashSet<&str> = HashSet::new();
    let shape_ids: Vec<&str> = route
        .trips
        .iter()
        .filter_map(|trip_id| index.trip_shape(trip_id))
        .filter(|shape_id| seen.insert(*shape_id))
        .collect();

    let extents = shape_ids
        .into_iter()
        .filter_map(|shape_id| ShapeExtent::measure(shape_id, points.get(shape_id)?));
    let clusters = cluster_by_west_terminal(extents, config.cluster_tolerance_degrees);

    let route_id = qualify(index.operator_id(), route.route_id);
    clusters
        .iter()
        .filter_map(|cluster| {
            let shape = cluster.representative()?;
            debug!(
                "{route_id}: terminal at {:?} has {} shapes, picked {} ({} points, east to {})",
                cluster.reference,
                cluster.members.len(),
                shape.shape_id,
                shape.point_count,
                shape.east_longitude
            );
            points.get(shape.shape_id).map(|coordinates| RouteGeometry {
                route_id: route_id.clone(),
                coordinates: coordinates.to_vec(),
            })
        })
        .collect()
}

fn from_stops(index: &FeedIndex) -> Vec<RouteGeometry> {
    index
        .routes()
        .iter()
        .filter_map(|route| {
            let trip = index.representative_trip(route);
            if trip.len() < 2 {
                return None;
            }
            let coordinates: Vec<Position> = trip
                .iter()
                .filter_map(|stop_id| index.stop(stop_id)?.coordinate())
                .map(|coordinate| coordinate.position())
                .collect();
            (coordinates.len() > 1).then(|| RouteGeometry {
                route_id: qualify(index.operator_id(), route.route_id),
                coordinates,
            })
        })
        .collect()
}
