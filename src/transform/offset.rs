use rayon::prelude::*;
use std::{
    collections::{BTreeSet, HashMap, HashSet},
    time::Instant,
};
use tracing::{debug, info};

use crate::{
    dataset::RouteGeometry,
    shared::{Cell, Distance, Position, to_cell},
    transform::Config,
};

/// Routes that share at least one grid cell with a geometry, the geometry's
/// own route included. Members are sorted by id.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OverlapGroup {
    members: Vec<String>,
}

impl OverlapGroup {
    pub fn new<I, S>(members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let members: BTreeSet<String> = members.into_iter().map(Into::into).collect();
        Self {
            members: members.into_iter().collect(),
        }
    }

    pub fn members(&self) -> &[String] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Position of `route_id` in the group, shifted so the group fans out
    /// evenly around the shared centerline: three routes get -1, 0 and 1,
    /// two get -0.5 and 0.5. Routes alone on their track, or not in the
    /// group, get 0.
    pub fn offset_index(&self, route_id: &str) -> f64 {
        if self.len() <= 1 {
            return 0.0;
        }
        match self.members.binary_search_by(|member| member.as_str().cmp(route_id)) {
            Ok(position) => position as f64 - (self.len() - 1) as f64 / 2.0,
            Err(_) => 0.0,
        }
    }

    /// Offset index of every member, in member order.
    pub fn offset_indices(&self) -> Vec<f64> {
        self.members
            .iter()
            .map(|member| self.offset_index(member))
            .collect()
    }
}

/// One overlap group per geometry, in geometry order.
pub fn overlap_groups(geometries: &[RouteGeometry], precision: i32) -> Vec<OverlapGroup> {
    let mut cells: HashMap<Cell, HashSet<&str>> = HashMap::new();
    geometries.iter().for_each(|geometry| {
        geometry.coordinates.iter().for_each(|position| {
            cells
                .entry(to_cell(*position, precision))
                .or_default()
                .insert(geometry.route_id.as_str());
        });
    });

    geometries
        .iter()
        .map(|geometry| {
            let mut sharing: HashSet<&str> = HashSet::new();
            geometry.coordinates.iter().for_each(|position| {
                if let Some(routes) = cells.get(&to_cell(*position, precision)) {
                    sharing.extend(routes.iter().copied());
                }
            });
            OverlapGroup::new(sharing)
        })
        .collect()
}

/// Offset index per route id. A route with several geometries takes the
/// index computed for the last of them, and every one of its geometries is
/// shifted by it.
pub fn route_offsets(geometries: &[RouteGeometry], config: &Config) -> HashMap<String, f64> {
    let mut offsets: HashMap<String, f64> = HashMap::new();
    geometries
        .iter()
        .zip(overlap_groups(geometries, config.grid_precision))
        .for_each(|(geometry, group)| {
            offsets.insert(
                geometry.route_id.clone(),
                group.offset_index(&geometry.route_id),
            );
        });
    offsets
}

/// Shifts routes that run on shared track sideways so they render as
/// distinct parallel lines. Point count and order are preserved, and a
/// route sharing no track with any other is left untouched.
pub fn apply_parallel_offsets(
    geometries: Vec<RouteGeometry>,
    config: &Config,
) -> Vec<RouteGeometry> {
    if geometries.len() <= 1 {
        return geometries;
    }
    debug!("Computing parallel line offsets...");
    let now = Instant::now();

    let offsets = route_offsets(&geometries, config);
    let shifted = offsets.values().filter(|offset| **offset != 0.0).count();
    if shifted > 0 {
        info!("Applied parallel line offsets to {shifted} routes");
    }

    let geometries: Vec<RouteGeometry> = geometries
        .into_par_iter()
        .map(|geometry| {
            let index = offsets.get(&geometry.route_id).copied().unwrap_or(0.0);
            let offset = config.offset_step * index;
            RouteGeometry {
                coordinates: offset_path(&geometry.coordinates, offset, config),
                route_id: geometry.route_id,
            }
        })
        .collect();
    debug!("Computing parallel line offsets took {:?}", now.elapsed());
    geometries
}

/// Moves every point `offset` to the left of the local direction of travel
/// (negative values move right). The direction at a point runs from its
/// previous to its next point, clamped at the ends of the path.
pub fn offset_path(coordinates: &[Position], offset: Distance, config: &Config) -> Vec<Position> {
    if offset.is_zero() || coordinates.len() < 2 {
        return coordinates.to_vec();
    }
    let meters = offset.as_meters();
    let per_lon = config.meters_per_degree_longitude.as_meters();
    let per_lat = config.meters_per_degree_latitude.as_meters();
    let last = coordinates.len() - 1;

    coordinates
        .iter()
        .enumerate()
        .map(|(i, &(lon, lat))| {
            let prev = coordinates[i.saturating_sub(1)];
            let next = coordinates[usize::min(last, i + 1)];
            let dx = next.0 - prev.0;
            let dy = next.1 - prev.1;
            let len = f64::sqrt(dx * dx + dy * dy);
            if len == 0.0 {
                return (lon, lat);
            }
            // Rotated 90° counterclockwise.
            let perp_x = -dy / len;
            let perp_y = dx / len;
            (
                lon + perp_x * meters / per_lon,
                lat + perp_y * meters / per_lat,
            )
        })
        .collect()
}
