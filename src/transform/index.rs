use std::{collections::HashMap, time::Instant};
use tracing::debug;

use crate::{
    gtfs::{GtfsData, GtfsStop},
    shared::first_max_by_key,
    transform::qualify,
};

/// Read-only lookups over one operator's feed.
///
/// Ids are borrowed from the decoded [`GtfsData`], which must outlive the
/// index. Route ids handed out by [`FeedIndex::routes_at_stop`] are already
/// qualified with the operator id, everything else is raw.
#[derive(Debug)]
pub struct FeedIndex<'a> {
    operator_id: &'a str,
    stops: HashMap<&'a str, &'a GtfsStop>,
    /// Parent station id to its child stop ids, in stops file order.
    children: HashMap<&'a str, Vec<&'a str>>,
    /// Routes in the order trips first mention them.
    routes: Vec<RouteTrips<'a>>,
    trip_stops: HashMap<&'a str, Vec<&'a str>>,
    trip_shapes: HashMap<&'a str, &'a str>,
    stop_routes: HashMap<&'a str, Vec<String>>,
}

#[derive(Debug)]
pub struct RouteTrips<'a> {
    pub route_id: &'a str,
    /// Trip ids in trips file order.
    pub trips: Vec<&'a str>,
}

impl<'a> FeedIndex<'a> {
    pub fn new(operator_id: &'a str, data: &'a GtfsData) -> Self {
        debug!("Indexing feed...");
        let now = Instant::now();

        let mut stops: HashMap<&str, &GtfsStop> = HashMap::new();
        let mut children: HashMap<&str, Vec<&str>> = HashMap::new();
        data.stops.iter().for_each(|stop| {
            stops.entry(stop.stop_id.as_str()).or_insert(stop);
            if let Some(parent) = stop.parent() {
                children
                    .entry(parent)
                    .or_default()
                    .push(stop.stop_id.as_str());
            }
        });

        let mut route_lookup: HashMap<&str, usize> = HashMap::new();
        let mut routes: Vec<RouteTrips> = Vec::new();
        let mut trip_to_route: HashMap<&str, &str> = HashMap::new();
        let mut trip_shapes: HashMap<&str, &str> = HashMap::new();
        data.trips.iter().for_each(|trip| {
            let route_id = trip.route_id.as_str();
            let index = *route_lookup.entry(route_id).or_insert_with(|| {
                routes.push(RouteTrips {
                    route_id,
                    trips: Vec::new(),
                });
                routes.len() - 1
            });
            routes[index].trips.push(trip.trip_id.as_str());
            trip_to_route.insert(trip.trip_id.as_str(), route_id);
            if let Some(shape_id) = trip.shape_id.as_deref().filter(|id| !id.is_empty()) {
                trip_shapes.insert(trip.trip_id.as_str(), shape_id);
            }
        });

        let mut stop_routes: HashMap<&str, Vec<String>> = HashMap::new();
        let mut sequenced: HashMap<&str, Vec<(i64, &str)>> = HashMap::new();
        data.stop_times.iter().for_each(|stop_time| {
            let stop_id = stop_time.stop_id.as_str();
            sequenced
                .entry(stop_time.trip_id.as_str())
                .or_default()
                .push((stop_time.sequence(), stop_id));

            if let Some(route_id) = trip_to_route.get(stop_time.trip_id.as_str()) {
                let route_id = qualify(operator_id, route_id);
                let serving = stop_routes.entry(stop_id).or_default();
                if !serving.contains(&route_id) {
                    serving.push(route_id);
                }
            }
        });

        let trip_stops: HashMap<&str, Vec<&str>> = sequenced
            .into_iter()
            .map(|(trip_id, mut stops)| {
                // Stable, rows sharing a sequence keep file order.
                stops.sort_by_key(|(sequence, _)| *sequence);
                (trip_id, stops.into_iter().map(|(_, stop)| stop).collect())
            })
            .collect();

        debug!("Indexing feed took {:?}", now.elapsed());
        Self {
            operator_id,
            stops,
            children,
            routes,
            trip_stops,
            trip_shapes,
            stop_routes,
        }
    }

    pub fn operator_id(&self) -> &'a str {
        self.operator_id
    }

    pub fn stop(&self, stop_id: &str) -> Option<&'a GtfsStop> {
        self.stops.get(stop_id).copied()
    }

    pub fn children_of(&self, parent_id: &str) -> &[&'a str] {
        self.children.get(parent_id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Qualified ids of the routes whose trips call at `stop_id`.
    pub fn routes_at_stop(&self, stop_id: &str) -> &[String] {
        self.stop_routes.get(stop_id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn routes(&self) -> &[RouteTrips<'a>] {
        &self.routes
    }

    /// Stop ids of `trip_id` ordered by stop sequence.
    pub fn trip_stops(&self, trip_id: &str) -> &[&'a str] {
        self.trip_stops.get(trip_id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn trip_shape(&self, trip_id: &str) -> Option<&'a str> {
        self.trip_shapes.get(trip_id).copied()
    }

    /// The stops of the trip with the most stop times, which stands in for
    /// the whole route. Ties go to the trip found first.
    pub fn representative_trip(&self, route: &RouteTrips<'a>) -> &[&'a str] {
        first_max_by_key(
            route.trips.iter().map(|trip_id| self.trip_stops(trip_id)),
            |stops| stops.len(),
        )
        .unwrap_or(&[])
    }

    /// Qualified id of the station a stop belongs to: its parent when it has
    /// one, otherwise itself.
    pub fn station_of(&self, stop_id: &str) -> Option<String> {
        let stop = self.stop(stop_id)?;
        let station_id = stop.parent().unwrap_or(stop.stop_id.as_str());
        Some(qualify(self.operator_id, station_id))
    }
}
