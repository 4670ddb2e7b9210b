use std::{
    collections::{HashMap, HashSet},
    time::Instant,
};
use tracing::debug;

use crate::{
    dataset::{Route, Station},
    transform::{FeedIndex, qualify},
};

/// Ordered station ids per qualified route id, read off each route's
/// representative trip.
///
/// Platforms resolve to their parent station, repeats keep their first
/// position and ids missing from `stations` are left out. Routes that end up
/// with no station at all are not in the map.
pub fn station_orders(index: &FeedIndex, stations: &[Station]) -> HashMap<String, Vec<String>> {
    debug!("Ordering stations...");
    let now = Instant::now();
    let known: HashSet<&str> = stations.iter().map(|station| station.id.as_str()).collect();

    let orders: HashMap<String, Vec<String>> = index
        .routes()
        .iter()
        .filter_map(|route| {
            let mut seen: HashSet<String> = HashSet::new();
            let order: Vec<String> = index
                .representative_trip(route)
                .iter()
                .filter_map(|stop_id| index.station_of(stop_id))
                .filter(|station_id| known.contains(station_id.as_str()))
                .filter(|station_id| seen.insert(station_id.clone()))
                .collect();
            if order.is_empty() {
                None
            } else {
                Some((qualify(index.operator_id(), route.route_id), order))
            }
        })
        .collect();

    debug!(
        "Ordering stations for {} routes took {:?}",
        orders.len(),
        now.elapsed()
    );
    orders
}

/// Attaches the computed orders to `routes`. Routes without an order keep
/// `station_order` absent.
pub fn apply_station_orders(routes: &mut [Route], orders: &HashMap<String, Vec<String>>) {
    routes.iter_mut().for_each(|route| {
        if let Some(order) = orders.get(&route.id) {
            route.station_order = Some(order.clone());
        }
    });
}
