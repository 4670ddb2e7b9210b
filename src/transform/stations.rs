use std::time::Instant;
use tracing::debug;

use crate::{
    dataset::{Accessibility, Station},
    gtfs::GtfsStop,
    operator::OperatorConfig,
    transform::{FeedIndex, qualify},
};

const UNKNOWN_STATION: &str = "Unknown Station";

/// Collapses stop rows into stations.
///
/// For subway and rail operators only parent stations and parentless stops
/// become stations, platforms hand their routes up to their parent. Bus and
/// ferry stops are kept as they are. Rows without a usable coordinate, or
/// with a latitude of exactly zero, are dropped.
pub fn build_stations(
    config: &OperatorConfig,
    stops: &[GtfsStop],
    index: &FeedIndex,
) -> Vec<Station> {
    debug!("Building stations...");
    let now = Instant::now();
    let groups_platforms = config.mode.groups_platforms();
    let stations: Vec<Station> = stops
        .iter()
        .filter(|stop| !groups_platforms || stop.is_station() || stop.parent().is_none())
        .filter_map(|stop| build_station(config, stop, index))
        .collect();
    debug!(
        "Building {} stations from {} stops took {:?}",
        stations.len(),
        stops.len(),
        now.elapsed()
    );
    stations
}

fn build_station(config: &OperatorConfig, stop: &GtfsStop, index: &FeedIndex) -> Option<Station> {
    let coordinate = stop.coordinate().filter(|c| c.latitude != 0.0)?;

    let mut route_ids: Vec<String> = index.routes_at_stop(&stop.stop_id).to_vec();
    if stop.is_station() {
        index
            .children_of(&stop.stop_id)
            .iter()
            .flat_map(|child| index.routes_at_stop(child))
            .for_each(|route_id| {
                if !route_ids.contains(route_id) {
                    route_ids.push(route_id.clone());
                }
            });
    }

    let accessibility = stop.is_wheelchair_accessible().then_some(Accessibility {
        ada: true,
        elevator: true,
    });

    Some(Station::new(
        qualify(&config.id, &stop.stop_id),
        config.id.clone(),
        stop.stop_name.clone().unwrap_or_else(|| UNKNOWN_STATION.into()),
        coordinate,
        route_ids,
        accessibility,
    ))
}
