use std::time::Instant;
use tracing::debug;

use crate::gtfs::{
    self, GtfsArchive, GtfsRoute, GtfsShape, GtfsStop, GtfsStopTime, GtfsTrip, Resource,
    table::Table,
};

/// Typed rows of every table the pipeline reads.
#[derive(Default, Debug, Clone)]
pub struct GtfsData {
    pub routes: Vec<GtfsRoute>,
    pub stops: Vec<GtfsStop>,
    /// `None` when the archive has no shapes table at all.
    pub shapes: Option<Vec<GtfsShape>>,
    pub trips: Vec<GtfsTrip>,
    pub stop_times: Vec<GtfsStopTime>,
}

impl GtfsData {
    pub fn decode(archive: &GtfsArchive) -> Result<Self, gtfs::Error> {
        let now = Instant::now();
        let mut routes: Vec<GtfsRoute> = decode_table(archive.require(Resource::Routes)?)?;
        routes.retain(|route| !route.route_id.is_empty());

        let mut stops: Vec<GtfsStop> = decode_table(archive.require(Resource::Stops)?)?;
        stops.retain(|stop| !stop.stop_id.is_empty());

        let shapes = match archive.get(Resource::Shapes) {
            Some(text) => {
                let mut shapes: Vec<GtfsShape> = decode_table(text)?;
                shapes.retain(|shape| !shape.shape_id.is_empty());
                Some(shapes)
            }
            None => None,
        };

        let mut trips: Vec<GtfsTrip> = decode_table(archive.require(Resource::Trips)?)?;
        trips.retain(|trip| !trip.trip_id.is_empty() && !trip.route_id.is_empty());

        let mut stop_times: Vec<GtfsStopTime> =
            decode_table(archive.require(Resource::StopTimes)?)?;
        stop_times.retain(|st| !st.trip_id.is_empty() && !st.stop_id.is_empty());

        debug!(
            "Decoded {} routes, {} stops, {} shape points, {} trips, {} stop times in {:?}",
            routes.len(),
            stops.len(),
            shapes.as_ref().map_or(0, Vec::len),
            trips.len(),
            stop_times.len(),
            now.elapsed()
        );

        Ok(Self {
            routes,
            stops,
            shapes,
            trips,
            stop_times,
        })
    }

    /// False when the feed ships no shape points at all, which is when
    /// geometry falls back to stop coordinates.
    pub fn has_shapes(&self) -> bool {
        self.shapes.as_ref().is_some_and(|shapes| !shapes.is_empty())
    }
}

fn decode_table<T: serde::de::DeserializeOwned>(text: &str) -> Result<Vec<T>, gtfs::Error> {
    Ok(Table::parse(text)?.deserialize())
}
