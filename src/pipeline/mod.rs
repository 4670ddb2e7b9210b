use std::{path::Path, time::Instant};
use thiserror::Error;
use tracing::{debug, info};

use crate::{
    dataset::{self, Dataset},
    gtfs::{self, GtfsArchive, GtfsData},
    operator::{self, OperatorConfig, Registry},
    transform::{self, FeedIndex, offset, ordering, routes, shapes, stations},
};

mod runner;
pub use runner::*;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Gtfs(#[from] gtfs::Error),
    #[error(transparent)]
    Operator(#[from] operator::Error),
    #[error(transparent)]
    Dataset(#[from] dataset::Error),
    #[error("Could not fetch feed for {operator}: {reason}")]
    UpstreamFetchFailure { operator: String, reason: String },
}

/// Turns one operator's feed archive into its [`Dataset`].
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    registry: Registry,
    gtfs: gtfs::Config,
    transform: transform::Config,
}

impl Pipeline {
    pub fn new(registry: Registry) -> Self {
        Self {
            registry,
            ..Default::default()
        }
    }

    pub fn with_gtfs_config(mut self, config: gtfs::Config) -> Self {
        self.gtfs = config;
        self
    }

    pub fn with_transform_config(mut self, config: transform::Config) -> Self {
        self.transform = config;
        self
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn build(&self, operator_id: &str, bytes: &[u8]) -> Result<Dataset, self::Error> {
        let config = self.registry.get(operator_id)?;
        let archive = GtfsArchive::from_bytes(bytes, &self.gtfs)?;
        self.build_archive(config, &archive)
    }

    pub fn build_from_zip<P: AsRef<Path>>(
        &self,
        operator_id: &str,
        path: P,
    ) -> Result<Dataset, self::Error> {
        let config = self.registry.get(operator_id)?;
        let archive = GtfsArchive::from_zip(path, &self.gtfs)?;
        self.build_archive(config, &archive)
    }

    /// Runs every stage over an already opened archive.
    pub fn build_archive(
        &self,
        config: &OperatorConfig,
        archive: &GtfsArchive,
    ) -> Result<Dataset, self::Error> {
        info!("Parsing {} feed", config.name);
        let now = Instant::now();
        let data = GtfsData::decode(archive)?;
        let index = FeedIndex::new(&config.id, &data);

        let mut routes = routes::build_routes(config, &data.routes);
        let stations = stations::build_stations(config, &data.stops, &index);
        let orders = ordering::station_orders(&index, &stations);
        ordering::apply_station_orders(&mut routes, &orders);
        info!("Built station ordering for {} routes", orders.len());

        let geometries = shapes::select_geometries(&data, &index, &self.transform);
        let route_geometries = offset::apply_parallel_offsets(geometries, &self.transform);

        let dataset = Dataset {
            system: config.operator(),
            routes,
            stations,
            route_geometries,
        };
        let summary = dataset.summary();
        info!(
            "Processed {}: {} routes, {} stations, {} route geometries",
            config.id, summary.routes, summary.stations, summary.geometries
        );
        debug!("Building {} took {:?}", config.id, now.elapsed());
        Ok(dataset)
    }
}
