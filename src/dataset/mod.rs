use serde::{Deserialize, Serialize};
use std::io;
use thiserror::Error;

mod models;
pub mod store;
pub use models::*;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Everything produced for one operator. This is what gets persisted and
/// what the map renderer reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub system: Operator,
    pub routes: Vec<Route>,
    pub stations: Vec<Station>,
    pub route_geometries: Vec<RouteGeometry>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub routes: usize,
    pub stations: usize,
    pub geometries: usize,
}

impl Dataset {
    pub fn summary(&self) -> Summary {
        Summary {
            routes: self.routes.len(),
            stations: self.stations.len(),
            geometries: self.route_geometries.len(),
        }
    }
}

impl std::ops::AddAssign for Summary {
    fn add_assign(&mut self, rhs: Self) {
        self.routes += rhs.routes;
        self.stations += rhs.stations;
        self.geometries += rhs.geometries;
    }
}
