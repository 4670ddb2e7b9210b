use serde::{Deserialize, Serialize};

use crate::{
    operator::Mode,
    shared::{Coordinate, Position},
};

/// A transit system, one per feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operator {
    pub id: String,
    pub name: String,
    pub agency: String,
    #[serde(rename = "type")]
    pub mode: Mode,
    pub color: String,
    pub enabled: bool,
}

/// A line as riders know it, e.g. the "A" train or the "Babylon" branch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    /// `{operator}:{route_id}`, unique across operators.
    pub id: String,
    pub system_id: String,
    pub short_name: String,
    pub long_name: String,
    pub color: String,
    pub text_color: String,
    #[serde(rename = "type")]
    pub mode: Mode,
    /// Station ids in riding order, taken from the route's longest trip.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub station_order: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub peak_headway_minutes: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub off_peak_headway_minutes: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Accessibility {
    pub ada: bool,
    pub elevator: bool,
}

/// A place riders board, standing for a parent station and all its
/// platforms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Station {
    /// `{operator}:{stop_id}`, unique across operators.
    pub id: String,
    pub system_id: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub route_ids: Vec<String>,
    pub is_transfer_point: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accessibility: Option<Accessibility>,
}

impl Station {
    pub fn new(
        id: String,
        system_id: String,
        name: String,
        coordinate: Coordinate,
        route_ids: Vec<String>,
        accessibility: Option<Accessibility>,
    ) -> Self {
        let is_transfer_point = route_ids.len() > 1;
        Self {
            id,
            system_id,
            name,
            latitude: coordinate.latitude,
            longitude: coordinate.longitude,
            route_ids,
            is_transfer_point,
            accessibility,
        }
    }
}

/// One continuous polyline of a route. Branching routes own several.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteGeometry {
    pub route_id: String,
    /// `(longitude, latitude)` pairs in path order.
    pub coordinates: Vec<Position>,
}
