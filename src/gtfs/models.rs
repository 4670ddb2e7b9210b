use serde::{Deserialize, Serialize};

use crate::shared::Coordinate;

// Numeric columns are kept as text and parsed leniently by the accessors so
// one bad value never costs the whole row.

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct GtfsRoute {
    pub route_id: String,
    pub route_short_name: Option<String>,
    pub route_long_name: Option<String>,
    pub route_color: Option<String>,
    pub route_text_color: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct GtfsStop {
    pub stop_id: String,
    pub stop_name: Option<String>,
    pub stop_lat: Option<String>,
    pub stop_lon: Option<String>,
    pub location_type: Option<String>,
    pub parent_station: Option<String>,
    pub wheelchair_boarding: Option<String>,
}

impl GtfsStop {
    pub fn coordinate(&self) -> Option<Coordinate> {
        Coordinate::parse(self.stop_lat.as_deref(), self.stop_lon.as_deref())
    }

    /// `location_type` 1, a station grouping platforms.
    pub fn is_station(&self) -> bool {
        self.location_type.as_deref() == Some("1")
    }

    pub fn parent(&self) -> Option<&str> {
        self.parent_station.as_deref().filter(|id| !id.is_empty())
    }

    pub fn is_wheelchair_accessible(&self) -> bool {
        self.wheelchair_boarding.as_deref() == Some("1")
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct GtfsShape {
    pub shape_id: String,
    pub shape_pt_lat: Option<String>,
    pub shape_pt_lon: Option<String>,
    pub shape_pt_sequence: Option<String>,
}

impl GtfsShape {
    pub fn coordinate(&self) -> Option<Coordinate> {
        Coordinate::parse(self.shape_pt_lat.as_deref(), self.shape_pt_lon.as_deref())
    }

    pub fn sequence(&self) -> i64 {
        parse_sequence(self.shape_pt_sequence.as_deref())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct GtfsTrip {
    pub route_id: String,
    pub trip_id: String,
    pub shape_id: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct GtfsStopTime {
    pub trip_id: String,
    pub stop_id: String,
    pub stop_sequence: Option<String>,
}

impl GtfsStopTime {
    /// Missing or unreadable sequences count as 0.
    pub fn sequence(&self) -> i64 {
        parse_sequence(self.stop_sequence.as_deref())
    }
}

/// Reads the leading integer, so `"12"`, `"12.0"` and `"12abc"` all give 12.
fn parse_sequence(value: Option<&str>) -> i64 {
    let Some(value) = value.map(str::trim) else {
        return 0;
    };
    let sign_len = usize::from(value.starts_with(['-', '+']));
    let digits_len = value[sign_len..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();
    value[..sign_len + digits_len].parse().unwrap_or(0)
}

#[test]
fn sequence_reads_leading_integer() {
    assert_eq!(parse_sequence(Some("7")), 7);
    assert_eq!(parse_sequence(Some(" 12 ")), 12);
    assert_eq!(parse_sequence(Some("1.0")), 1);
    assert_eq!(parse_sequence(Some("3abc")), 3);
    assert_eq!(parse_sequence(Some("-2")), -2);
    assert_eq!(parse_sequence(Some("x1")), 0);
    assert_eq!(parse_sequence(Some("")), 0);
    assert_eq!(parse_sequence(None), 0);
}
