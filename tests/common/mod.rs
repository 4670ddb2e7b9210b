#![allow(dead_code)]

use linemap::prelude::*;
use std::io::{Cursor, Write};
use zip::{ZipWriter, write::SimpleFileOptions};

pub const ROUTES: &str = "\
route_id,agency_id,route_short_name,route_long_name,route_type,route_color,route_text_color
A,MTA,A,8 Avenue Express,1,,
C,MTA,C,8 Avenue Local,1,EE352E,
E,MTA,,,1,,
";

pub const STOPS: &str = "\
stop_id,stop_name,stop_lat,stop_lon,location_type,parent_station,wheelchair_boarding
S1,Alpha,40.700,-74.000,1,,1
S1N,Alpha,40.700,-74.000,0,S1,
S2,Beta,40.710,-73.990,1,,
S2N,Beta,40.710,-73.990,0,S2,
S3,,40.720,-73.980,,,0
S4,Nowhere,0,-73.970,,,
";

pub const TRIPS: &str = "\
route_id,service_id,trip_id,shape_id
A,WKD,A1,SA1
A,WKD,A2,SA2
C,WKD,C1,SC1
";

pub const STOP_TIMES: &str = "\
trip_id,arrival_time,departure_time,stop_id,stop_sequence
A1,08:00:00,08:00:00,S1N,1
A1,08:05:00,08:05:00,S3,3
A1,08:02:00,08:02:00,S2N,2
A2,09:00:00,09:00:00,S1N,1
A2,09:02:00,09:02:00,S2N,2
C1,08:00:00,08:00:00,S1N,1
C1,08:03:00,08:03:00,S2N,2
";

/// A and C run the same track, SA2 is a short turn of A that starts at the
/// same terminal as SA1.
pub const SHAPES: &str = "\
shape_id,shape_pt_lat,shape_pt_lon,shape_pt_sequence
SA1,40.700,-74.000,1
SA1,40.720,-73.980,3
SA1,40.710,-73.990,2
SA2,40.700,-74.000,1
SA2,40.710,-73.990,2
SC1,40.700,-74.000,1
SC1,40.710,-73.990,2
SC1,40.720,-73.980,3
";

/// Builds feed archives in memory.
#[derive(Debug, Clone, Default)]
pub struct FeedBuilder {
    files: Vec<(String, String)>,
}

impl FeedBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// The small two-line subway feed used across the tests.
    pub fn subway() -> Self {
        Self::new()
            .file("routes.txt", ROUTES)
            .file("stops.txt", STOPS)
            .file("trips.txt", TRIPS)
            .file("stop_times.txt", STOP_TIMES)
            .file("shapes.txt", SHAPES)
    }

    pub fn file(mut self, name: &str, contents: &str) -> Self {
        self.files.retain(|(existing, _)| existing != name);
        self.files.push((name.to_string(), contents.to_string()));
        self
    }

    pub fn without(mut self, name: &str) -> Self {
        self.files.retain(|(existing, _)| existing != name);
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        for (name, contents) in &self.files {
            writer
                .start_file(name.as_str(), SimpleFileOptions::default())
                .unwrap();
            writer.write_all(contents.as_bytes()).unwrap();
        }
        writer.finish().unwrap().into_inner()
    }
}

pub fn subway_config(id: &str) -> OperatorConfig {
    OperatorConfig::new(id, "Test Subway", "Test Transit", Mode::Subway, "#808183")
        .enabled(true)
        .with_line_colors([("A", "#0039A6", "#FFFFFF")])
}

pub fn registry() -> Registry {
    Registry::new(vec![
        subway_config("test"),
        OperatorConfig::new("bus", "Test Bus", "Test Transit", Mode::Bus, "#00AA00"),
    ])
}

pub fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}
