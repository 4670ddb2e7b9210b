/// File names of the tables read from an archive.
#[derive(Debug, Clone)]
pub struct Config {
    pub routes_file_name: String,
    pub stops_file_name: String,
    pub shapes_file_name: String,
    pub trips_file_name: String,
    pub stop_times_file_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            routes_file_name: "routes.txt".into(),
            stops_file_name: "stops.txt".into(),
            shapes_file_name: "shapes.txt".into(),
            trips_file_name: "trips.txt".into(),
            stop_times_file_name: "stop_times.txt".into(),
        }
    }
}

impl Config {
    pub fn file_name(&self, resource: super::Resource) -> &str {
        use super::Resource;
        match resource {
            Resource::Routes => &self.routes_file_name,
            Resource::Stops => &self.stops_file_name,
            Resource::Shapes => &self.shapes_file_name,
            Resource::Trips => &self.trips_file_name,
            Resource::StopTimes => &self.stop_times_file_name,
        }
    }
}
