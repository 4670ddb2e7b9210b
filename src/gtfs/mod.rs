use std::{
    collections::HashMap,
    fmt,
    fs::File,
    io::{self, Cursor, Read, Seek},
    path::Path,
};
use thiserror::Error;
use tracing::debug;
use zip::ZipArchive;

mod config;
mod data;
pub mod models;
pub mod table;
pub use config::*;
pub use data::*;
pub use models::*;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("Csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Archive is missing required table {0}")]
    MissingResource(Resource),
}

/// The tables the pipeline reads from a feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Routes,
    Stops,
    Shapes,
    Trips,
    StopTimes,
}

impl Resource {
    pub const ALL: [Resource; 5] = [
        Resource::Routes,
        Resource::Stops,
        Resource::Shapes,
        Resource::Trips,
        Resource::StopTimes,
    ];

    /// Shapes are optional, many small operators leave them out.
    pub fn is_required(&self) -> bool {
        !matches!(self, Resource::Shapes)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Resource::Routes => "routes",
            Resource::Stops => "stops",
            Resource::Shapes => "shapes",
            Resource::Trips => "trips",
            Resource::StopTimes => "stop_times",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Raw text of the tables extracted from a feed archive.
#[derive(Debug, Clone, Default)]
pub struct GtfsArchive {
    resources: HashMap<Resource, String>,
}

impl GtfsArchive {
    pub fn from_bytes(bytes: &[u8], config: &Config) -> Result<Self, self::Error> {
        Self::from_reader(Cursor::new(bytes), config)
    }

    pub fn from_zip<P: AsRef<Path>>(path: P, config: &Config) -> Result<Self, self::Error> {
        let file = File::open(path)?;
        Self::from_reader(file, config)
    }

    pub fn from_reader<R: Read + Seek>(reader: R, config: &Config) -> Result<Self, self::Error> {
        let mut archive = ZipArchive::new(reader)?;
        let mut resources: HashMap<Resource, String> = HashMap::new();
        for i in 0..archive.len() {
            let mut file = archive.by_index(i)?;
            if file.is_dir() {
                continue;
            }
            // Some publishers nest the tables in a folder.
            let name = file.name().to_string();
            let base_name = name.rsplit('/').next().unwrap_or(&name);
            let Some(resource) = Resource::ALL
                .into_iter()
                .find(|resource| config.file_name(*resource) == base_name)
            else {
                debug!("Ignoring {name}");
                continue;
            };
            if resources.contains_key(&resource) {
                continue;
            }
            let mut buf = Vec::new();
            file.read_to_end(&mut buf)?;
            resources.insert(resource, String::from_utf8_lossy(&buf).into_owned());
        }

        if let Some(missing) = Resource::ALL
            .into_iter()
            .find(|resource| resource.is_required() && !resources.contains_key(resource))
        {
            return Err(self::Error::MissingResource(missing));
        }
        Ok(Self { resources })
    }

    pub fn get(&self, resource: Resource) -> Option<&str> {
        self.resources.get(&resource).map(String::as_str)
    }

    pub fn require(&self, resource: Resource) -> Result<&str, self::Error> {
        self.get(resource)
            .ok_or(self::Error::MissingResource(resource))
    }
}
