use serde::{Deserialize, Serialize};
use std::{collections::HashMap, fmt, fs::File, io, io::BufReader, path::Path};
use thiserror::Error;

use crate::dataset::Operator;

mod builtin;

#[derive(Error, Debug)]
pub enum Error {
    #[error("No configuration for operator: {0}")]
    UnknownOperator(String),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Kind of service an operator runs. Decides how stops collapse into
/// stations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Subway,
    Rail,
    Bus,
    Ferry,
}

impl Mode {
    /// Subway and rail feeds model platforms as children of a station.
    pub fn groups_platforms(&self) -> bool {
        matches!(self, Mode::Subway | Mode::Rail)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Mode::Subway => "subway",
            Mode::Rail => "rail",
            Mode::Bus => "bus",
            Mode::Ferry => "ferry",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineColor {
    pub color: String,
    pub text_color: String,
}

impl LineColor {
    pub fn new(color: &str, text_color: &str) -> Self {
        Self {
            color: color.into(),
            text_color: text_color.into(),
        }
    }
}

/// Static description of one operator, keyed by its id in a [`Registry`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperatorConfig {
    pub id: String,
    pub name: String,
    pub agency: String,
    #[serde(rename = "type")]
    pub mode: Mode,
    /// Used for any route the palette and the feed both leave uncolored.
    pub color: String,
    #[serde(default)]
    pub enabled: bool,
    /// Keyed by route short name or long name.
    #[serde(default)]
    pub line_colors: HashMap<String, LineColor>,
}

impl OperatorConfig {
    pub fn new(id: &str, name: &str, agency: &str, mode: Mode, color: &str) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            agency: agency.into(),
            mode,
            color: color.into(),
            enabled: false,
            line_colors: HashMap::new(),
        }
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn with_line_colors<'a, I>(mut self, colors: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str, &'a str)>,
    {
        self.line_colors.extend(
            colors
                .into_iter()
                .map(|(name, color, text)| (name.to_string(), LineColor::new(color, text))),
        );
        self
    }

    /// Palette entry for a route, looked up by short name first.
    pub fn line_color(&self, short_name: &str, long_name: &str) -> Option<&LineColor> {
        self.line_colors
            .get(short_name)
            .or_else(|| self.line_colors.get(long_name))
    }

    pub fn operator(&self) -> Operator {
        Operator {
            id: self.id.clone(),
            name: self.name.clone(),
            agency: self.agency.clone(),
            mode: self.mode,
            color: self.color.clone(),
            enabled: self.enabled,
        }
    }
}

/// The read-only table of operator configurations the pipeline is given.
#[derive(Debug, Clone)]
pub struct Registry {
    operators: Vec<OperatorConfig>,
}

impl Default for Registry {
    /// The New York area systems.
    fn default() -> Self {
        Self::new(builtin::operators())
    }
}

impl Registry {
    pub fn new(operators: Vec<OperatorConfig>) -> Self {
        Self { operators }
    }

    /// Reads a JSON array of operator configurations.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, self::Error> {
        let file = File::open(path)?;
        let operators: Vec<OperatorConfig> = serde_json::from_reader(BufReader::new(file))?;
        Ok(Self::new(operators))
    }

    pub fn get(&self, id: &str) -> Result<&OperatorConfig, self::Error> {
        self.operators
            .iter()
            .find(|operator| operator.id == id)
            .ok_or_else(|| self::Error::UnknownOperator(id.to_string()))
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.operators.iter().map(|operator| operator.id.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &OperatorConfig> {
        self.operators.iter()
    }
}

#[test]
fn unknown_operator_is_an_error() {
    let registry = Registry::default();
    assert!(registry.get("subway").is_ok());
    assert!(matches!(
        registry.get("monorail"),
        Err(Error::UnknownOperator(id)) if id == "monorail"
    ));
}

#[test]
fn line_color_prefers_short_name() {
    let config = OperatorConfig::new("x", "X", "X", Mode::Rail, "#000000").with_line_colors([
        ("A", "#111111", "#FFFFFF"),
        ("Main Line", "#222222", "#000000"),
    ]);
    assert_eq!(config.line_color("A", "Main Line").unwrap().color, "#111111");
    assert_eq!(config.line_color("B", "Main Line").unwrap().color, "#222222");
    assert!(config.line_color("B", "").is_none());
}
