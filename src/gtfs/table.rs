use csv::{ReaderBuilder, StringRecord, Trim};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use tracing::debug;

use crate::gtfs;

/// A decoded delimited-text table: a header row and its data rows.
///
/// Rows may carry more or fewer fields than the header. Missing trailing
/// fields read as absent and surplus fields are ignored.
#[derive(Debug, Clone, Default)]
pub struct Table {
    headers: StringRecord,
    columns: HashMap<String, usize>,
    rows: Vec<StringRecord>,
}

/// A single data row, addressable by column name.
#[derive(Debug, Clone, Copy)]
pub struct Record<'a> {
    table: &'a Table,
    row: &'a StringRecord,
}

impl Table {
    pub fn parse(text: &str) -> Result<Self, gtfs::Error> {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        let mut reader = ReaderBuilder::new()
            .flexible(true)
            .trim(Trim::All)
            .from_reader(text.as_bytes());

        let headers = reader.headers()?.clone();
        let mut columns: HashMap<String, usize> = HashMap::new();
        headers.iter().enumerate().for_each(|(i, name)| {
            columns.entry(name.to_string()).or_insert(i);
        });

        let mut rows = Vec::new();
        let mut skipped = 0usize;
        for result in reader.records() {
            match result {
                Ok(row) => rows.push(row),
                Err(_) => skipped += 1,
            }
        }
        if skipped > 0 {
            debug!("Skipped {skipped} unreadable rows");
        }

        Ok(Self {
            headers,
            columns,
            rows,
        })
    }

    pub fn headers(&self) -> impl Iterator<Item = &str> {
        self.headers.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn records(&self) -> impl Iterator<Item = Record<'_>> {
        self.rows.iter().map(|row| Record { table: self, row })
    }

    /// Deserializes every row into `T`, silently dropping rows that do not
    /// fit (typically a missing required identifier).
    pub fn deserialize<T: DeserializeOwned>(&self) -> Vec<T> {
        let mut dropped = 0usize;
        let values: Vec<T> = self
            .records()
            .filter_map(|record| match record.deserialize() {
                Ok(value) => Some(value),
                Err(_) => {
                    dropped += 1;
                    None
                }
            })
            .collect();
        if dropped > 0 {
            debug!("Dropped {dropped} malformed rows");
        }
        values
    }
}

impl<'a> Record<'a> {
    /// Value of column `name`, `None` when the column is unknown, the row is
    /// too short or the value is empty.
    pub fn get(&self, name: &str) -> Option<&'a str> {
        let index = *self.table.columns.get(name)?;
        self.row.get(index).filter(|value| !value.is_empty())
    }

    pub fn len(&self) -> usize {
        self.row.len()
    }

    pub fn is_empty(&self) -> bool {
        self.row.is_empty()
    }

    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T, gtfs::Error> {
        Ok(self.row.deserialize(Some(&self.table.headers))?)
    }
}
