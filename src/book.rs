use anyhow::{anyhow, Error, Result};
use rusqlite::types;
use serde::{Deserialize, Deserializer, Serialize};

use std::str::FromStr;

use crate::{
    convert::{self, val_to_json},
    store::Record,
};

///
/// One catalog entry, as stored in the books table.
///
/// Every column except the store-assigned `id` is nullable; absent values stay
/// `None` end to end. `id` is immutable once assigned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub id: i64,
    pub title: Option<String>,
    pub author: Option<String>,
    pub published_year: Option<i64>,
    pub genre: Option<String>,
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "flag_from_cell")]
    pub available: Option<bool>,
}

impl Book {
    ///
    /// Build a [Book] out of a [Record] returned by the execution handle
    /// # Arguments
    /// * `record` - the row, keyed by column name
    pub fn from_record(record: &Record) -> Result<Self> {
        let book = serde_json::from_value(val_to_json(record)?)?;
        Ok(book)
    }
}

/// SQLite hands the boolean column back as a 0/1 integer cell
fn flag_from_cell<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let cell = Option::<serde_json::Value>::deserialize(deserializer)?;
    match cell {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::Bool(flag)) => Ok(Some(flag)),
        Some(serde_json::Value::Number(num)) => Ok(Some(num.as_i64() != Some(0))),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected a 0/1 flag, saw {}",
            other
        ))),
    }
}

///
/// The insert payload for one book; the store assigns the id.
///
/// All fields are optional, matching the nullable columns. No uniqueness is
/// enforced on any of them.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NewBook {
    pub title: Option<String>,
    pub author: Option<String>,
    pub published_year: Option<i64>,
    pub genre: Option<String>,
    pub price: Option<f64>,
    pub available: Option<bool>,
}

impl NewBook {
    /// Bound parameters in insert column order
    pub(crate) fn to_params(&self) -> Vec<types::Value> {
        vec![
            convert::opt_text(&self.title),
            convert::opt_text(&self.author),
            convert::opt_int(self.published_year),
            convert::opt_text(&self.genre),
            convert::opt_real(self.price),
            convert::opt_bool(self.available),
        ]
    }
}

///
/// The searchable text columns, a closed set.
///
/// Parsing is the input gate: anything outside `author`/`genre` is rejected
/// before any statement is built, so only these fixed column names ever reach
/// statement text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchField {
    Author,
    Genre,
}

impl SearchField {
    pub fn column(&self) -> &'static str {
        match self {
            Self::Author => "author",
            Self::Genre => "genre",
        }
    }
}

impl FromStr for SearchField {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "author" => Ok(Self::Author),
            "genre" => Ok(Self::Genre),
            other => Err(anyhow!(
                "Invalid search field '{}', only 'author' or 'genre' can be searched",
                other
            )),
        }
    }
}

///
/// The sort order for year-sorted listings, a closed set.
///
/// The SQL keyword comes from this enum and never from caller text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub(crate) fn keyword(&self) -> &'static str {
        match self {
            Self::Ascending => "ASC",
            Self::Descending => "DESC",
        }
    }
}

impl FromStr for SortDirection {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "ascending" => Ok(Self::Ascending),
            "descending" => Ok(Self::Descending),
            other => Err(anyhow!(
                "Invalid sort direction '{}', only 'ascending' or 'descending' are accepted",
                other
            )),
        }
    }
}

///
/// Price aggregates across the whole table.
/// All three are `None` when the table is empty.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PriceStats {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub avg: Option<f64>,
}
