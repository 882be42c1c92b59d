use anyhow::{anyhow, Result};
use rusqlite::{types, Row};

use std::collections::HashMap;

use crate::store::Record;

/// Convert a rusqlite::[Row] to a column-name keyed [Record]
pub fn row_to_map(row: &Row) -> Result<Record> {
    let mut map = HashMap::new();
    for (i, column_name) in row.as_ref().column_names().iter().enumerate() {
        let value = row.get(i)?;
        map.insert(column_name.to_string(), value);
    }
    Ok(map)
}

/// Convert a [Record] to a serde_json::Value
/// So that it can be fed to any `T: DeserializeOwned`
pub fn val_to_json(map: &Record) -> Result<serde_json::Value> {
    let mut json_map = serde_json::Map::new();
    for (key, value) in map.iter() {
        let json_value = match value {
            types::Value::Null => serde_json::Value::Null,
            types::Value::Integer(int) => serde_json::Value::Number(serde_json::Number::from(*int)),
            types::Value::Real(float) => serde_json::Value::Number(
                serde_json::Number::from_f64(*float).ok_or(anyhow!("Invalid float"))?,
            ),
            types::Value::Text(text) => serde_json::Value::String(text.to_string()),
            types::Value::Blob(blob) => serde_json::Value::Array(
                blob.iter()
                    .map(|b| serde_json::Value::Number(serde_json::Number::from(*b)))
                    .collect(),
            ),
        };
        json_map.insert(key.to_string(), json_value);
    }
    Ok(serde_json::Value::Object(json_map))
}

///
/// Read an optional integer column out of a [Record]
/// # Arguments
/// * `record` - the record returned by the execution handle
/// * `key` - the column name
pub fn take_int(record: &Record, key: &str) -> Result<Option<i64>> {
    match record.get(key) {
        None | Some(types::Value::Null) => Ok(None),
        Some(types::Value::Integer(int)) => Ok(Some(*int)),
        Some(other) => Err(anyhow!(
            "Column '{}' requires an integer, but saw invalid value {:?}",
            key,
            other
        )),
    }
}

/// Integer cells are accepted as well, SQLite stores whole REALs either way
pub fn take_real(record: &Record, key: &str) -> Result<Option<f64>> {
    match record.get(key) {
        None | Some(types::Value::Null) => Ok(None),
        Some(types::Value::Real(float)) => Ok(Some(*float)),
        Some(types::Value::Integer(int)) => Ok(Some(*int as f64)),
        Some(other) => Err(anyhow!(
            "Column '{}' requires a number, but saw invalid value {:?}",
            key,
            other
        )),
    }
}

pub fn opt_text(val: &Option<String>) -> types::Value {
    match val {
        Some(text) => types::Value::Text(text.to_string()),
        None => types::Value::Null,
    }
}

pub fn opt_int(val: Option<i64>) -> types::Value {
    match val {
        Some(int) => types::Value::Integer(int),
        None => types::Value::Null,
    }
}

pub fn opt_real(val: Option<f64>) -> types::Value {
    match val {
        Some(float) => types::Value::Real(float),
        None => types::Value::Null,
    }
}

pub fn opt_bool(val: Option<bool>) -> types::Value {
    match val {
        Some(flag) => types::Value::Integer(flag as i64),
        None => types::Value::Null,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Record {
        HashMap::from([
            ("title".to_string(), types::Value::Text("Dune".to_string())),
            ("published_year".to_string(), types::Value::Integer(1965)),
            ("price".to_string(), types::Value::Real(9.99)),
            ("available".to_string(), types::Value::Integer(1)),
            ("genre".to_string(), types::Value::Null),
        ])
    }

    #[test]
    fn takes_typed_columns() -> Result<()> {
        let record = sample();
        assert_eq!(take_int(&record, "published_year")?, Some(1965));
        assert_eq!(take_real(&record, "price")?, Some(9.99));
        Ok(())
    }

    #[test]
    fn null_and_missing_columns_read_as_none() -> Result<()> {
        let record = sample();
        assert_eq!(take_real(&record, "genre")?, None);
        assert_eq!(take_int(&record, "no_such_column")?, None);
        Ok(())
    }

    #[test]
    fn mismatched_column_type_is_an_error() {
        let record = sample();
        assert!(take_int(&record, "title").is_err());
        assert!(take_real(&record, "title").is_err());
    }

    #[test]
    fn record_round_trips_to_json() -> Result<()> {
        let record = sample();
        let json = val_to_json(&record)?;
        assert_eq!(json["title"], serde_json::json!("Dune"));
        assert_eq!(json["available"], serde_json::json!(1));
        assert_eq!(json["genre"], serde_json::Value::Null);
        Ok(())
    }

    #[test]
    fn whole_reals_may_arrive_as_integers() -> Result<()> {
        let record = HashMap::from([("price".to_string(), types::Value::Integer(10))]);
        assert_eq!(take_real(&record, "price")?, Some(10.0));
        Ok(())
    }
}
