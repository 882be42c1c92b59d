use anyhow::Result;
use rusqlite::{params_from_iter, types, Connection};

use std::collections::HashMap;

use crate::convert::row_to_map;

/// One row as returned by the execution handle, keyed by column name
pub type Record = HashMap<String, types::Value>;

///
/// The execution handle through which every statement reaches the store.
///
/// The catalog never opens, closes, or pools anything behind this trait; the
/// caller owns the handle's lifecycle and transaction policy. All values
/// travel as bound parameters. Besides [rusqlite::Connection], any in-memory
/// fake can implement this to exercise the catalog without a database driver.
pub trait StoreHandle {
    /// Run a statement that returns no rows, yielding the affected row count
    fn execute(&self, sql: &str, params: &[types::Value]) -> Result<usize>;

    /// Run a query and collect every resulting row
    fn fetch_all(&self, sql: &str, params: &[types::Value]) -> Result<Vec<Record>>;

    /// Run a query and take the first resulting row, if any
    fn fetch_one(&self, sql: &str, params: &[types::Value]) -> Result<Option<Record>>;
}

impl StoreHandle for Connection {
    fn execute(&self, sql: &str, params: &[types::Value]) -> Result<usize> {
        let mut stmt = self.prepare(sql)?;
        let affected = stmt.execute(params_from_iter(params.iter()))?;
        Ok(affected)
    }

    fn fetch_all(&self, sql: &str, params: &[types::Value]) -> Result<Vec<Record>> {
        let mut stmt = self.prepare(sql)?;
        let mut rows = stmt.query(params_from_iter(params.iter()))?;
        let mut result = Vec::new();
        while let Some(row) = rows.next()? {
            result.push(row_to_map(row)?);
        }
        Ok(result)
    }

    fn fetch_one(&self, sql: &str, params: &[types::Value]) -> Result<Option<Record>> {
        let mut stmt = self.prepare(sql)?;
        let mut rows = stmt.query(params_from_iter(params.iter()))?;
        match rows.next()? {
            Some(row) => Ok(Some(row_to_map(row)?)),
            None => Ok(None),
        }
    }
}
