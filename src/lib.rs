pub mod book;
pub mod catalog;
mod convert;
pub mod store;
mod verify;

pub use book::{Book, NewBook, PriceStats, SearchField, SortDirection};
pub use store::{Record, StoreHandle};

pub use rusqlite::{types, Connection};
pub use serde;
pub use serde_json;

use anyhow::Result;

pub const DEFAULT_TABLE_NAME: &str = "books";

///
/// The BookCatalog is a configured view over one books table.
///
/// It holds nothing but the table name; every operation borrows a
/// caller-owned [StoreHandle], issues exactly one statement against it and
/// returns. Connection lifecycle, transactions and retries all stay with the
/// caller.
#[derive(Debug, Clone)]
pub struct BookCatalog {
    table_name: String,
}

impl Default for BookCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl BookCatalog {
    /// A catalog over the default `books` table
    pub fn new() -> Self {
        Self {
            table_name: DEFAULT_TABLE_NAME.to_string(),
        }
    }

    ///
    /// A catalog over a custom table. The name is validated here, once, since
    /// it is the one configured string that ends up inside statement text.
    /// # Arguments
    /// * `table_name` - the name of the table, a plain identifier
    pub fn with_table(table_name: &str) -> Result<Self> {
        verify::verify_table_name(table_name)?;
        Ok(Self {
            table_name: table_name.to_string(),
        })
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    ///
    /// Create the table if absent; a no-op otherwise.
    /// See also [`catalog::ensure_schema`]
    pub fn ensure_schema(&self, conn: &impl StoreHandle) -> Result<()> {
        catalog::ensure_schema(conn, &self.table_name)
    }

    ///
    /// Append one book, the store assigns the id.
    /// See also [`catalog::insert`]
    pub fn insert(&self, conn: &impl StoreHandle, book: &NewBook) -> Result<()> {
        catalog::insert(conn, &self.table_name, book)
    }

    ///
    /// Every book in storage order.
    /// See also [`catalog::list_all`]
    pub fn list_all(&self, conn: &impl StoreHandle) -> Result<Vec<Book>> {
        catalog::list_all(conn, &self.table_name)
    }

    ///
    /// One book by id, `None` when absent.
    /// See also [`catalog::find_by_id`]
    pub fn find_by_id(&self, conn: &impl StoreHandle, id: i64) -> Result<Option<Book>> {
        catalog::find_by_id(conn, &self.table_name, id)
    }

    ///
    /// Case-insensitive substring search on author or genre.
    /// See also [`catalog::search`]
    pub fn search(
        &self,
        conn: &impl StoreHandle,
        field: SearchField,
        pattern: &str,
    ) -> Result<Vec<Book>> {
        catalog::search(conn, &self.table_name, field, pattern)
    }

    ///
    /// Set one book's price; a silent no-op on an absent id.
    /// See also [`catalog::update_price`]
    pub fn update_price(&self, conn: &impl StoreHandle, id: i64, new_price: f64) -> Result<()> {
        catalog::update_price(conn, &self.table_name, id, new_price)
    }

    ///
    /// Set one book's availability flag; a silent no-op on an absent id.
    /// See also [`catalog::update_availability`]
    pub fn update_availability(
        &self,
        conn: &impl StoreHandle,
        id: i64,
        available: bool,
    ) -> Result<()> {
        catalog::update_availability(conn, &self.table_name, id, available)
    }

    ///
    /// Remove one book; a silent no-op on an absent id.
    /// See also [`catalog::delete`]
    pub fn delete(&self, conn: &impl StoreHandle, id: i64) -> Result<()> {
        catalog::delete(conn, &self.table_name, id)
    }

    ///
    /// Every book ordered by published year.
    /// See also [`catalog::list_sorted_by_year`]
    pub fn list_sorted_by_year(
        &self,
        conn: &impl StoreHandle,
        direction: SortDirection,
    ) -> Result<Vec<Book>> {
        catalog::list_sorted_by_year(conn, &self.table_name, direction)
    }

    ///
    /// Total number of books.
    /// See also [`catalog::count`]
    pub fn count(&self, conn: &impl StoreHandle) -> Result<i64> {
        catalog::count(conn, &self.table_name)
    }

    ///
    /// Min, max and average price; all `None` on an empty table.
    /// See also [`catalog::price_statistics`]
    pub fn price_statistics(&self, conn: &impl StoreHandle) -> Result<PriceStats> {
        catalog::price_statistics(conn, &self.table_name)
    }
}
