use anyhow::Result;
use rusqlite::types;

use crate::{
    book::{Book, NewBook, PriceStats, SearchField, SortDirection},
    convert::{take_int, take_real},
    store::{Record, StoreHandle},
    verify::verify_table_name,
};

///
/// Create the books table if it does not exist yet; a no-op otherwise.
///
/// Existing data is never touched. The boolean column is stored as a 0/1
/// integer, the SQLite way.
/// # Arguments
/// * `conn` - the execution handle to the store
/// * `table_name` - the name of the table
pub fn ensure_schema(conn: &impl StoreHandle, table_name: &str) -> Result<()> {
    verify_table_name(table_name)?;
    let sql = format!(
        "CREATE TABLE IF NOT EXISTS {} (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT,
            author TEXT,
            published_year INTEGER,
            genre TEXT,
            price REAL,
            available INTEGER
        )",
        table_name
    );
    conn.execute(&sql, &[])?;
    Ok(())
}

///
/// Append one book; the store assigns the id.
///
/// No uniqueness is checked on any field but the id, duplicates are the
/// store's business.
/// # Arguments
/// * `conn` - the execution handle to the store
/// * `table_name` - the name of the table
/// * `book` - the insert payload
pub fn insert(conn: &impl StoreHandle, table_name: &str, book: &NewBook) -> Result<()> {
    verify_table_name(table_name)?;
    let sql = format!(
        "INSERT INTO {} (title, author, published_year, genre, price, available)
         VALUES (?, ?, ?, ?, ?, ?)",
        table_name
    );
    conn.execute(&sql, &book.to_params())?;
    Ok(())
}

///
/// Fetch every book in storage order
/// # Arguments
/// * `conn` - the execution handle to the store
/// * `table_name` - the name of the table
pub fn list_all(conn: &impl StoreHandle, table_name: &str) -> Result<Vec<Book>> {
    verify_table_name(table_name)?;
    let sql = format!("SELECT * FROM {}", table_name);
    let rows = conn.fetch_all(&sql, &[])?;
    rows_to_books(&rows)
}

///
/// Fetch one book by id, `None` if the id is absent
/// # Arguments
/// * `conn` - the execution handle to the store
/// * `table_name` - the name of the table
/// * `id` - the primary key value
pub fn find_by_id(conn: &impl StoreHandle, table_name: &str, id: i64) -> Result<Option<Book>> {
    verify_table_name(table_name)?;
    let sql = format!("SELECT * FROM {} WHERE id = ?", table_name);
    let row = conn.fetch_one(&sql, &[types::Value::Integer(id)])?;
    match row {
        Some(row) => Ok(Some(Book::from_record(&row)?)),
        None => Ok(None),
    }
}

///
/// Fetch the books whose author or genre contains the pattern,
/// case-insensitively. The searched column is fixed by [SearchField]; the
/// pattern itself is always a bound parameter.
/// # Arguments
/// * `conn` - the execution handle to the store
/// * `table_name` - the name of the table
/// * `field` - which text column to search
/// * `pattern` - the substring to look for
pub fn search(
    conn: &impl StoreHandle,
    table_name: &str,
    field: SearchField,
    pattern: &str,
) -> Result<Vec<Book>> {
    verify_table_name(table_name)?;
    let sql = format!(
        "SELECT * FROM {} WHERE {} like '%'||?||'%'",
        table_name,
        field.column()
    );
    let rows = conn.fetch_all(&sql, &[types::Value::Text(pattern.to_string())])?;
    rows_to_books(&rows)
}

///
/// Set the price of the book with the given id.
/// Silently a no-op when the id is absent.
/// # Arguments
/// * `conn` - the execution handle to the store
/// * `table_name` - the name of the table
/// * `id` - the primary key value
/// * `new_price` - the replacement price
pub fn update_price(
    conn: &impl StoreHandle,
    table_name: &str,
    id: i64,
    new_price: f64,
) -> Result<()> {
    verify_table_name(table_name)?;
    let sql = format!("UPDATE {} SET price = ? WHERE id = ?", table_name);
    conn.execute(
        &sql,
        &[types::Value::Real(new_price), types::Value::Integer(id)],
    )?;
    Ok(())
}

///
/// Set the availability flag of the book with the given id.
/// Silently a no-op when the id is absent.
/// # Arguments
/// * `conn` - the execution handle to the store
/// * `table_name` - the name of the table
/// * `id` - the primary key value
/// * `available` - the replacement flag, stored as 0/1
pub fn update_availability(
    conn: &impl StoreHandle,
    table_name: &str,
    id: i64,
    available: bool,
) -> Result<()> {
    verify_table_name(table_name)?;
    let sql = format!("UPDATE {} SET available = ? WHERE id = ?", table_name);
    conn.execute(
        &sql,
        &[
            types::Value::Integer(available as i64),
            types::Value::Integer(id),
        ],
    )?;
    Ok(())
}

///
/// Remove the book with the given id.
/// Silently a no-op when the id is absent.
/// # Arguments
/// * `conn` - the execution handle to the store
/// * `table_name` - the name of the table
/// * `id` - the primary key value
pub fn delete(conn: &impl StoreHandle, table_name: &str, id: i64) -> Result<()> {
    verify_table_name(table_name)?;
    let sql = format!("DELETE FROM {} WHERE id = ?", table_name);
    conn.execute(&sql, &[types::Value::Integer(id)])?;
    Ok(())
}

///
/// Fetch every book ordered by published year; ties keep storage order.
/// The ORDER BY keyword comes from [SortDirection], never from caller text.
/// # Arguments
/// * `conn` - the execution handle to the store
/// * `table_name` - the name of the table
/// * `direction` - ascending or descending
pub fn list_sorted_by_year(
    conn: &impl StoreHandle,
    table_name: &str,
    direction: SortDirection,
) -> Result<Vec<Book>> {
    verify_table_name(table_name)?;
    let sql = format!(
        "SELECT * FROM {} ORDER BY published_year {}",
        table_name,
        direction.keyword()
    );
    let rows = conn.fetch_all(&sql, &[])?;
    rows_to_books(&rows)
}

///
/// Count all books in the table
/// # Arguments
/// * `conn` - the execution handle to the store
/// * `table_name` - the name of the table
pub fn count(conn: &impl StoreHandle, table_name: &str) -> Result<i64> {
    verify_table_name(table_name)?;
    let sql = format!("SELECT COUNT(*) AS total FROM {}", table_name);
    let row = conn.fetch_one(&sql, &[])?;
    let total = match row {
        Some(row) => take_int(&row, "total")?.unwrap_or(0),
        None => 0,
    };
    Ok(total)
}

///
/// Aggregate the minimum, maximum and average price across all books.
/// On an empty table all three come back `None`.
/// # Arguments
/// * `conn` - the execution handle to the store
/// * `table_name` - the name of the table
pub fn price_statistics(conn: &impl StoreHandle, table_name: &str) -> Result<PriceStats> {
    verify_table_name(table_name)?;
    let sql = format!(
        "SELECT MIN(price) AS min_price, MAX(price) AS max_price, AVG(price) AS avg_price FROM {}",
        table_name
    );
    let row = conn.fetch_one(&sql, &[])?;
    let stats = match row {
        Some(row) => PriceStats {
            min: take_real(&row, "min_price")?,
            max: take_real(&row, "max_price")?,
            avg: take_real(&row, "avg_price")?,
        },
        None => PriceStats::default(),
    };
    Ok(stats)
}

fn rows_to_books(rows: &[Record]) -> Result<Vec<Book>> {
    let mut books = Vec::new();
    for row in rows {
        books.push(Book::from_record(row)?);
    }
    Ok(books)
}
