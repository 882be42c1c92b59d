use bookcase::{types, BookCatalog, Record, SearchField, SortDirection, StoreHandle};

use anyhow::Result;

use std::cell::RefCell;
use std::collections::HashMap;

/// An in-memory stand-in for a database driver, recording every statement
/// the catalog issues and answering queries with canned rows.
#[derive(Default)]
struct RecordingHandle {
    rows: Vec<Record>,
    log: RefCell<Vec<(String, Vec<types::Value>)>>,
}

impl RecordingHandle {
    fn with_rows(rows: Vec<Record>) -> Self {
        Self {
            rows,
            log: RefCell::new(Vec::new()),
        }
    }

    fn statements(&self) -> Vec<String> {
        self.log.borrow().iter().map(|(sql, _)| sql.clone()).collect()
    }
}

impl StoreHandle for RecordingHandle {
    fn execute(&self, sql: &str, params: &[types::Value]) -> Result<usize> {
        self.log
            .borrow_mut()
            .push((sql.to_string(), params.to_vec()));
        Ok(1)
    }

    fn fetch_all(&self, sql: &str, params: &[types::Value]) -> Result<Vec<Record>> {
        self.log
            .borrow_mut()
            .push((sql.to_string(), params.to_vec()));
        Ok(self.rows.clone())
    }

    fn fetch_one(&self, sql: &str, params: &[types::Value]) -> Result<Option<Record>> {
        self.log
            .borrow_mut()
            .push((sql.to_string(), params.to_vec()));
        Ok(self.rows.first().cloned())
    }
}

fn canned_book() -> Record {
    HashMap::from([
        ("id".to_string(), types::Value::Integer(1)),
        (
            "title".to_string(),
            types::Value::Text("The Hobbit".to_string()),
        ),
        (
            "author".to_string(),
            types::Value::Text("J.R.R. Tolkien".to_string()),
        ),
        ("published_year".to_string(), types::Value::Integer(1937)),
        ("genre".to_string(), types::Value::Text("Fantasy".to_string())),
        ("price".to_string(), types::Value::Real(12.5)),
        ("available".to_string(), types::Value::Integer(1)),
    ])
}

#[test]
fn test_catalog_runs_against_any_handle() -> Result<()> {
    let handle = RecordingHandle::with_rows(vec![canned_book()]);
    let catalog = BookCatalog::new();

    let books = catalog.list_all(&handle)?;
    assert_eq!(books.len(), 1);
    assert_eq!(books[0].title.as_deref(), Some("The Hobbit"));
    assert_eq!(books[0].available, Some(true));

    Ok(())
}

#[test]
fn test_search_binds_the_pattern() -> Result<()> {
    let handle = RecordingHandle::with_rows(vec![canned_book()]);
    let catalog = BookCatalog::new();

    catalog.search(&handle, SearchField::Author, "Tolkien")?;

    let log = handle.log.borrow();
    assert_eq!(log.len(), 1);
    let (sql, params) = &log[0];
    // the pattern travels as a bound parameter, never inside statement text
    assert!(!sql.contains("Tolkien"));
    assert!(sql.contains("author like '%'||?||'%'"));
    assert_eq!(params, &vec![types::Value::Text("Tolkien".to_string())]);

    Ok(())
}

#[test]
fn test_each_operation_issues_exactly_one_statement() -> Result<()> {
    let handle = RecordingHandle::with_rows(vec![canned_book()]);
    let catalog = BookCatalog::new();

    catalog.ensure_schema(&handle)?;
    catalog.update_price(&handle, 1, 9.99)?;
    catalog.update_availability(&handle, 1, false)?;
    catalog.delete(&handle, 1)?;
    catalog.list_sorted_by_year(&handle, SortDirection::Descending)?;

    let statements = handle.statements();
    assert_eq!(statements.len(), 5);
    assert!(statements[0].starts_with("CREATE TABLE IF NOT EXISTS books"));
    assert_eq!(statements[1], "UPDATE books SET price = ? WHERE id = ?");
    assert_eq!(statements[2], "UPDATE books SET available = ? WHERE id = ?");
    assert_eq!(statements[3], "DELETE FROM books WHERE id = ?");
    assert_eq!(
        statements[4],
        "SELECT * FROM books ORDER BY published_year DESC"
    );

    Ok(())
}

#[test]
fn test_rejected_input_never_reaches_the_handle() {
    let handle = RecordingHandle::default();

    // the closed-set parse is the gate, so no statement can be built from a
    // bad search field or sort direction
    assert!("publisher".parse::<SearchField>().is_err());
    assert!("random".parse::<SortDirection>().is_err());
    assert!(handle.statements().is_empty());
}
