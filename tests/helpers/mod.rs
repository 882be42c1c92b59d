use bookcase::BookCatalog;
use rusqlite::Connection;

fn insert_books(conn: &Connection) -> anyhow::Result<()> {
    conn.execute(
        "INSERT INTO books (id, title, author, published_year, genre, price, available)
         VALUES (1, 'The Hobbit', 'J.R.R. Tolkien', 1937, 'Fantasy', 12.5, 1)",
        [],
    )?;

    conn.execute(
        "INSERT INTO books (id, title, author, published_year, genre, price, available)
         VALUES (2, 'The Fellowship of the Ring', 'J.R.R. Tolkien', 1954, 'Fantasy', 15.0, 1)",
        [],
    )?;

    conn.execute(
        "INSERT INTO books (id, title, author, published_year, genre, price, available)
         VALUES (3, 'Dune', 'Frank Herbert', 1965, 'Science Fiction', 9.99, 0)",
        [],
    )?;

    conn.execute(
        "INSERT INTO books (id, title, author, published_year, genre, price, available)
         VALUES (4, 'Pride and Prejudice', 'Jane Austen', 1813, 'Romance', 7.25, 1)",
        [],
    )?;

    conn.execute(
        "INSERT INTO books (id, title, author, published_year, genre, price, available)
         VALUES (5, 'Neuromancer', 'William Gibson', 1984, 'Science Fiction', 11.0, 0)",
        [],
    )?;

    Ok(())
}

pub fn initialize_db(conn: &Connection) -> anyhow::Result<()> {
    BookCatalog::new().ensure_schema(conn)?;
    insert_books(conn)?;
    Ok(())
}
