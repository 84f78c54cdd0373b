// src/db/conn.rs
use rusqlite::{Connection, Result};
use std::{fs, path::Path};

const SCHEMA: &str = r#"
    CREATE TABLE IF NOT EXISTS options (
        name  TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS users (
        id              INTEGER PRIMARY KEY,
        user_login      TEXT,
        user_email      TEXT,
        first_name      TEXT,
        last_name       TEXT,
        display_name    TEXT,
        user_registered TEXT
    );

    -- meta_value holds the JSON encoding of the value
    CREATE TABLE IF NOT EXISTS usermeta (
        user_id    INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
        meta_key   TEXT NOT NULL,
        meta_value TEXT NOT NULL,
        PRIMARY KEY (user_id, meta_key)
    );

    CREATE INDEX IF NOT EXISTS idx_usermeta_user_id ON usermeta(user_id);
"#;

/// Open (creating if needed) the database at `path` and make sure the
/// tables exist.
pub fn open_db<P: AsRef<Path>>(path: P) -> Result<Connection> {
    if let Some(parent) = path.as_ref().parent() {
        let _ = fs::create_dir_all(parent);
    }

    let conn = Connection::open(path)?;
    init_schema(&conn)?;
    Ok(conn)
}

pub fn open_in_memory() -> Result<Connection> {
    let conn = Connection::open_in_memory()?;
    init_schema(&conn)?;
    Ok(conn)
}

fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.execute_batch(SCHEMA)
}
