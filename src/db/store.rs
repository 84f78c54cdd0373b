// src/db/store.rs
//! SQLite-backed option store and user source
//!
//! Mirrors the host's layout: an `options` table for settings, and
//! `users` + `usermeta` for accounts and their metadata.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use chrono::NaiveDateTime;
use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, warn};

use crate::config::ConfigStore;
use crate::consts::REGISTERED_FORMAT;
use crate::db::conn::{open_db, open_in_memory};
use crate::error::Result;
use crate::user::{MetaValue, UserEntity, UserSource};

pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self {
            conn: open_db(path)?,
        })
    }

    pub fn in_memory() -> Result<Self> {
        Ok(Self {
            conn: open_in_memory()?,
        })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Insert or replace a user together with all of its metadata.
    pub fn insert_user(&mut self, user: &UserEntity) -> Result<()> {
        let tx = self.conn.transaction()?;
        tx.execute(
            r#"
            INSERT OR REPLACE INTO users (
                id, user_login, user_email, first_name,
                last_name, display_name, user_registered
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
            params![
                user.id as i64,
                user.user_login,
                user.user_email,
                user.first_name,
                user.last_name,
                user.display_name,
                user.user_registered
                    .map(|t| t.format(REGISTERED_FORMAT).to_string()),
            ],
        )?;
        tx.execute("DELETE FROM usermeta WHERE user_id = ?1", [user.id as i64])?;
        for (key, value) in &user.metadata {
            tx.execute(
                "INSERT INTO usermeta (user_id, meta_key, meta_value) VALUES (?1, ?2, ?3)",
                params![user.id as i64, key, value.to_json().to_string()],
            )?;
        }
        tx.commit()?;
        Ok(())
    }

    pub fn set_user_meta(&self, user_id: u64, key: &str, value: &MetaValue) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO usermeta (user_id, meta_key, meta_value) VALUES (?1, ?2, ?3)",
            params![user_id as i64, key, value.to_json().to_string()],
        )?;
        Ok(())
    }

    fn load_metadata(&self) -> Result<HashMap<u64, BTreeMap<String, MetaValue>>> {
        let mut stmt = self
            .conn
            .prepare("SELECT user_id, meta_key, meta_value FROM usermeta ORDER BY user_id, meta_key")?;

        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, i64>(0)?,    // user_id
                row.get::<_, String>(1)?, // meta_key
                row.get::<_, String>(2)?, // meta_value
            ))
        })?;

        let mut metadata: HashMap<u64, BTreeMap<String, MetaValue>> = HashMap::new();
        for row in rows {
            let (user_id, key, raw) = row?;
            metadata
                .entry(user_id as u64)
                .or_default()
                .insert(key, decode_meta_value(raw));
        }
        Ok(metadata)
    }
}

/// Stored values are JSON; anything else is taken as plain text.
fn decode_meta_value(raw: String) -> MetaValue {
    match serde_json::from_str::<serde_json::Value>(&raw) {
        Ok(value) => value.into(),
        Err(_) => {
            debug!("meta_value is not JSON, keeping raw text");
            MetaValue::Text(raw)
        }
    }
}

fn parse_registered(raw: Option<String>, user_id: i64) -> Option<NaiveDateTime> {
    let raw = raw?;
    match NaiveDateTime::parse_from_str(&raw, REGISTERED_FORMAT) {
        Ok(t) => Some(t),
        Err(err) => {
            warn!(user_id, value = %raw, error = %err, "unparseable user_registered");
            None
        }
    }
}

impl ConfigStore for SqliteStore {
    fn get_option(&self, name: &str) -> Result<Option<String>> {
        Ok(self
            .conn
            .query_row("SELECT value FROM options WHERE name = ?1", [name], |row| {
                row.get(0)
            })
            .optional()?)
    }

    fn set_option(&mut self, name: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO options (name, value) VALUES (?1, ?2)
             ON CONFLICT(name) DO UPDATE SET value = excluded.value",
            params![name, value],
        )?;
        Ok(())
    }
}

impl UserSource for SqliteStore {
    fn list_all_with_metadata(&self) -> Result<Vec<UserEntity>> {
        let mut metadata = self.load_metadata()?;

        let mut stmt = self.conn.prepare(
            r#"
            SELECT
                id,
                user_login,
                user_email,
                first_name,
                last_name,
                display_name,
                user_registered
            FROM users
            ORDER BY id
            "#,
        )?;

        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, Option<String>>(1)?,
                row.get::<_, Option<String>>(2)?,
                row.get::<_, Option<String>>(3)?,
                row.get::<_, Option<String>>(4)?,
                row.get::<_, Option<String>>(5)?,
                row.get::<_, Option<String>>(6)?,
            ))
        })?;

        let mut users = Vec::new();
        for row in rows {
            let (id, user_login, user_email, first_name, last_name, display_name, registered) =
                row?;
            users.push(UserEntity {
                id: id as u64,
                user_login,
                user_email,
                first_name,
                last_name,
                display_name,
                user_registered: parse_registered(registered, id),
                metadata: metadata.remove(&(id as u64)).unwrap_or_default(),
            });
        }

        debug!(users = users.len(), "loaded users with metadata");
        Ok(users)
    }
}
