// src/db/mod.rs
//! SQLite stand-in for the host's option and user tables

pub mod conn;
pub mod store;

pub use conn::{open_db, open_in_memory};
pub use store::SqliteStore;
