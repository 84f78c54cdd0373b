// src/lib.rs
//! user-csv-exporter: export user records and metadata to CSV
//!
//! Features:
//! - Newline-delimited field lists, `*` marks encrypted fields
//! - Schema attributes first, per-user metadata as fallback
//! - AES-128-ECB decryption compatible with previously stored values
//! - UTF-8 CSV with byte-order mark for spreadsheet tools

pub mod aliases;
pub mod config;
pub mod consts;
pub mod crypto;
pub mod db;
pub mod error;
pub mod export;
pub mod fields;
pub mod user;

// Re-export everything users need at the crate root
pub use config::{activate, save_settings, ConfigStore, ExportConfig, MemoryConfigStore};
pub use crypto::Cipher;
pub use db::SqliteStore;
pub use error::{AdminNotice, CryptError, ExportError, NoticeLevel, Result};
pub use export::{project, run_export, run_export_on, write_csv, ExportFile, ExportTable};
pub use fields::{join_field_spec, parse_field_spec, FieldSource, FieldSpec};
pub use user::{MemoryUserSource, MetaValue, SchemaAttribute, UserEntity, UserSource};
