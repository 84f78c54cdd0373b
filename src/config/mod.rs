// src/config/mod.rs
//! Configuration for user-csv-exporter
//!
//! Two layers: the export settings kept in the host's option store, and the
//! TOML file the command line tool reads at startup.

pub use app::{load, load_with_origin, parse, AppConfig, ConfigOrigin, Logging, Paths};
pub use settings::{
    activate, sanitize_textarea, save_settings, ConfigStore, ExportConfig, MemoryConfigStore,
};

mod app;
pub mod defaults;
mod settings;
