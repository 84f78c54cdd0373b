// src/config/defaults.rs
use crate::config::app::{Logging, Paths};

pub const CONFIG_PATH_ENV: &str = "UEX_CONFIG";
pub const DATABASE_PATH_ENV: &str = "UEX_DATABASE";

pub const DEFAULT_CONFIG_PATH: &str = "user-export.toml";
pub const DEFAULT_DATABASE_PATH: &str = "data/users.db";
pub const DEFAULT_OUTPUT_DIR: &str = ".";
pub const DEFAULT_LOG_FILTER: &str = "info";

pub fn default_paths() -> Paths {
    Paths {
        database: DEFAULT_DATABASE_PATH.into(),
        output_dir: default_output_dir(),
    }
}

pub fn default_output_dir() -> String {
    DEFAULT_OUTPUT_DIR.into()
}

pub fn default_logging() -> Logging {
    Logging {
        filter: DEFAULT_LOG_FILTER.into(),
    }
}
