// src/config/app.rs
use super::defaults::*;
use serde::Deserialize;
use tracing::warn;

use crate::error::Result;

/// Settings for the command line front end, read from TOML.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_paths")]
    pub paths: Paths,
    #[serde(default = "default_logging")]
    pub logging: Logging,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Paths {
    pub database: String,
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Logging {
    pub filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            paths: default_paths(),
            logging: default_logging(),
        }
    }
}

/// Where the loaded config came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigOrigin {
    File(String),
    /// The named file did not exist.
    Defaults(String),
}

impl ConfigOrigin {
    /// Log the fallback to defaults. Call once a subscriber is installed.
    pub fn report(&self) {
        if let ConfigOrigin::Defaults(path) = self {
            warn!(path = %path, "config file not found, using built-in defaults");
        }
    }
}

/// Load the config file named by `UEX_CONFIG`, falling back to defaults when
/// it does not exist. `UEX_DATABASE` overrides the database path.
pub fn load() -> Result<AppConfig> {
    let (conf, origin) = load_with_origin()?;
    origin.report();
    Ok(conf)
}

/// Like [`load`], but leaves reporting the fallback to the caller, for use
/// before logging is set up.
pub fn load_with_origin() -> Result<(AppConfig, ConfigOrigin)> {
    let config_path =
        std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

    let (mut conf, origin) = if std::path::Path::new(&config_path).exists() {
        let content = std::fs::read_to_string(&config_path)?;
        (parse(&content)?, ConfigOrigin::File(config_path))
    } else {
        (AppConfig::default(), ConfigOrigin::Defaults(config_path))
    };

    if let Ok(database) = std::env::var(DATABASE_PATH_ENV) {
        conf.paths.database = database;
    }

    Ok((conf, origin))
}

pub fn parse(content: &str) -> Result<AppConfig> {
    Ok(toml::from_str(content)?)
}
