// src/bin/user_export.rs
//! Command line front end: manage export settings and write CSV exports
//!
//! Usage:
//!   user-export activate
//!   user-export save-config --fields @fields.txt --key secret
//!   user-export export --out-dir exports/

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use user_csv_exporter::config::{self, AppConfig};
use user_csv_exporter::{activate, run_export, save_settings, Cipher, ExportConfig, SqliteStore};

#[derive(Parser, Debug)]
#[command(name = "user-export")]
#[command(about = "Export users and their metadata to CSV")]
struct Args {
    /// Database path (overrides the config file)
    #[arg(long)]
    database: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Seed the default field list if none is stored yet
    Activate,
    /// Print the stored export settings
    ShowConfig,
    /// Store the field list and encryption key
    SaveConfig {
        /// Field list, one per line; `@path` reads it from a file
        #[arg(long)]
        fields: String,
        #[arg(long, default_value = "")]
        key: String,
    },
    /// Write the CSV export
    Export {
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
    /// Encrypt a value with the stored key, for storing as user metadata
    Encrypt { value: String },
    /// Decrypt a stored value with the stored key
    Decrypt { value: String },
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    let (app, origin) =
        config::load_with_origin().context("Failed to load user-export config")?;
    init_logging(&app);
    origin.report();

    let database = args
        .database
        .unwrap_or_else(|| PathBuf::from(&app.paths.database));
    let mut store = SqliteStore::open(&database)
        .with_context(|| format!("Failed to open database {}", database.display()))?;

    match args.command {
        Command::Activate => {
            if activate(&mut store)? {
                info!("Default export fields stored");
            } else {
                info!("Export fields already configured, nothing to do");
            }
        }
        Command::ShowConfig => {
            let settings = ExportConfig::load(&mut store)?;
            println!("{}", settings.field_spec_text);
            if settings.crypt_key.is_empty() {
                warn!("No encryption key set, encrypted fields use the empty key");
            }
        }
        Command::SaveConfig { fields, key } => {
            let text = match fields.strip_prefix('@') {
                Some(path) => std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read field list {path}"))?,
                None => fields,
            };
            let notice = save_settings(&mut store, &text, &key)?;
            println!("{notice}");
        }
        Command::Export { out_dir } => {
            let settings = ExportConfig::load(&mut store)?;
            let file = match run_export(&settings, &store) {
                Ok(file) => file,
                Err(err) if err.is_user_error() => {
                    eprintln!("{}", err.notice());
                    return Ok(ExitCode::FAILURE);
                }
                Err(err) => return Err(err).context("Export failed"),
            };

            let dir = out_dir.unwrap_or_else(|| PathBuf::from(&app.paths.output_dir));
            std::fs::create_dir_all(&dir)?;
            let path = dir.join(&file.filename);
            std::fs::write(&path, &file.bytes)
                .with_context(|| format!("Failed to write {}", path.display()))?;

            println!("Exported {} bytes → {}", file.bytes.len(), path.display());
            println!("SECURITY: decrypted fields are in cleartext, handle this file with care");
        }
        Command::Encrypt { value } => {
            let settings = ExportConfig::load(&mut store)?;
            println!("{}", Cipher::new(&settings.crypt_key).encrypt(&value));
        }
        Command::Decrypt { value } => {
            let settings = ExportConfig::load(&mut store)?;
            let plaintext = Cipher::new(&settings.crypt_key)
                .decrypt(&value)
                .context("Value did not decrypt with the stored key")?;
            println!("{plaintext}");
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn init_logging(app: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&app.logging.filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .with_writer(std::io::stderr)
        .init();
}
