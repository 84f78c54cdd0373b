// src/export/run.rs
use chrono::{Local, NaiveDate};
use tracing::info;

use crate::config::ExportConfig;
use crate::consts::{CSV_CONTENT_TYPE, EXPORT_FILENAME_PREFIX};
use crate::crypto::Cipher;
use crate::error::{ExportError, Result};
use crate::export::csv::to_csv_bytes;
use crate::export::project::project;
use crate::fields::parse_field_spec;
use crate::user::UserSource;

/// A finished export, ready to hand to the HTTP layer or write to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub bytes: Vec<u8>,
    pub filename: String,
}

impl ExportFile {
    pub fn content_type(&self) -> &'static str {
        CSV_CONTENT_TYPE
    }

    pub fn content_disposition(&self) -> String {
        format!("attachment; filename={}", self.filename)
    }
}

/// `bf-users-export-YYYY-MM-DD.csv`
pub fn export_filename(date: NaiveDate) -> String {
    format!("{EXPORT_FILENAME_PREFIX}{}.csv", date.format("%Y-%m-%d"))
}

/// Run a full export, dated with today's local date.
pub fn run_export<U: UserSource + ?Sized>(config: &ExportConfig, users: &U) -> Result<ExportFile> {
    run_export_on(config, users, Local::now().date_naive())
}

pub fn run_export_on<U: UserSource + ?Sized>(
    config: &ExportConfig,
    users: &U,
    date: NaiveDate,
) -> Result<ExportFile> {
    let fields = parse_field_spec(&config.field_spec_text);
    if fields.is_empty() {
        return Err(ExportError::NoFields);
    }

    let users = users.list_all_with_metadata()?;
    if users.is_empty() {
        return Err(ExportError::NoUsers);
    }

    let cipher = Cipher::new(&config.crypt_key);
    let table = project(&users, &fields, &cipher);
    if table.is_empty() {
        return Err(ExportError::NoData);
    }

    let bytes = to_csv_bytes(&table)?;
    info!(
        users = users.len(),
        fields = fields.len(),
        rows = table.rows.len(),
        bytes = bytes.len(),
        "user export complete"
    );

    Ok(ExportFile {
        bytes,
        filename: export_filename(date),
    })
}
