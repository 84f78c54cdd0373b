// src/export/project.rs
//! Project users onto the requested columns

use crate::crypto::Cipher;
use crate::fields::{FieldSource, FieldSpec};
use crate::user::UserEntity;

/// Header plus one row per user, all the same width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportTable {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl ExportTable {
    pub fn width(&self) -> usize {
        self.header.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Header first, then the data rows.
    pub fn records(&self) -> impl Iterator<Item = &[String]> {
        std::iter::once(self.header.as_slice()).chain(self.rows.iter().map(Vec::as_slice))
    }
}

/// Build the export table. Missing attributes, missing metadata and values
/// that fail to decrypt all become empty cells.
pub fn project(users: &[UserEntity], fields: &[FieldSpec], cipher: &Cipher) -> ExportTable {
    let header = fields.iter().map(|f| f.name.clone()).collect();

    // route each column once, not once per user
    let sources: Vec<(FieldSource, bool)> =
        fields.iter().map(|f| (f.source(), f.encrypted)).collect();

    let rows = users
        .iter()
        .map(|user| {
            sources
                .iter()
                .map(|(source, encrypted)| project_cell(user, source, *encrypted, cipher))
                .collect()
        })
        .collect();

    ExportTable { header, rows }
}

fn project_cell(user: &UserEntity, source: &FieldSource, encrypted: bool, cipher: &Cipher) -> String {
    let value = resolve(user, source);
    if encrypted && !value.is_empty() {
        cipher.decrypt_or_empty(&value)
    } else {
        value
    }
}

fn resolve(user: &UserEntity, source: &FieldSource) -> String {
    match source {
        FieldSource::Schema(attr) => user.attribute(*attr),
        FieldSource::Meta(key) => user.meta(key).map(|v| v.to_cell()).unwrap_or_default(),
    }
}
