// src/fields.rs
//! Field specification parsing
//!
//! The field list is newline-delimited text, one column per line. A leading
//! `*` marks a field whose stored value is encrypted.

use crate::consts::{DEFAULT_FIELDS, ENCRYPTED_SENTINEL};
use crate::user::SchemaAttribute;

/// One export column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: String,
    pub encrypted: bool,
}

/// Where a field's value comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldSource {
    Schema(SchemaAttribute),
    Meta(String),
}

impl FieldSpec {
    pub fn plain(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            encrypted: false,
        }
    }

    pub fn encrypted(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            encrypted: true,
        }
    }

    /// Schema attributes win; every other name is a metadata key.
    pub fn source(&self) -> FieldSource {
        match SchemaAttribute::from_name(&self.name) {
            Some(attr) => FieldSource::Schema(attr),
            None => FieldSource::Meta(self.name.clone()),
        }
    }
}

/// Parse raw field text into ordered field specs.
///
/// Blank lines are skipped, names are not validated and duplicates are kept.
pub fn parse_field_spec(raw: &str) -> Vec<FieldSpec> {
    raw.split('\n').filter_map(parse_line).collect()
}

fn parse_line(line: &str) -> Option<FieldSpec> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let spec = match line.strip_prefix(ENCRYPTED_SENTINEL) {
        Some(rest) => FieldSpec::encrypted(rest.trim()),
        None => FieldSpec::plain(line),
    };

    // a bare `*` names nothing
    (!spec.name.is_empty()).then_some(spec)
}

/// Render specs back to field text, one per line.
pub fn join_field_spec(fields: &[FieldSpec]) -> String {
    fields
        .iter()
        .map(|f| {
            if f.encrypted {
                format!("{ENCRYPTED_SENTINEL}{}", f.name)
            } else {
                f.name.clone()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// The stored field text, or the default list when it holds nothing but
/// whitespace.
pub fn field_spec_text_or_default(stored: &str) -> &str {
    if stored.trim().is_empty() {
        DEFAULT_FIELDS
    } else {
        stored
    }
}
