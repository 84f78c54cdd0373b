// src/config/settings.rs
//! Export settings on top of a key-value option store

use std::collections::HashMap;

use tracing::{debug, info};

use crate::consts::{DEFAULT_CRYPT_KEY, DEFAULT_FIELDS, OPTION_CRYPT_KEY, OPTION_FIELDS};
use crate::error::{AdminNotice, Result};
use crate::fields::field_spec_text_or_default;

/// Persistence for named string options, as the host provides it.
pub trait ConfigStore {
    fn get_option(&self, name: &str) -> Result<Option<String>>;
    fn set_option(&mut self, name: &str, value: &str) -> Result<()>;
}

/// Options kept in a map; nothing survives the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryConfigStore {
    options: HashMap<String, String>,
}

impl MemoryConfigStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ConfigStore for MemoryConfigStore {
    fn get_option(&self, name: &str) -> Result<Option<String>> {
        Ok(self.options.get(name).cloned())
    }

    fn set_option(&mut self, name: &str, value: &str) -> Result<()> {
        self.options.insert(name.to_owned(), value.to_owned());
        Ok(())
    }
}

/// The two settings an export reads.
#[derive(Clone, PartialEq, Eq)]
pub struct ExportConfig {
    pub field_spec_text: String,
    pub crypt_key: String,
}

impl std::fmt::Debug for ExportConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExportConfig")
            .field("field_spec_text", &self.field_spec_text)
            .field("crypt_key", &"[REDACTED]")
            .finish()
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            field_spec_text: DEFAULT_FIELDS.to_owned(),
            crypt_key: DEFAULT_CRYPT_KEY.to_owned(),
        }
    }
}

impl ExportConfig {
    pub fn new(field_spec_text: impl Into<String>, crypt_key: impl Into<String>) -> Self {
        Self {
            field_spec_text: field_spec_text.into(),
            crypt_key: crypt_key.into(),
        }
    }

    /// Read both settings. A missing or blank field list is replaced by the
    /// default and written back.
    pub fn load<S: ConfigStore + ?Sized>(store: &mut S) -> Result<Self> {
        let stored = store.get_option(OPTION_FIELDS)?.unwrap_or_default();
        let field_spec_text = field_spec_text_or_default(&stored).to_owned();
        if field_spec_text != stored {
            debug!("field list empty, restoring default");
            store.set_option(OPTION_FIELDS, &field_spec_text)?;
        }

        let crypt_key = store
            .get_option(OPTION_CRYPT_KEY)?
            .unwrap_or_else(|| DEFAULT_CRYPT_KEY.to_owned());

        Ok(Self {
            field_spec_text,
            crypt_key,
        })
    }

    pub fn save<S: ConfigStore + ?Sized>(&self, store: &mut S) -> Result<()> {
        store.set_option(OPTION_FIELDS, &self.field_spec_text)?;
        store.set_option(OPTION_CRYPT_KEY, &self.crypt_key)?;
        Ok(())
    }
}

/// First-run setup: seed the default field list unless one is already
/// stored, even an empty one.
pub fn activate<S: ConfigStore + ?Sized>(store: &mut S) -> Result<bool> {
    if store.get_option(OPTION_FIELDS)?.is_some() {
        return Ok(false);
    }
    store.set_option(OPTION_FIELDS, DEFAULT_FIELDS)?;
    info!("seeded default export fields");
    Ok(true)
}

/// The admin "save settings" action.
pub fn save_settings<S: ConfigStore + ?Sized>(
    store: &mut S,
    field_text: &str,
    crypt_key: &str,
) -> Result<AdminNotice> {
    let sanitized = sanitize_textarea(field_text);
    let config = ExportConfig::new(field_spec_text_or_default(&sanitized), crypt_key.trim());
    config.save(store)?;
    info!(fields = %config.field_spec_text.lines().count(), "export settings saved");
    Ok(AdminNotice::success("settings_updated", "Settings saved."))
}

/// Clean multi-line form input: unify line endings, drop markup and control
/// characters, trim trailing whitespace on each line and the whole text.
pub fn sanitize_textarea(input: &str) -> String {
    let unified = input.replace("\r\n", "\n").replace('\r', "\n");
    let stripped = strip_tags(&unified);
    stripped
        .split('\n')
        .map(|line| {
            line.chars()
                .filter(|c| *c == '\t' || !c.is_control())
                .collect::<String>()
                .trim_end()
                .to_owned()
        })
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_owned()
}

/// Drop `<...>` markup. A `<` only opens a tag when a letter, `/` or `!`
/// follows it; otherwise it is kept as text.
fn strip_tags(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut in_tag = false;
    let mut chars = input.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '<' if !in_tag && chars.peek().is_some_and(|n| starts_tag(*n)) => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => out.push(c),
            _ => {}
        }
    }
    out
}

fn starts_tag(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '/' || c == '!'
}
