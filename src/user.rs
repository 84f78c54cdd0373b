// src/user.rs
//! User records as the exporter sees them, and where they come from

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde_json::Value;

use crate::consts::REGISTERED_FORMAT;
use crate::error::Result;

/// The fixed, always-present user fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaAttribute {
    Id,
    UserLogin,
    UserEmail,
    FirstName,
    LastName,
    DisplayName,
    UserRegistered,
}

impl SchemaAttribute {
    pub const ALL: [SchemaAttribute; 7] = [
        SchemaAttribute::Id,
        SchemaAttribute::UserLogin,
        SchemaAttribute::UserEmail,
        SchemaAttribute::FirstName,
        SchemaAttribute::LastName,
        SchemaAttribute::DisplayName,
        SchemaAttribute::UserRegistered,
    ];

    /// Exact, case-sensitive match on the field name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|attr| attr.name() == name)
    }

    pub fn name(self) -> &'static str {
        match self {
            SchemaAttribute::Id => "ID",
            SchemaAttribute::UserLogin => "user_login",
            SchemaAttribute::UserEmail => "user_email",
            SchemaAttribute::FirstName => "first_name",
            SchemaAttribute::LastName => "last_name",
            SchemaAttribute::DisplayName => "display_name",
            SchemaAttribute::UserRegistered => "user_registered",
        }
    }
}

/// A metadata value: a scalar, or a list/map kept as JSON.
#[derive(Debug, Clone, PartialEq)]
pub enum MetaValue {
    Text(String),
    Number(serde_json::Number),
    Structured(Value),
}

impl MetaValue {
    /// Text for one CSV cell. Structured values become compact JSON with
    /// non-ASCII characters left as-is.
    pub fn to_cell(&self) -> String {
        match self {
            MetaValue::Text(s) => s.clone(),
            MetaValue::Number(n) => n.to_string(),
            MetaValue::Structured(v) => v.to_string(),
        }
    }

    /// The JSON form used for storage.
    pub fn to_json(&self) -> Value {
        match self {
            MetaValue::Text(s) => Value::String(s.clone()),
            MetaValue::Number(n) => Value::Number(n.clone()),
            MetaValue::Structured(v) => v.clone(),
        }
    }
}

impl From<Value> for MetaValue {
    fn from(value: Value) -> Self {
        match value {
            Value::String(s) => MetaValue::Text(s),
            Value::Number(n) => MetaValue::Number(n),
            Value::Bool(true) => MetaValue::Text("1".into()),
            Value::Bool(false) | Value::Null => MetaValue::Text(String::new()),
            structured @ (Value::Array(_) | Value::Object(_)) => MetaValue::Structured(structured),
        }
    }
}

impl From<&str> for MetaValue {
    fn from(value: &str) -> Self {
        MetaValue::Text(value.to_owned())
    }
}

impl From<String> for MetaValue {
    fn from(value: String) -> Self {
        MetaValue::Text(value)
    }
}

impl From<i64> for MetaValue {
    fn from(value: i64) -> Self {
        MetaValue::Number(value.into())
    }
}

/// One user with schema attributes and metadata populated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserEntity {
    pub id: u64,
    pub user_login: Option<String>,
    pub user_email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub display_name: Option<String>,
    pub user_registered: Option<NaiveDateTime>,
    pub metadata: BTreeMap<String, MetaValue>,
}

impl UserEntity {
    pub fn new(id: u64) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    /// Attribute text; missing attributes are empty.
    pub fn attribute(&self, attr: SchemaAttribute) -> String {
        let text = |v: &Option<String>| v.clone().unwrap_or_default();
        match attr {
            SchemaAttribute::Id => self.id.to_string(),
            SchemaAttribute::UserLogin => text(&self.user_login),
            SchemaAttribute::UserEmail => text(&self.user_email),
            SchemaAttribute::FirstName => text(&self.first_name),
            SchemaAttribute::LastName => text(&self.last_name),
            SchemaAttribute::DisplayName => text(&self.display_name),
            SchemaAttribute::UserRegistered => self
                .user_registered
                .map(|t| t.format(REGISTERED_FORMAT).to_string())
                .unwrap_or_default(),
        }
    }

    pub fn meta(&self, key: &str) -> Option<&MetaValue> {
        self.metadata.get(key)
    }

    pub fn with_login(mut self, login: impl Into<String>) -> Self {
        self.user_login = Some(login.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.user_email = Some(email.into());
        self
    }

    pub fn with_meta(mut self, key: impl Into<String>, value: impl Into<MetaValue>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

/// Read side of the host's user store.
pub trait UserSource {
    /// Every user, with schema attributes and full metadata.
    fn list_all_with_metadata(&self) -> Result<Vec<UserEntity>>;
}

/// Users held in memory, returned in insertion order.
#[derive(Debug, Clone, Default)]
pub struct MemoryUserSource {
    users: Vec<UserEntity>,
}

impl MemoryUserSource {
    pub fn new(users: Vec<UserEntity>) -> Self {
        Self { users }
    }

    pub fn push(&mut self, user: UserEntity) {
        self.users.push(user);
    }
}

impl UserSource for MemoryUserSource {
    fn list_all_with_metadata(&self) -> Result<Vec<UserEntity>> {
        Ok(self.users.clone())
    }
}
