// src/error.rs
//! Public error types for the entire crate

use thiserror::Error;

/// Everything that can stop an export or a settings operation.
///
/// The first three variants are user-facing conditions that the admin screen
/// renders as notices. The rest are infrastructure failures from the
/// collaborators.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("no export fields are configured")]
    NoFields,

    #[error("no exportable users were found")]
    NoUsers,

    #[error("there is no data to export")]
    NoData,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Database error: {0}")]
    Sql(#[from] rusqlite::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Config(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, ExportError>;

impl ExportError {
    /// Stable notice code, as shown next to admin messages.
    pub fn code(&self) -> &'static str {
        match self {
            ExportError::NoFields => "no_fields",
            ExportError::NoUsers => "no_users",
            ExportError::NoData => "no_data",
            _ => "export_failed",
        }
    }

    /// True for the conditions caused by configuration or data, not by a
    /// broken collaborator.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            ExportError::NoFields | ExportError::NoUsers | ExportError::NoData
        )
    }

    pub fn notice(&self) -> AdminNotice {
        AdminNotice::error(self.code(), self.to_string())
    }
}

/// Why a single value could not be decrypted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CryptError {
    #[error("ciphertext is empty")]
    Empty,

    #[error("ciphertext is not valid base64: {0}")]
    Encoding(#[from] base64::DecodeError),

    #[error("ciphertext length {0} is not a multiple of the block size")]
    Length(usize),

    #[error("wrong key or corrupted ciphertext")]
    Padding,

    #[error("decrypted value is not valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

/// A message for the admin screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminNotice {
    pub code: &'static str,
    pub message: String,
    pub level: NoticeLevel,
}

impl AdminNotice {
    pub fn success(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            level: NoticeLevel::Success,
        }
    }

    pub fn error(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            level: NoticeLevel::Error,
        }
    }
}

impl std::fmt::Display for AdminNotice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}
