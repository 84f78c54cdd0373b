// src/consts.rs
//! Shared constants: option names, defaults and output format

/// Field list used when nothing (or only whitespace) is stored
pub const DEFAULT_FIELDS: &str = "ID\nuser_login\nuser_email\nfirst_name\nlast_name";

/// Default encryption key: empty, which the cipher accepts
pub const DEFAULT_CRYPT_KEY: &str = "";

/// Option holding the newline-delimited field list
pub const OPTION_FIELDS: &str = "bf_user_export_fields";

/// Option holding the encryption key string
pub const OPTION_CRYPT_KEY: &str = "bf_user_export_crypt_key";

/// Leading marker on a field line: the stored value is encrypted
pub const ENCRYPTED_SENTINEL: char = '*';

/// Key length of AES-128
pub const CRYPT_KEY_LEN: usize = 16;

/// UTF-8 byte-order mark, written first so spreadsheets pick the encoding
pub const UTF8_BOM: &[u8; 3] = b"\xEF\xBB\xBF";

pub const CSV_CONTENT_TYPE: &str = "text/csv; charset=utf-8";

pub const EXPORT_FILENAME_PREFIX: &str = "bf-users-export-";

/// Timestamp layout for `user_registered`
pub const REGISTERED_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
