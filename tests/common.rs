// tests/common.rs
//! Shared test utilities: logging setup and user fixtures

#![allow(dead_code)] // each test binary uses a different subset

use chrono::NaiveDate;
use serde_json::json;
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use user_csv_exporter::{Cipher, UserEntity};

/// Initialize test-friendly logging; respects RUST_LOG.
/// Safe to call from every test.
pub fn setup() {
    #[cfg(feature = "logging")]
    tracing_subscriber::registry()
        .with(fmt::layer().with_test_writer())
        .with(EnvFilter::from_default_env())
        .try_init()
        .ok();
}

pub const TEST_KEY: &str = "k";

/// `ID=7, login=alice`, with `secret_code` stored encrypted as "42".
pub fn alice() -> UserEntity {
    let cipher = Cipher::new(TEST_KEY);
    UserEntity::new(7)
        .with_login("alice")
        .with_email("alice@example.com")
        .with_meta("secret_code", cipher.encrypt("42"))
}

/// A user exercising every metadata variant.
pub fn bob() -> UserEntity {
    let mut bob = UserEntity::new(8)
        .with_login("bob")
        .with_email("bob@example.com")
        .with_meta("tags", json!(["red", "blue"]))
        .with_meta("address", json!({"city": "東京", "zip": "100-0001"}))
        .with_meta("age", 41i64)
        .with_meta("nickname", "Bobby \"Tables\"");
    bob.first_name = Some("Bob".into());
    bob.last_name = Some("Builder".into());
    bob.display_name = Some("Bob B.".into());
    bob.user_registered = NaiveDate::from_ymd_opt(2024, 3, 9)
        .and_then(|d| d.and_hms_opt(14, 5, 0));
    bob
}

pub fn export_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 31).unwrap()
}

/// CSV bytes without the byte-order mark, as text.
pub fn csv_body(bytes: &[u8]) -> &str {
    assert!(bytes.starts_with(b"\xEF\xBB\xBF"), "missing BOM");
    std::str::from_utf8(&bytes[3..]).unwrap()
}
