// src/export/mod.rs
//! CSV export of user records
//!
//! Fields marked encrypted are decrypted on the way out, so the file holds
//! those values in cleartext. Treat exports as sensitive.

pub use self::csv::{to_csv_bytes, write_csv};
pub use self::project::{project, ExportTable};
pub use self::run::{export_filename, run_export, run_export_on, ExportFile};

pub mod csv;
pub mod project;
pub mod run;
