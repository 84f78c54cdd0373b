// src/crypto/mod.rs
//! Reversible per-field encryption

pub mod cipher;

pub use cipher::Cipher;
