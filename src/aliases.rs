// src/aliases.rs
//! secure-gate secret types used for key material

pub use secure_gate::fixed_alias;

// Raw AES-128 key bytes derived from the configured key string
fixed_alias!(CryptKey16, 16);
