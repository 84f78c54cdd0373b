// src/crypto/cipher.rs
//! AES-128-ECB value cipher, byte-compatible with the legacy exporter
//!
//! SECURITY WARNING: ECB has no IV and leaks equality between values, and
//! the key string is used directly instead of going through a KDF. Both are
//! kept so values stored by earlier versions still decrypt. Do not reuse
//! this cipher for anything new.

use aes::cipher::block_padding::Pkcs7;
use aes::cipher::generic_array::GenericArray;
use aes::cipher::{BlockDecryptMut, BlockEncryptMut, KeyInit};
use aes::Aes128;
use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig, STANDARD};
use base64::engine::DecodePaddingMode;
use base64::Engine;
use tracing::debug;

use crate::aliases::CryptKey16;
use crate::consts::CRYPT_KEY_LEN;
use crate::error::CryptError;

type Aes128EcbEnc = ecb::Encryptor<Aes128>;
type Aes128EcbDec = ecb::Decryptor<Aes128>;

pub type Result<T> = std::result::Result<T, CryptError>;

/// Standard alphabet, padding optional, as OpenSSL reads base64 input.
const LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Encrypts and decrypts single string values under one configured key.
pub struct Cipher {
    key: CryptKey16,
}

impl Cipher {
    /// Build a cipher from the configured key string. Never fails: an empty
    /// key is an all-zero key.
    pub fn new(key: &str) -> Self {
        Self {
            key: derive_key(key),
        }
    }

    /// Encrypt to the base64 text form stored in user metadata.
    pub fn encrypt(&self, plaintext: &str) -> String {
        let ciphertext = Aes128EcbEnc::new(GenericArray::from_slice(self.key.expose_secret()))
            .encrypt_padded_vec_mut::<Pkcs7>(plaintext.as_bytes());
        STANDARD.encode(ciphertext)
    }

    /// Decrypt a stored value. Whitespace anywhere in the base64 text (a
    /// trailing newline, wrapped lines) is ignored.
    pub fn decrypt(&self, encoded: &str) -> Result<String> {
        let compact: String = encoded
            .chars()
            .filter(|c| !c.is_ascii_whitespace())
            .collect();
        if compact.is_empty() {
            return Err(CryptError::Empty);
        }

        let ciphertext = LENIENT.decode(&compact)?;
        if ciphertext.is_empty() || ciphertext.len() % CRYPT_KEY_LEN != 0 {
            return Err(CryptError::Length(ciphertext.len()));
        }

        let plaintext = Aes128EcbDec::new(GenericArray::from_slice(self.key.expose_secret()))
            .decrypt_padded_vec_mut::<Pkcs7>(&ciphertext)
            .map_err(|_| CryptError::Padding)?;

        Ok(String::from_utf8(plaintext)?)
    }

    /// Decrypt, degrading any failure to an empty string.
    pub fn decrypt_or_empty(&self, encoded: &str) -> String {
        match self.decrypt(encoded) {
            Ok(plaintext) => plaintext,
            Err(err) => {
                debug!(error = %err, "value did not decrypt, exporting empty cell");
                String::new()
            }
        }
    }
}

/// Key bytes as OpenSSL sees a short passphrase: NUL-padded or truncated to
/// exactly 16 bytes.
fn derive_key(key: &str) -> CryptKey16 {
    let mut bytes = [0u8; CRYPT_KEY_LEN];
    let raw = key.as_bytes();
    let len = raw.len().min(CRYPT_KEY_LEN);
    bytes[..len].copy_from_slice(&raw[..len]);
    CryptKey16::new(bytes)
}
