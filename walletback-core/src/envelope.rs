// SPDX-FileCopyrightText: 2026 Walletback Contributors
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Cipher Envelope
//!
//! Armors a plaintext blob into a self-contained textual backup artifact
//! and back. The armor bundles everything decryption needs besides the
//! password, so a backup file is portable on its own.
//!
//! Armor layout, base64-encoded as a single line:
//! `MAGIC (4 bytes) || version (1 byte) || salt (16 bytes) || nonce (24 bytes) || ciphertext || tag (16 bytes)`

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use thiserror::Error;

use crate::crypto::{self, derive_key_argon2id, EncryptionError, SALT_SIZE};
use crate::crypto::encryption::{NONCE_SIZE, TAG_SIZE};

/// Magic bytes identifying a walletback armor.
const MAGIC: &[u8; 4] = b"WBAK";

/// Current armor version.
const ARMOR_VERSION: u8 = 1;

/// Minimum decoded armor length: header plus an empty ciphertext frame.
const MIN_ARMOR_LEN: usize = 4 + 1 + SALT_SIZE + NONCE_SIZE + TAG_SIZE;

/// Envelope error types.
#[derive(Error, Debug)]
pub enum EnvelopeError {
    #[error("Malformed backup armor")]
    MalformedArmor,

    #[error("Unsupported backup version: {0}")]
    UnsupportedVersion(u8),

    #[error("Key derivation failed: {0}")]
    KeyDerivation(String),

    #[error("Backup encryption failed")]
    EncryptionFailed,

    #[error("Backup decryption failed: wrong password or corrupted data")]
    DecryptionFailed,
}

impl From<EncryptionError> for EnvelopeError {
    fn from(e: EncryptionError) -> Self {
        match e {
            EncryptionError::EncryptionFailed => EnvelopeError::EncryptionFailed,
            EncryptionError::DecryptionFailed => EnvelopeError::DecryptionFailed,
            EncryptionError::CiphertextTooShort => EnvelopeError::MalformedArmor,
        }
    }
}

/// Encrypts a plaintext blob under a password into armored text.
///
/// Every call draws a fresh random salt and nonce, so encrypting the same
/// blob twice yields different armors that decrypt to the same bytes.
pub fn encrypt(plaintext: &[u8], password: &str) -> Result<String, EnvelopeError> {
    use ring::rand::SystemRandom;

    let rng = SystemRandom::new();
    let salt = ring::rand::generate::<[u8; SALT_SIZE]>(&rng)
        .map_err(|_| EnvelopeError::EncryptionFailed)?
        .expose();

    let key = derive_key_argon2id(password.as_bytes(), &salt)
        .map_err(|e| EnvelopeError::KeyDerivation(e.to_string()))?;

    let frame = crypto::encrypt(&key, plaintext)?;

    let mut armor = Vec::with_capacity(4 + 1 + SALT_SIZE + frame.len());
    armor.extend_from_slice(MAGIC);
    armor.push(ARMOR_VERSION);
    armor.extend_from_slice(&salt);
    armor.extend_from_slice(&frame);

    Ok(BASE64.encode(armor))
}

/// Decrypts armored text back into the plaintext blob.
///
/// Tolerates surrounding whitespace: line-oriented transports may append
/// a trailing newline to the stored artifact.
///
/// # Errors
/// - `MalformedArmor` for non-base64, wrong magic, or truncated input
/// - `UnsupportedVersion` for an armor version this build does not know
/// - `DecryptionFailed` for a wrong password or a tampered ciphertext
pub fn decrypt(armored: &str, password: &str) -> Result<Vec<u8>, EnvelopeError> {
    let data = BASE64
        .decode(armored.trim())
        .map_err(|_| EnvelopeError::MalformedArmor)?;

    if data.len() < MIN_ARMOR_LEN {
        return Err(EnvelopeError::MalformedArmor);
    }

    if &data[..4] != MAGIC {
        return Err(EnvelopeError::MalformedArmor);
    }

    let version = data[4];
    if version != ARMOR_VERSION {
        return Err(EnvelopeError::UnsupportedVersion(version));
    }

    let salt = &data[5..5 + SALT_SIZE];
    let frame = &data[5 + SALT_SIZE..];

    let key = derive_key_argon2id(password.as_bytes(), salt)
        .map_err(|e| EnvelopeError::KeyDerivation(e.to_string()))?;

    Ok(crypto::decrypt(&key, frame)?)
}
