// SPDX-FileCopyrightText: 2026 Walletback Contributors
//
// SPDX-License-Identifier: GPL-3.0-or-later

pub mod encryption;
pub mod password_kdf;

pub use encryption::{decrypt, encrypt, EncryptionError, SymmetricKey};
pub use password_kdf::{derive_key_argon2id, PasswordKdfError, SALT_SIZE};
