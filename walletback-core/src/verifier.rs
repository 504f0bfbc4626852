//! Backup Verifier
//!
//! Runs the encrypt-write-read-decrypt-compare sequence against a single
//! destination handle. A backup only counts once the bytes that actually
//! landed in storage decrypt back to the exact plaintext; the in-memory
//! ciphertext is deliberately not trusted for verification, since the whole
//! point of the read-back is to catch storage corruption.

use std::io;

use thiserror::Error;

use crate::envelope::{self, EnvelopeError};
use crate::target::BackupDestination;

/// Backup failure taxonomy, ordered roughly by severity.
#[derive(Error, Debug)]
pub enum BackupError {
    #[error("Writing backup failed: {0}")]
    Write(#[source] io::Error),

    #[error("Reading backup back failed: {0}")]
    Read(#[source] io::Error),

    #[error("Backup could not be decrypted: {0}")]
    Decryption(#[from] EnvelopeError),

    /// The persisted artifact decrypted cleanly but does not reproduce the
    /// original plaintext. More severe than a decryption fault: a backup
    /// exists on storage that does not represent the wallet.
    #[error("Verification mismatch: decrypted backup differs from original")]
    VerificationMismatch,
}

/// Encrypts `plaintext` under `password` and persists the armored artifact
/// to `target`, replacing any previous contents.
pub fn write_backup<D>(plaintext: &[u8], password: &str, target: &mut D) -> Result<(), BackupError>
where
    D: BackupDestination + ?Sized,
{
    let armored = envelope::encrypt(plaintext, password)?;

    target
        .write(armored.as_bytes())
        .map_err(BackupError::Write)
}

/// Re-reads the persisted artifact from `target`, decrypts it, and
/// byte-compares against `plaintext`.
pub fn verify_backup<D>(plaintext: &[u8], password: &str, target: &mut D) -> Result<(), BackupError>
where
    D: BackupDestination + ?Sized,
{
    let read_back = target.read_all().map_err(BackupError::Read)?;

    // Armor is text; a non-UTF-8 read-back means the artifact is mangled.
    let read_back = String::from_utf8(read_back).map_err(|_| EnvelopeError::MalformedArmor)?;

    let recovered = envelope::decrypt(&read_back, password)?;

    if recovered != plaintext {
        return Err(BackupError::VerificationMismatch);
    }

    Ok(())
}

/// Encrypts `plaintext` under `password`, persists it to `target`, then
/// re-reads, decrypts, and byte-compares.
///
/// On success the caller holds a verified backup and may commit state that
/// depends on one (e.g. disarming a backup reminder). On any failure the
/// only side effect is whatever was already written to `target`; the caller
/// decides whether to leave the unverified artifact in place.
///
/// # Errors
/// - [`BackupError::Write`] / [`BackupError::Read`] for storage faults
/// - [`BackupError::Decryption`] when the read-back does not decrypt
/// - [`BackupError::VerificationMismatch`] when it decrypts to other bytes
pub fn run_backup<D>(plaintext: &[u8], password: &str, target: &mut D) -> Result<(), BackupError>
where
    D: BackupDestination + ?Sized,
{
    write_backup(plaintext, password, target)?;
    verify_backup(plaintext, password, target)
}
