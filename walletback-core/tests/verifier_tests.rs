//! Tests for the backup verifier

use std::io;

use rand::RngCore;
use walletback_core::envelope;
use walletback_core::target::{
    BackupDestination, FileDestination, MemoryDestination, ReadTarget, WriteTarget,
};
use walletback_core::verifier::{run_backup, BackupError};

/// Destination whose write always fails.
struct BrokenSink;

impl WriteTarget for BrokenSink {
    fn write(&mut self, _data: &[u8]) -> io::Result<()> {
        Err(io::Error::new(io::ErrorKind::PermissionDenied, "no space"))
    }
}

impl ReadTarget for BrokenSink {
    fn read_all(&mut self) -> io::Result<Vec<u8>> {
        unreachable!("read must not happen after a failed write")
    }
}

impl BackupDestination for BrokenSink {}

/// Destination that accepts the write but fails the read-back.
struct BrokenSource {
    inner: MemoryDestination,
}

impl WriteTarget for BrokenSource {
    fn write(&mut self, data: &[u8]) -> io::Result<()> {
        self.inner.write(data)
    }
}

impl ReadTarget for BrokenSource {
    fn read_all(&mut self) -> io::Result<Vec<u8>> {
        Err(io::Error::new(io::ErrorKind::Other, "medium removed"))
    }
}

impl BackupDestination for BrokenSource {}

/// Destination whose stored artifact silently decays before read-back.
struct DecayingDestination {
    inner: MemoryDestination,
    replacement: Option<Vec<u8>>,
}

impl WriteTarget for DecayingDestination {
    fn write(&mut self, data: &[u8]) -> io::Result<()> {
        self.inner.write(data)
    }
}

impl ReadTarget for DecayingDestination {
    fn read_all(&mut self) -> io::Result<Vec<u8>> {
        match self.replacement.take() {
            Some(replacement) => Ok(replacement),
            None => self.inner.read_all(),
        }
    }
}

impl BackupDestination for DecayingDestination {}

#[test]
fn test_run_backup_succeeds_in_memory() {
    let mut target = MemoryDestination::new();
    run_backup(b"wallet bytes", "correcthorse123", &mut target).unwrap();

    // The persisted artifact is valid armor on its own.
    let stored = String::from_utf8(target.contents().unwrap().to_vec()).unwrap();
    assert_eq!(
        envelope::decrypt(&stored, "correcthorse123").unwrap(),
        b"wallet bytes".to_vec()
    );
}

#[test]
fn test_run_backup_random_kilobyte() {
    let mut plaintext = vec![0u8; 1024];
    rand::thread_rng().fill_bytes(&mut plaintext);

    let mut target = MemoryDestination::new();
    run_backup(&plaintext, "correcthorse123", &mut target).unwrap();
}

#[test]
fn test_run_backup_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("wallet-backup");

    let mut target = FileDestination::with_label(&path, "internal storage");
    run_backup(b"wallet bytes", "pw", &mut target).unwrap();

    assert_eq!(target.description(), Some("internal storage"));
    assert!(path.exists());
}

#[test]
fn test_write_fault_reported() {
    let result = run_backup(b"wallet bytes", "pw", &mut BrokenSink);
    assert!(matches!(result, Err(BackupError::Write(_))));
}

#[test]
fn test_read_fault_reported() {
    let mut target = BrokenSource {
        inner: MemoryDestination::new(),
    };
    let result = run_backup(b"wallet bytes", "pw", &mut target);
    assert!(matches!(result, Err(BackupError::Read(_))));
}

#[test]
fn test_corrupted_artifact_fails_verification() {
    let mut target = MemoryDestination::new();
    let armored = envelope::encrypt(b"wallet bytes", "pw").unwrap();
    target.write(armored.as_bytes()).unwrap();

    // Flip one byte of the stored ciphertext between write and read-back.
    let stored = target.contents_mut().unwrap();
    let mid = stored.len() / 2;
    stored[mid] ^= 0x01;

    let result = walletback_core::verifier::verify_backup(b"wallet bytes", "pw", &mut target);
    assert!(matches!(
        result,
        Err(BackupError::Decryption(_)) | Err(BackupError::VerificationMismatch)
    ));
}

#[test]
fn test_verification_reads_storage_not_memory() {
    // The read-back returns a valid armor of the wrong wallet state. Only
    // a verifier that trusts storage over its own ciphertext catches this.
    let replacement = envelope::encrypt(b"some other wallet", "pw").unwrap();
    let mut target = DecayingDestination {
        inner: MemoryDestination::new(),
        replacement: Some(replacement.into_bytes()),
    };

    let result = run_backup(b"wallet bytes", "pw", &mut target);
    assert!(matches!(result, Err(BackupError::VerificationMismatch)));
}

#[test]
fn test_non_utf8_readback_is_decryption_fault() {
    let mut target = DecayingDestination {
        inner: MemoryDestination::new(),
        replacement: Some(vec![0xff, 0xfe, 0xfd]),
    };

    let result = run_backup(b"wallet bytes", "pw", &mut target);
    assert!(matches!(result, Err(BackupError::Decryption(_))));
}
