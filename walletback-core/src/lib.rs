//! Walletback Core Library
//!
//! Verified encrypted wallet backups: serialize → encrypt → persist →
//! re-read → decrypt → byte-compare → commit. A "please back up" reminder
//! is only disarmed once the persisted artifact provably reproduces the
//! original wallet snapshot.
//!
//! The wallet serialization format, the UI, and the concrete storage
//! backend are external collaborators; this crate deals in opaque byte
//! blobs, armored ciphertext, and destination handles.

pub mod crypto;
pub mod envelope;
pub mod password;
pub mod session;
pub mod target;
pub mod verifier;

pub use crypto::SymmetricKey;
pub use envelope::EnvelopeError;
pub use password::{can_submit, classify_strength, password_feedback, PasswordStrength};
pub use session::{
    BackupEvent, BackupSession, BackupState, PlaintextBlob, ReminderFlag, SessionError,
};
pub use target::{
    BackupDestination, FileDestination, MemoryDestination, ReadTarget, WriteTarget,
};
pub use verifier::{run_backup, verify_backup, write_backup, BackupError};
