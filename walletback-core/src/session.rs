//! Backup Session State Machine
//!
//! Drives one user-initiated backup attempt from password entry through
//! destination choice to a verified commit or a rollback. UI layers feed
//! discrete [`BackupEvent`]s in; the session owns the password material and
//! wipes it on every exit path.
//!
//! Only a verified backup disarms the injected [`ReminderFlag`]; every
//! failure and cancellation leaves it untouched.

use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::password::{self, PasswordStrength};
use crate::target::BackupDestination;
use crate::verifier::{self, BackupError};

/// External "please back up" reminder flag, injected into the session.
///
/// Disarmed exactly once, only after a verified backup. Scheduling logic
/// elsewhere reads the flag; the session only ever clears it.
pub trait ReminderFlag {
    fn disarm(&mut self);
}

/// Opaque wallet snapshot captured when the backup attempt starts.
///
/// The session encrypts and verifies against these exact bytes; there is
/// no re-serialization between encryption and verification. Zeroed on drop.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct PlaintextBlob(Vec<u8>);

impl PlaintextBlob {
    /// Wraps serialized wallet state. The core never interprets the bytes.
    pub fn new(bytes: Vec<u8>) -> Self {
        PlaintextBlob(bytes)
    }

    /// Returns the snapshot bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Returns the snapshot length in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true for an empty snapshot.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// State of a backup session.
#[derive(Debug)]
pub enum BackupState {
    /// Initial state
    Idle,
    /// Collecting password and confirmation from the user
    Collecting,
    /// Passwords confirmed, waiting for the destination picker
    Ready,
    /// Encrypting and writing to the destination
    Writing,
    /// Re-reading and checking the persisted artifact
    Verifying,
    /// Backup verified; reminder disarmed
    Committed {
        /// Display label of the destination, when one was available.
        target: Option<String>,
    },
    /// User aborted before completion; inputs re-enabled for retry
    Cancelled,
    /// Backup or verification failed; reminder untouched
    Failed { error: BackupError },
}

/// Events that drive the backup state machine.
///
/// Destination resolution is externally asynchronous; its outcome enters
/// the session as one of the two terminal picker events.
pub enum BackupEvent {
    /// Begin a backup attempt.
    Start,
    /// Password or confirmation field edited.
    Edit {
        password: String,
        confirmation: String,
    },
    /// User submitted the password pair.
    Submit,
    /// Destination picker resolved with a handle.
    DestinationChosen(Box<dyn BackupDestination>),
    /// Destination picker was dismissed without choosing.
    DestinationCancelled,
    /// User aborted the attempt.
    Cancel,
}

/// Session error types.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Password and confirmation are empty or differ. The session stays in
    /// `Collecting`; user-correctable.
    #[error("Passwords are empty or do not match")]
    PasswordMismatch,

    #[error("No wallet snapshot available")]
    NoSnapshot,

    #[error("Invalid state: {0}")]
    InvalidState(String),
}

/// A backup session managing one backup attempt.
pub struct BackupSession<F: ReminderFlag> {
    /// Current state
    state: BackupState,
    /// Password under entry; actively wiped on every exit path
    password: Zeroizing<String>,
    /// Confirmation under entry; actively wiped on every exit path
    confirmation: Zeroizing<String>,
    /// Wallet snapshot to back up
    snapshot: Option<PlaintextBlob>,
    /// Injected reminder flag, disarmed only on verified commit
    reminder: F,
    /// Whether password inputs are accepting edits
    inputs_enabled: bool,
}

impl<F: ReminderFlag> BackupSession<F> {
    /// Creates an idle session around the injected reminder flag.
    pub fn new(reminder: F) -> Self {
        BackupSession {
            state: BackupState::Idle,
            password: Zeroizing::new(String::new()),
            confirmation: Zeroizing::new(String::new()),
            snapshot: None,
            reminder,
            inputs_enabled: false,
        }
    }

    /// Returns the current state.
    pub fn state(&self) -> &BackupState {
        &self.state
    }

    /// Returns whether password inputs are accepting edits.
    pub fn inputs_enabled(&self) -> bool {
        self.inputs_enabled
    }

    /// Returns the injected reminder flag.
    pub fn reminder(&self) -> &F {
        &self.reminder
    }

    /// Strength of the password as currently entered, for the meter.
    pub fn strength(&self) -> PasswordStrength {
        password::classify_strength(&self.password)
    }

    /// Whether the submit control should be enabled: confirmed non-empty
    /// password, a snapshot on hand, and no destination chosen yet.
    pub fn can_submit(&self) -> bool {
        matches!(self.state, BackupState::Collecting)
            && self.snapshot.is_some()
            && password::can_submit(&self.password, &self.confirmation)
    }

    /// Provides the serialized wallet state for this attempt.
    ///
    /// Must arrive before submission; the same bytes feed encryption and
    /// the later byte-compare.
    pub fn set_snapshot(&mut self, bytes: Vec<u8>) -> Result<(), SessionError> {
        match self.state {
            BackupState::Idle | BackupState::Collecting => {
                self.snapshot = Some(PlaintextBlob::new(bytes));
                Ok(())
            }
            _ => Err(SessionError::InvalidState(
                "Snapshot is fixed once passwords are submitted".into(),
            )),
        }
    }

    /// Processes an event and transitions the state machine.
    pub fn apply(&mut self, event: BackupEvent) -> Result<(), SessionError> {
        match event {
            BackupEvent::Start => self.handle_start(),
            BackupEvent::Edit {
                password,
                confirmation,
            } => self.handle_edit(password, confirmation),
            BackupEvent::Submit => self.handle_submit(),
            BackupEvent::DestinationChosen(destination) => {
                self.handle_destination_chosen(destination)
            }
            BackupEvent::DestinationCancelled => self.handle_cancel(),
            BackupEvent::Cancel => self.handle_cancel(),
        }
    }

    fn handle_start(&mut self) -> Result<(), SessionError> {
        if !matches!(self.state, BackupState::Idle) {
            return Err(SessionError::InvalidState(
                "Can only start from Idle state".into(),
            ));
        }

        self.inputs_enabled = true;
        self.state = BackupState::Collecting;
        Ok(())
    }

    fn handle_edit(&mut self, password: String, confirmation: String) -> Result<(), SessionError> {
        if !matches!(self.state, BackupState::Collecting) {
            return Err(SessionError::InvalidState(
                "Password edits only while collecting".into(),
            ));
        }

        // Replacing the Zeroizing wrappers wipes the previous values.
        self.password = Zeroizing::new(password);
        self.confirmation = Zeroizing::new(confirmation);
        Ok(())
    }

    fn handle_submit(&mut self) -> Result<(), SessionError> {
        if !matches!(self.state, BackupState::Collecting) {
            return Err(SessionError::InvalidState(
                "Can only submit from Collecting state".into(),
            ));
        }

        if !password::can_submit(&self.password, &self.confirmation) {
            // Stay in Collecting; the user can correct and resubmit.
            return Err(SessionError::PasswordMismatch);
        }

        if self.snapshot.is_none() {
            return Err(SessionError::NoSnapshot);
        }

        self.inputs_enabled = false;
        self.state = BackupState::Ready;
        Ok(())
    }

    /// Runs the uninterruptible write-then-verify sequence.
    ///
    /// Once this starts there is no further suspend point: encrypt, write,
    /// read-back, decrypt, and compare run to completion or failure.
    fn handle_destination_chosen(
        &mut self,
        mut destination: Box<dyn BackupDestination>,
    ) -> Result<(), SessionError> {
        if !matches!(self.state, BackupState::Ready) {
            return Err(SessionError::InvalidState(
                "No destination expected in this state".into(),
            ));
        }

        let snapshot = self
            .snapshot
            .as_ref()
            .ok_or_else(|| SessionError::InvalidState("Ready without a snapshot".into()))?;

        self.state = BackupState::Writing;
        if let Err(error) =
            verifier::write_backup(snapshot.as_bytes(), &self.password, &mut *destination)
        {
            self.fail(error);
            return Ok(());
        }

        self.state = BackupState::Verifying;
        if let Err(error) =
            verifier::verify_backup(snapshot.as_bytes(), &self.password, &mut *destination)
        {
            self.fail(error);
            return Ok(());
        }

        let target = destination.description().map(str::to_string);

        self.wipe_passwords();
        self.reminder.disarm();
        self.state = BackupState::Committed { target };
        Ok(())
    }

    fn handle_cancel(&mut self) -> Result<(), SessionError> {
        match self.state {
            BackupState::Idle | BackupState::Collecting | BackupState::Ready => {
                self.wipe_passwords();
                self.inputs_enabled = true;
                self.state = BackupState::Cancelled;
                Ok(())
            }
            _ => Err(SessionError::InvalidState(
                "Cannot cancel a finished session".into(),
            )),
        }
    }

    /// Fails the attempt: password wiped, reminder untouched, inputs stay
    /// disabled until the user starts over.
    fn fail(&mut self, error: BackupError) {
        self.wipe_passwords();
        self.state = BackupState::Failed { error };
    }

    fn wipe_passwords(&mut self) {
        self.password.zeroize();
        self.confirmation.zeroize();
    }
}
