/// Vault access gate
///
/// A small state machine over three modes, driven by keypad digits:
/// - `Registration`: no PIN stored yet; the first complete 4-digit entry
///   becomes the stored PIN and satisfies the gate in the same breath.
/// - `Locked`: a PIN is stored; a matching 4-digit entry unlocks.
/// - `Unlocked`: the marketplace is reachable; `lock()` returns to `Locked`.
///
/// The digit buffer is a sub-state of Registration/Locked, never a mode of
/// its own. A mismatch raises a transient error flag that the UI flashes
/// for a short fixed window before the buffer resets.

use std::time::Duration;

use super::store::{CredentialStore, StoreError, PIN_KEY};

/// Stored PINs are exactly this many digits
pub const PIN_LEN: usize = 4;

/// How long the wrong-code flash stays up before the buffer resets
pub const ERROR_FLASH: Duration = Duration::from_millis(800);

/// The gate's three modes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateMode {
    /// No stored PIN; first complete entry registers one
    Registration,
    /// Stored PIN present, not yet matched this session
    Locked,
    /// Stored PIN matched; marketplace reachable
    Unlocked,
}

/// What a digit submission did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Digit accepted, buffer not yet complete
    Pending,
    /// Buffer already full (error flash in progress), digit dropped
    Ignored,
    /// Registration completed: PIN stored, gate satisfied
    Registered,
    /// Entered code matched the stored PIN
    Unlocked,
    /// Entered code did not match; error flag raised, caller should
    /// schedule `expire_error` after `ERROR_FLASH`
    Mismatch,
}

/// The PIN-gate state machine
#[derive(Debug)]
pub struct AccessGate {
    mode: GateMode,
    /// Known PIN, mirrored from the store (written once at registration)
    pin: Option<String>,
    /// Digits entered so far, at most `PIN_LEN`
    buffer: String,
    /// Wrong-code flash currently showing
    error: bool,
    /// Stamp for the raised flag so a stale expiry tick is a no-op
    error_epoch: u64,
}

impl AccessGate {
    /// Build the gate from the credential read at session start
    pub fn new(stored_pin: Option<String>) -> Self {
        let mode = if stored_pin.is_some() {
            GateMode::Locked
        } else {
            GateMode::Registration
        };

        AccessGate {
            mode,
            pin: stored_pin,
            buffer: String::new(),
            error: false,
            error_epoch: 0,
        }
    }

    pub fn mode(&self) -> GateMode {
        self.mode
    }

    pub fn is_unlocked(&self) -> bool {
        self.mode == GateMode::Unlocked
    }

    /// Digits entered so far
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Wrong-code flash currently showing
    pub fn has_error(&self) -> bool {
        self.error
    }

    /// Stamp of the currently raised flag, for scheduling its expiry
    pub fn error_epoch(&self) -> u64 {
        self.error_epoch
    }

    /// Feed one keypad digit into the buffer.
    ///
    /// When the fourth digit lands, the completion check fires
    /// synchronously: registration writes the store, a locked gate compares
    /// against the stored PIN. Digits beyond the fourth are dropped until
    /// the buffer is cleared.
    pub fn submit_digit(
        &mut self,
        digit: u8,
        store: &mut dyn CredentialStore,
    ) -> Result<SubmitOutcome, StoreError> {
        if digit > 9 || self.mode == GateMode::Unlocked {
            return Ok(SubmitOutcome::Ignored);
        }
        if self.buffer.len() >= PIN_LEN {
            return Ok(SubmitOutcome::Ignored);
        }

        self.buffer.push(char::from(b'0' + digit));
        if self.buffer.len() < PIN_LEN {
            return Ok(SubmitOutcome::Pending);
        }

        // Completion check
        match self.mode {
            GateMode::Registration => {
                store.set(PIN_KEY, &self.buffer)?;
                self.pin = Some(std::mem::take(&mut self.buffer));
                // First entry both sets and satisfies the gate; no
                // confirmatory re-entry is required.
                self.mode = GateMode::Unlocked;
                println!("🔐 Vault PIN registered");
                Ok(SubmitOutcome::Registered)
            }
            GateMode::Locked => {
                if self.pin.as_deref() == Some(self.buffer.as_str()) {
                    self.buffer.clear();
                    self.mode = GateMode::Unlocked;
                    Ok(SubmitOutcome::Unlocked)
                } else {
                    // Buffer stays full so further digits are ignored
                    // until the flash expires or the user clears it.
                    self.error = true;
                    self.error_epoch += 1;
                    Ok(SubmitOutcome::Mismatch)
                }
            }
            GateMode::Unlocked => unreachable!("digit rejected above"),
        }
    }

    /// Unconditionally empty the input buffer; mode is unchanged
    pub fn clear_buffer(&mut self) {
        self.buffer.clear();
    }

    /// Lower the wrong-code flash and reset the buffer.
    ///
    /// Called from the deferred timer scheduled on a mismatch; `epoch` is
    /// the stamp handed out when the flag was raised, so a tick belonging
    /// to an already superseded flash does nothing.
    pub fn expire_error(&mut self, epoch: u64) {
        if self.error && epoch == self.error_epoch {
            self.error = false;
            self.buffer.clear();
        }
    }

    /// Manual re-lock; only the Unlocked mode has anywhere to go back to.
    /// Never returns to Registration.
    pub fn lock(&mut self) {
        if self.mode == GateMode::Unlocked {
            self.mode = GateMode::Locked;
            self.buffer.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::store::MemoryStore;

    fn submit_all(gate: &mut AccessGate, store: &mut MemoryStore, digits: &[u8]) -> SubmitOutcome {
        let mut last = SubmitOutcome::Pending;
        for &d in digits {
            last = gate.submit_digit(d, store).unwrap();
        }
        last
    }

    #[test]
    fn test_fresh_session_starts_in_registration() {
        let gate = AccessGate::new(None);
        assert_eq!(gate.mode(), GateMode::Registration);
    }

    #[test]
    fn test_stored_pin_starts_locked() {
        let gate = AccessGate::new(Some("1234".to_string()));
        assert_eq!(gate.mode(), GateMode::Locked);
    }

    #[test]
    fn test_registration_stores_pin_and_satisfies_gate() {
        let mut store = MemoryStore::default();
        let mut gate = AccessGate::new(None);

        let outcome = submit_all(&mut gate, &mut store, &[5, 6, 7, 8]);

        assert_eq!(outcome, SubmitOutcome::Registered);
        assert_eq!(store.get(PIN_KEY).unwrap().as_deref(), Some("5678"));
        assert_eq!(gate.mode(), GateMode::Unlocked);
        assert_eq!(gate.buffer(), "");
    }

    #[test]
    fn test_matching_code_unlocks() {
        let mut store = MemoryStore::default();
        let mut gate = AccessGate::new(Some("1234".to_string()));

        let outcome = submit_all(&mut gate, &mut store, &[1, 2, 3, 4]);

        assert_eq!(outcome, SubmitOutcome::Unlocked);
        assert_eq!(gate.mode(), GateMode::Unlocked);
        assert_eq!(gate.buffer(), "");
    }

    #[test]
    fn test_mismatch_raises_flag_then_expiry_resets() {
        let mut store = MemoryStore::default();
        let mut gate = AccessGate::new(Some("1234".to_string()));

        let outcome = submit_all(&mut gate, &mut store, &[1, 2, 3, 5]);

        assert_eq!(outcome, SubmitOutcome::Mismatch);
        assert!(gate.has_error());
        assert_eq!(gate.mode(), GateMode::Locked);

        gate.expire_error(gate.error_epoch());
        assert!(!gate.has_error());
        assert_eq!(gate.buffer(), "");
        assert_eq!(gate.mode(), GateMode::Locked);
    }

    #[test]
    fn test_stale_error_expiry_is_a_noop() {
        let mut store = MemoryStore::default();
        let mut gate = AccessGate::new(Some("1234".to_string()));

        submit_all(&mut gate, &mut store, &[0, 0, 0, 0]);
        let first_epoch = gate.error_epoch();
        gate.expire_error(first_epoch);

        // Second wrong attempt raises a fresh flag
        submit_all(&mut gate, &mut store, &[9, 9, 9, 9]);
        assert!(gate.has_error());

        // The first attempt's tick must not clear the new flash
        gate.expire_error(first_epoch);
        assert!(gate.has_error());
    }

    #[test]
    fn test_buffer_never_exceeds_four_digits() {
        let mut store = MemoryStore::default();
        let mut gate = AccessGate::new(Some("1234".to_string()));

        for d in [1, 2, 3, 5, 6, 7, 8, 9] {
            let _ = gate.submit_digit(d, &mut store).unwrap();
            assert!(gate.buffer().len() <= PIN_LEN);
        }
        assert_eq!(gate.buffer(), "1235");
        assert_eq!(
            gate.submit_digit(4, &mut store).unwrap(),
            SubmitOutcome::Ignored
        );
    }

    #[test]
    fn test_clear_buffer_keeps_mode() {
        let mut store = MemoryStore::default();
        let mut gate = AccessGate::new(Some("1234".to_string()));

        submit_all(&mut gate, &mut store, &[1, 2]);
        gate.clear_buffer();

        assert_eq!(gate.buffer(), "");
        assert_eq!(gate.mode(), GateMode::Locked);
    }

    #[test]
    fn test_lock_returns_to_locked_never_registration() {
        let mut store = MemoryStore::default();
        let mut gate = AccessGate::new(None);

        submit_all(&mut gate, &mut store, &[5, 6, 7, 8]);
        assert_eq!(gate.mode(), GateMode::Unlocked);

        gate.lock();
        assert_eq!(gate.mode(), GateMode::Locked);

        // Locking again is a no-op
        gate.lock();
        assert_eq!(gate.mode(), GateMode::Locked);

        // And the freshly registered PIN opens it again
        let outcome = submit_all(&mut gate, &mut store, &[5, 6, 7, 8]);
        assert_eq!(outcome, SubmitOutcome::Unlocked);
    }
}
