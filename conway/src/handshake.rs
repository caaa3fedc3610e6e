// handshake.rs - Zero-capacity rendezvous shared by the update and render sides
//
// A deposit blocks until the other side withdraws it, so the two sides
// alternate strictly: update sends "ready", render takes it, paints, sends
// the acknowledgement, update takes that and moves on.

use parking_lot::{Condvar, Mutex};

use crate::error::HandshakeError;

#[derive(Debug, Default)]
struct Slot {
    deposits: u64,
    withdrawals: u64,
    interrupted: bool,
    closed: bool,
}

impl Slot {
    fn pending(&self) -> bool {
        self.deposits > self.withdrawals
    }

    fn check(&self) -> Result<(), HandshakeError> {
        if self.closed {
            Err(HandshakeError::Closed)
        } else if self.interrupted {
            Err(HandshakeError::Interrupted)
        } else {
            Ok(())
        }
    }
}

#[derive(Debug, Default)]
pub struct Rendezvous {
    slot: Mutex<Slot>,
    signal: Condvar,
}

impl Rendezvous {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deposits a token and blocks until the other side has withdrawn it.
    /// On interrupt or close the token is taken back before returning.
    pub fn send(&self) -> Result<(), HandshakeError> {
        let mut slot = self.slot.lock();
        slot.check()?;
        while slot.pending() {
            self.signal.wait(&mut slot);
            slot.check()?;
        }

        slot.deposits += 1;
        let ticket = slot.deposits;
        self.signal.notify_all();

        while slot.withdrawals < ticket {
            if let Err(e) = slot.check() {
                slot.deposits -= 1;
                return Err(e);
            }
            self.signal.wait(&mut slot);
        }
        Ok(())
    }

    /// Blocks until a token is available and withdraws it.
    pub fn recv(&self) -> Result<(), HandshakeError> {
        let mut slot = self.slot.lock();
        loop {
            slot.check()?;
            if slot.pending() {
                break;
            }
            self.signal.wait(&mut slot);
        }
        slot.withdrawals += 1;
        self.signal.notify_all();
        Ok(())
    }

    /// Wakes every waiter and fails all later operations with
    /// [`HandshakeError::Interrupted`].
    pub fn interrupt(&self) {
        let mut slot = self.slot.lock();
        slot.interrupted = true;
        self.signal.notify_all();
    }

    /// Hangs up for good. Returns `true` only for the call that closed it.
    pub fn close(&self) -> bool {
        let mut slot = self.slot.lock();
        let first = !slot.closed;
        slot.closed = true;
        self.signal.notify_all();
        first
    }

    pub fn is_closed(&self) -> bool {
        self.slot.lock().closed
    }

    pub fn is_interrupted(&self) -> bool {
        self.slot.lock().interrupted
    }
}
