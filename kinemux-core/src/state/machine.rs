//! State machine definition

use super::events::Event;
use crate::config::Mode;

/// Runtime state of the active mode
///
/// Created fresh on every mode entry. The counter decides whether the
/// CSV header is still owed and drives the display pulse phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Session {
    pub mode: Mode,
    /// Records delivered in this session
    pub counter: u32,
}

impl Session {
    pub const fn new(mode: Mode) -> Self {
        Self { mode, counter: 0 }
    }

    /// Check if the next record is the first of the session
    pub const fn header_pending(&self) -> bool {
        self.counter == 0
    }
}

/// Loop states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum State {
    /// Before the first iteration; no mode configured
    Uninitialized,
    /// Exactly one session running
    Active(Session),
}

impl State {
    /// The running session, if any
    pub fn session(&self) -> Option<&Session> {
        match self {
            State::Active(s) => Some(s),
            State::Uninitialized => None,
        }
    }

    /// Process an event and return the next state
    pub fn transition(self, event: Event) -> Self {
        match (self, event) {
            // Any mode entry replaces the session, resetting the counter
            (_, Event::ModeEntered(mode)) => State::Active(Session::new(mode)),

            // Wraps to 1, not 0: zero means the header is still owed
            (State::Active(s), Event::RecordDelivered) => State::Active(Session {
                mode: s.mode,
                counter: s.counter.checked_add(1).unwrap_or(1),
            }),

            // Nothing can be delivered before a mode exists
            (State::Uninitialized, Event::RecordDelivered) => State::Uninitialized,
        }
    }
}
