//! The control loop
//!
//! One call to [`EventLoop::step`] is one iteration: check the button
//! for a press edge, then either switch modes or pump one record from
//! the mode's source to its sink. The caller sleeps for the returned
//! duration and calls `step` again, forever.
//!
//! ```text
//!  Uninitialized ──first step──▶ Active(first mode)
//!  Active(m) ──press edge──▶ Active(next(m)), then debounce sleep
//!  Active(m) ──tick──▶ Active(m) [source → header? → record → pulse]
//! ```

use kinemux_hal::{Radio, UartTx, RADIO_MAX_PAYLOAD};

use crate::config::{Mode, ModeSpec, ModeTable, Sink, Source};
use crate::controller::ModeController;
use crate::feedback::DisplayFeedback;
use crate::hardware::Hardware;
use crate::input::{Button, PressEdge};
use crate::record::{read_record, Record, CSV_HEADER};
use crate::state::{Event, State};
use crate::traits::{Clock, LedMatrix, MotionSensor, SensorError};

/// Sleep after a mode switch, long enough to let go of the button
pub const DEBOUNCE_MS: u32 = 1000;

/// Why a source produced nothing usable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SourceFault {
    /// Sensor read failed
    Sensor(SensorError),
    /// Radio receive failed
    Radio,
    /// Received payload was not a UTF-8 line within the record capacity
    InvalidPayload,
}

/// What one iteration did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TickOutcome {
    /// A new session started in this mode
    ModeEntered(Mode),
    /// Source had nothing this tick
    NoData,
    /// Source failed; treated as no data
    SourceFault(SourceFault),
    /// A record went to the sink
    Delivered {
        /// Session counter after this delivery
        counter: u32,
        /// The CSV header preceded the record
        header_sent: bool,
        /// The sink reported an error (not retried)
        sink_failed: bool,
    },
}

/// Result of one iteration: what happened and how long to sleep
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickReport {
    pub outcome: TickOutcome,
    pub sleep_ms: u32,
}

/// Mode state machine plus data pump
pub struct EventLoop {
    controller: ModeController,
    state: State,
    edge: PressEdge,
    feedback: DisplayFeedback,
}

impl EventLoop {
    pub fn new(table: ModeTable) -> Self {
        Self {
            controller: ModeController::new(table),
            state: State::Uninitialized,
            edge: PressEdge::new(),
            feedback: DisplayFeedback::default(),
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn current_mode(&self) -> Option<Mode> {
        self.controller.current()
    }

    /// Run one iteration
    pub fn step<B, S, C, R, U, D>(&mut self, hw: &mut Hardware<B, S, C, R, U, D>) -> TickReport
    where
        B: Button,
        S: MotionSensor,
        C: Clock,
        R: Radio,
        U: UartTx,
        D: LedMatrix,
    {
        // Edge check comes first so a switch always lands between records
        let pressed = self.edge.update(hw.button.is_pressed());

        match (self.state, self.controller.current_spec().copied()) {
            (State::Active(session), Some(spec)) if !pressed => {
                let outcome = self.pump(&spec, session.header_pending(), hw);
                TickReport {
                    outcome,
                    sleep_ms: spec.interval_ms,
                }
            }
            _ => {
                let spec = self.controller.advance(hw);
                self.state = self.state.transition(Event::ModeEntered(spec.mode));
                TickReport {
                    outcome: TickOutcome::ModeEntered(spec.mode),
                    sleep_ms: DEBOUNCE_MS,
                }
            }
        }
    }

    fn pump<B, S, C, R, U, D>(
        &mut self,
        spec: &ModeSpec,
        header_pending: bool,
        hw: &mut Hardware<B, S, C, R, U, D>,
    ) -> TickOutcome
    where
        S: MotionSensor,
        C: Clock,
        R: Radio,
        U: UartTx,
        D: LedMatrix,
    {
        let record = match fetch(spec.source, hw) {
            Ok(Some(record)) => record,
            Ok(None) => return TickOutcome::NoData,
            Err(fault) => return TickOutcome::SourceFault(fault),
        };

        let mut sink_ok = true;
        if header_pending {
            sink_ok &= deliver(spec.sink, hw, CSV_HEADER.as_bytes());
        }
        sink_ok &= deliver(spec.sink, hw, record.as_bytes());

        self.state = self.state.transition(Event::RecordDelivered);
        let counter = self.state.session().map_or(0, |s| s.counter);
        self.feedback
            .pulse(&mut hw.display, spec.icon.as_ref(), counter);

        TickOutcome::Delivered {
            counter,
            header_sent: header_pending,
            sink_failed: !sink_ok,
        }
    }
}

/// Run a source operation
fn fetch<B, S, C, R, U, D>(
    source: Source,
    hw: &mut Hardware<B, S, C, R, U, D>,
) -> Result<Option<Record>, SourceFault>
where
    S: MotionSensor,
    C: Clock,
    R: Radio,
{
    match source {
        Source::Nothing => Ok(None),
        Source::Sensors => match read_record(&mut hw.sensor, &hw.clock) {
            Ok(record) => Ok(Some(record)),
            Err(SensorError::NotReady) => Ok(None),
            Err(e) => Err(SourceFault::Sensor(e)),
        },
        Source::RadioReceive => {
            let mut buf = [0u8; RADIO_MAX_PAYLOAD];
            match hw.radio.receive(&mut buf) {
                Ok(Some(len)) if len > buf.len() => Err(SourceFault::InvalidPayload),
                Ok(Some(len)) => Record::from_bytes(&buf[..len])
                    .map(Some)
                    .ok_or(SourceFault::InvalidPayload),
                Ok(None) => Ok(None),
                Err(_) => Err(SourceFault::Radio),
            }
        }
    }
}

/// Run a sink operation; returns false if the sink reported an error
fn deliver<B, S, C, R, U, D>(sink: Sink, hw: &mut Hardware<B, S, C, R, U, D>, payload: &[u8]) -> bool
where
    R: Radio,
    U: UartTx,
{
    match sink {
        Sink::Discard => true,
        Sink::Serial => hw.serial.write(payload).is_ok(),
        Sink::RadioSend => hw.radio.send(payload).is_ok(),
    }
}
