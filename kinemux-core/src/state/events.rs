//! Events that trigger state transitions

use crate::config::Mode;

/// Events that can trigger state transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// Mode controller entered a mode (boot or button press)
    ModeEntered(Mode),
    /// A record was handed to the current mode's sink
    RecordDelivered,
}
