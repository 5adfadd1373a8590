//! Display pulse feedback
//!
//! While data flows, the mode icon ramps from dark to full brightness
//! once every `steps` deliveries, so a glance at the board shows that
//! records are moving without needing a numeric display.

use crate::traits::{Image, LedMatrix};

/// Default number of brightness steps per ramp
pub const PULSE_STEPS: u32 = 10;

/// Brightness for the given delivery count, 0.0-1.0
///
/// `(counter mod steps) / (steps - 1)`; with fewer than two steps the
/// ramp degenerates to full brightness.
pub fn pulse_brightness(counter: u32, steps: u32) -> f32 {
    if steps < 2 {
        return 1.0;
    }
    (counter % steps) as f32 / (steps - 1) as f32
}

/// Pulsing icon renderer
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayFeedback {
    steps: u32,
}

impl Default for DisplayFeedback {
    fn default() -> Self {
        Self::new(PULSE_STEPS)
    }
}

impl DisplayFeedback {
    pub const fn new(steps: u32) -> Self {
        Self { steps }
    }

    pub fn steps(&self) -> u32 {
        self.steps
    }

    /// Show `icon` at the brightness for `counter`, or blank the display
    pub fn pulse<D: LedMatrix>(&self, display: &mut D, icon: Option<&Image>, counter: u32) {
        match icon {
            Some(icon) => display.show(&icon.scaled(pulse_brightness(counter, self.steps))),
            None => display.clear(),
        }
    }
}
