//! Mode button input
//!
//! Only the press edge (released → pressed) advances the mode; holding
//! the button down does not repeat.

use kinemux_hal::gpio::{ActiveLow, InputPin};

/// Momentary push-button
pub trait Button {
    /// Check if the button is currently held down
    fn is_pressed(&mut self) -> bool;
}

impl<P: InputPin> Button for ActiveLow<P> {
    fn is_pressed(&mut self) -> bool {
        ActiveLow::is_pressed(self)
    }
}

/// Press-edge detector
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PressEdge {
    was_pressed: bool,
}

impl PressEdge {
    pub const fn new() -> Self {
        Self { was_pressed: false }
    }

    /// Feed the current level; returns true on a released → pressed edge
    pub fn update(&mut self, pressed: bool) -> bool {
        let edge = pressed && !self.was_pressed;
        self.was_pressed = pressed;
        edge
    }
}
