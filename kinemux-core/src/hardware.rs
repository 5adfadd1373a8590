//! Hardware context
//!
//! Every peripheral the modes touch, owned in one place for the life of
//! the process. The event loop is the only user, so `&mut Hardware` is
//! the whole access discipline; there is nothing to lock.

/// Board peripherals used by the mode logic
///
/// - `B`: mode button ([`crate::input::Button`])
/// - `S`: accelerometer / magnetometer ([`crate::traits::MotionSensor`])
/// - `C`: uptime clock ([`crate::traits::Clock`])
/// - `R`: packet radio ([`kinemux_hal::Radio`])
/// - `U`: serial link ([`kinemux_hal::UartTx`])
/// - `D`: LED matrix ([`crate::traits::LedMatrix`])
pub struct Hardware<B, S, C, R, U, D> {
    pub button: B,
    pub sensor: S,
    pub clock: C,
    pub radio: R,
    pub serial: U,
    pub display: D,
}

impl<B, S, C, R, U, D> Hardware<B, S, C, R, U, D> {
    pub fn new(button: B, sensor: S, clock: C, radio: R, serial: U, display: D) -> Self {
        Self {
            button,
            sensor,
            clock,
            radio,
            serial,
            display,
        }
    }
}
