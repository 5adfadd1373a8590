//! Mode controller
//!
//! Owns the current mode and re-establishes the hardware configuration
//! on every mode entry. Radio and display power are set explicitly each
//! time, never left over from the previous mode.

use kinemux_hal::{Radio, RadioConfig, UartConfig, UartTx};

use crate::config::{Mode, ModeSpec, ModeTable};
use crate::hardware::Hardware;
use crate::traits::LedMatrix;

/// Mode controller
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ModeController {
    table: ModeTable,
    current: Option<Mode>,
    radio_config: RadioConfig,
    uart_config: UartConfig,
}

impl ModeController {
    /// Create a controller; no mode is active until the first [`advance`](Self::advance)
    pub fn new(table: ModeTable) -> Self {
        Self {
            table,
            current: None,
            radio_config: RadioConfig::default(),
            uart_config: UartConfig::default(),
        }
    }

    /// Currently active mode, `None` before the first advance
    pub fn current(&self) -> Option<Mode> {
        self.current
    }

    /// Spec of the currently active mode
    pub fn current_spec(&self) -> Option<&ModeSpec> {
        self.current.and_then(|m| self.table.get(m))
    }

    /// Switch to the next mode and reconfigure the hardware for it
    ///
    /// From no mode this enters the table's first mode (idle).
    pub fn advance<B, S, C, R, U, D>(&mut self, hw: &mut Hardware<B, S, C, R, U, D>) -> ModeSpec
    where
        R: Radio,
        U: UartTx,
        D: LedMatrix,
    {
        let spec = *self.table.next_after(self.current);
        self.apply(&spec, hw);
        self.current = Some(spec.mode);
        spec
    }

    fn apply<B, S, C, R, U, D>(&self, spec: &ModeSpec, hw: &mut Hardware<B, S, C, R, U, D>)
    where
        R: Radio,
        U: UartTx,
        D: LedMatrix,
    {
        if spec.uses_radio() {
            hw.radio.configure(&self.radio_config);
            hw.radio.power_on();
        } else {
            hw.radio.power_off();
        }

        if spec.uses_serial() {
            hw.serial.configure(&self.uart_config);
        }

        match &spec.icon {
            Some(icon) => {
                hw.display.power_on();
                hw.display.show(icon);
            }
            None => hw.display.power_off(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{fake_hardware, TestHardware};
    use crate::traits::icons;
    use kinemux_hal::RADIO_MAX_PAYLOAD;

    fn advance_to(ctrl: &mut ModeController, hw: &mut TestHardware, mode: Mode) {
        for _ in 0..8 {
            if ctrl.advance(hw).mode == mode {
                return;
            }
        }
        panic!("mode {:?} never reached", mode);
    }

    #[test]
    fn test_first_advance_enters_idle() {
        let mut hw = fake_hardware();
        let mut ctrl = ModeController::new(ModeTable::canonical());
        assert_eq!(ctrl.current(), None);

        let spec = ctrl.advance(&mut hw);
        assert_eq!(spec.mode, Mode::Idle);
        assert_eq!(ctrl.current(), Some(Mode::Idle));
        assert!(!hw.radio.on);
        assert!(!hw.display.on);
        assert!(hw.serial.config.is_none());
    }

    #[test]
    fn test_relay_powers_radio_and_serial() {
        let mut hw = fake_hardware();
        let mut ctrl = ModeController::new(ModeTable::canonical());
        advance_to(&mut ctrl, &mut hw, Mode::Relay);

        assert!(hw.radio.on);
        let radio_cfg = hw.radio.config.unwrap();
        assert_eq!(radio_cfg.max_payload_len as usize, RADIO_MAX_PAYLOAD);
        assert_eq!(hw.serial.config.unwrap().baudrate, 115_200);
        assert!(hw.display.on);
        assert_eq!(hw.display.shown.last(), Some(&icons::HEART));
    }

    #[test]
    fn test_leaving_radio_mode_powers_radio_off() {
        let mut hw = fake_hardware();
        let mut ctrl = ModeController::new(ModeTable::canonical());
        advance_to(&mut ctrl, &mut hw, Mode::Relay);
        assert!(hw.radio.on);

        // relay -> log: log uses neither radio source nor sink
        assert_eq!(ctrl.advance(&mut hw).mode, Mode::Log);
        assert!(!hw.radio.on);
        assert_eq!(hw.display.shown.last(), Some(&icons::ARROW_S));

        // log -> transmit: radio back on with the fixed configuration
        assert_eq!(ctrl.advance(&mut hw).mode, Mode::Transmit);
        assert!(hw.radio.on);
        assert_eq!(hw.radio.config.unwrap().max_payload_len, 100);

        // transmit -> idle: everything dark
        assert_eq!(ctrl.advance(&mut hw).mode, Mode::Idle);
        assert!(!hw.radio.on);
        assert!(!hw.display.on);
    }

    #[test]
    fn test_current_spec_tracks_mode() {
        let mut hw = fake_hardware();
        let mut ctrl = ModeController::new(ModeTable::canonical());
        assert!(ctrl.current_spec().is_none());
        ctrl.advance(&mut hw);
        ctrl.advance(&mut hw);
        assert_eq!(ctrl.current_spec().unwrap().mode, Mode::Relay);
        assert_eq!(ctrl.current_spec().unwrap().interval_ms, 5);
    }
}
