//! LSM303AGR accelerometer/magnetometer driver
//!
//! Two I2C devices share one package:
//!
//! - accelerometer at 0x19: 100 Hz, high resolution, ±8 g (4 mg/LSB)
//! - magnetometer at 0x1E: continuous 10 Hz (150 nT/LSB)
//!
//! Reads check the status register first. A device with no fresh data
//! returns the previous value; before the first sample it reports
//! [`SensorError::NotReady`].

use embedded_hal::i2c::I2c;
use kinemux_core::traits::{Gesture, MotionSensor, SensorError, Vector3};

use super::gesture::GestureDetector;
use super::heading::compass_heading;

/// Accelerometer I2C address
pub const ACCEL_ADDR: u8 = 0x19;
/// Magnetometer I2C address
pub const MAG_ADDR: u8 = 0x1E;

/// Accelerometer sensitivity at ±8 g high resolution, mg per LSB
pub const ACCEL_MG_PER_LSB: i32 = 4;

/// Magnetometer sensitivity, nT per LSB
pub const MAG_NT_PER_LSB: i32 = 150;

mod reg {
    pub const WHO_AM_I_A: u8 = 0x0F;
    pub const CTRL_REG1_A: u8 = 0x20;
    pub const CTRL_REG4_A: u8 = 0x23;
    pub const STATUS_REG_A: u8 = 0x27;
    pub const OUT_X_L_A: u8 = 0x28;

    pub const WHO_AM_I_M: u8 = 0x4F;
    pub const CFG_REG_A_M: u8 = 0x60;
    pub const CFG_REG_C_M: u8 = 0x62;
    pub const STATUS_REG_M: u8 = 0x67;
    pub const OUTX_L_REG_M: u8 = 0x68;

    /// Set on a register address to auto-increment accelerometer reads
    pub const AUTO_INCREMENT: u8 = 0x80;
    /// XYZ data available bit in both status registers
    pub const ZYXDA: u8 = 1 << 3;

    pub const ACCEL_ID: u8 = 0x33;
    pub const MAG_ID: u8 = 0x40;

    /// ODR 100 Hz, normal power, XYZ enabled
    pub const CTRL_REG1_A_100HZ: u8 = 0x57;
    /// Block data update, ±8 g, high resolution
    pub const CTRL_REG4_A_HR_8G: u8 = 0xA8;
    /// Temperature compensation, 10 Hz, continuous mode
    pub const CFG_REG_A_M_10HZ: u8 = 0x80;
    /// Block data update
    pub const CFG_REG_C_M_BDU: u8 = 0x10;
}

pub struct Lsm303agr<I2C> {
    i2c: I2C,
    acc: Option<Vector3>,
    mag: Option<Vector3>,
    gestures: GestureDetector,
}

impl<I2C: I2c> Lsm303agr<I2C> {
    pub fn new(i2c: I2C) -> Self {
        Self {
            i2c,
            acc: None,
            mag: None,
            gestures: GestureDetector::new(),
        }
    }

    /// Verify both device IDs and start continuous conversion
    pub fn init(&mut self) -> Result<(), SensorError> {
        if self.read_reg(ACCEL_ADDR, reg::WHO_AM_I_A)? != reg::ACCEL_ID {
            return Err(SensorError::WrongDevice);
        }
        if self.read_reg(MAG_ADDR, reg::WHO_AM_I_M)? != reg::MAG_ID {
            return Err(SensorError::WrongDevice);
        }

        self.write_reg(ACCEL_ADDR, reg::CTRL_REG1_A, reg::CTRL_REG1_A_100HZ)?;
        self.write_reg(ACCEL_ADDR, reg::CTRL_REG4_A, reg::CTRL_REG4_A_HR_8G)?;
        self.write_reg(MAG_ADDR, reg::CFG_REG_A_M, reg::CFG_REG_A_M_10HZ)?;
        self.write_reg(MAG_ADDR, reg::CFG_REG_C_M, reg::CFG_REG_C_M_BDU)?;
        Ok(())
    }

    /// Give back the bus
    pub fn release(self) -> I2C {
        self.i2c
    }

    fn read_reg(&mut self, addr: u8, reg: u8) -> Result<u8, SensorError> {
        let mut buf = [0u8; 1];
        self.i2c
            .write_read(addr, &[reg], &mut buf)
            .map_err(|_| SensorError::Bus)?;
        Ok(buf[0])
    }

    fn write_reg(&mut self, addr: u8, reg: u8, value: u8) -> Result<(), SensorError> {
        self.i2c
            .write(addr, &[reg, value])
            .map_err(|_| SensorError::Bus)
    }

    fn read_raw(&mut self, addr: u8, reg: u8) -> Result<[i16; 3], SensorError> {
        let mut buf = [0u8; 6];
        self.i2c
            .write_read(addr, &[reg], &mut buf)
            .map_err(|_| SensorError::Bus)?;
        Ok([
            i16::from_le_bytes([buf[0], buf[1]]),
            i16::from_le_bytes([buf[2], buf[3]]),
            i16::from_le_bytes([buf[4], buf[5]]),
        ])
    }

    fn data_ready(&mut self, addr: u8, status: u8) -> Result<bool, SensorError> {
        Ok(self.read_reg(addr, status)? & reg::ZYXDA != 0)
    }
}

impl<I2C: I2c> MotionSensor for Lsm303agr<I2C> {
    fn acceleration(&mut self) -> Result<Vector3, SensorError> {
        if self.data_ready(ACCEL_ADDR, reg::STATUS_REG_A)? {
            let raw = self.read_raw(ACCEL_ADDR, reg::OUT_X_L_A | reg::AUTO_INCREMENT)?;
            // 12-bit left-justified
            let acc = Vector3::new(
                (raw[0] >> 4) as i32 * ACCEL_MG_PER_LSB,
                (raw[1] >> 4) as i32 * ACCEL_MG_PER_LSB,
                (raw[2] >> 4) as i32 * ACCEL_MG_PER_LSB,
            );
            self.gestures.update(acc);
            self.acc = Some(acc);
        }
        self.acc.ok_or(SensorError::NotReady)
    }

    fn magnetic_field(&mut self) -> Result<Vector3, SensorError> {
        if self.data_ready(MAG_ADDR, reg::STATUS_REG_M)? {
            let raw = self.read_raw(MAG_ADDR, reg::OUTX_L_REG_M)?;
            self.mag = Some(Vector3::new(
                raw[0] as i32 * MAG_NT_PER_LSB,
                raw[1] as i32 * MAG_NT_PER_LSB,
                raw[2] as i32 * MAG_NT_PER_LSB,
            ));
        }
        self.mag.ok_or(SensorError::NotReady)
    }

    fn heading(&mut self) -> Result<u16, SensorError> {
        match (self.acc, self.mag) {
            (Some(acc), Some(mag)) => Ok(compass_heading(acc, mag)),
            _ => Err(SensorError::NotReady),
        }
    }

    fn gesture(&mut self) -> Gesture {
        self.gestures.current()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use embedded_hal::i2c::{ErrorType, Operation};

    /// Register file for both devices; reads auto-increment from the
    /// addressed register.
    struct FakeBus {
        accel: [u8; 0x80],
        mag: [u8; 0x80],
        writes: u8,
    }

    impl FakeBus {
        fn new() -> Self {
            let mut accel = [0u8; 0x80];
            let mut mag = [0u8; 0x80];
            accel[reg::WHO_AM_I_A as usize] = reg::ACCEL_ID;
            mag[reg::WHO_AM_I_M as usize] = reg::MAG_ID;
            Self {
                accel,
                mag,
                writes: 0,
            }
        }

        fn bank(&mut self, addr: u8) -> &mut [u8; 0x80] {
            match addr {
                ACCEL_ADDR => &mut self.accel,
                MAG_ADDR => &mut self.mag,
                _ => panic!("unexpected address {addr:#x}"),
            }
        }

        fn load_accel(&mut self, xyz: [i16; 3]) {
            self.accel[reg::STATUS_REG_A as usize] = reg::ZYXDA;
            for (i, v) in xyz.iter().enumerate() {
                let b = v.to_le_bytes();
                self.accel[reg::OUT_X_L_A as usize + 2 * i] = b[0];
                self.accel[reg::OUT_X_L_A as usize + 2 * i + 1] = b[1];
            }
        }

        fn load_mag(&mut self, xyz: [i16; 3]) {
            self.mag[reg::STATUS_REG_M as usize] = reg::ZYXDA;
            for (i, v) in xyz.iter().enumerate() {
                let b = v.to_le_bytes();
                self.mag[reg::OUTX_L_REG_M as usize + 2 * i] = b[0];
                self.mag[reg::OUTX_L_REG_M as usize + 2 * i + 1] = b[1];
            }
        }
    }

    impl ErrorType for FakeBus {
        type Error = Infallible;
    }

    impl I2c for FakeBus {
        fn transaction(
            &mut self,
            address: u8,
            operations: &mut [Operation<'_>],
        ) -> Result<(), Infallible> {
            let mut pointer = 0usize;
            for op in operations {
                match op {
                    Operation::Write(bytes) => {
                        pointer = (bytes[0] & !reg::AUTO_INCREMENT) as usize;
                        if let Some(&value) = bytes.get(1) {
                            self.bank(address)[pointer] = value;
                            self.writes += 1;
                        }
                    }
                    Operation::Read(buf) => {
                        let bank = self.bank(address);
                        for (i, b) in buf.iter_mut().enumerate() {
                            *b = bank[pointer + i];
                        }
                        // Reading the outputs clears data-ready
                        if pointer == reg::OUT_X_L_A as usize
                            || pointer == reg::OUTX_L_REG_M as usize
                        {
                            bank[pointer - 1] = 0;
                        }
                    }
                }
            }
            Ok(())
        }
    }

    #[test]
    fn test_init_configures_both_devices() {
        let mut sensor = Lsm303agr::new(FakeBus::new());
        sensor.init().unwrap();
        let bus = sensor.release();
        assert_eq!(bus.writes, 4);
        assert_eq!(bus.accel[reg::CTRL_REG1_A as usize], 0x57);
        assert_eq!(bus.accel[reg::CTRL_REG4_A as usize], 0xA8);
        assert_eq!(bus.mag[reg::CFG_REG_A_M as usize], 0x80);
    }

    #[test]
    fn test_init_rejects_wrong_device() {
        let mut bus = FakeBus::new();
        bus.accel[reg::WHO_AM_I_A as usize] = 0x00;
        let mut sensor = Lsm303agr::new(bus);
        assert_eq!(sensor.init(), Err(SensorError::WrongDevice));
    }

    #[test]
    fn test_not_ready_before_first_sample() {
        let mut sensor = Lsm303agr::new(FakeBus::new());
        assert_eq!(sensor.acceleration(), Err(SensorError::NotReady));
        assert_eq!(sensor.magnetic_field(), Err(SensorError::NotReady));
        assert_eq!(sensor.heading(), Err(SensorError::NotReady));
    }

    #[test]
    fn test_scaling_and_stale_reads() {
        let mut bus = FakeBus::new();
        // -144 mg, 16 mg, -992 mg at 4 mg/LSB, left-justified by 4 bits
        bus.load_accel([-36 << 4, 4 << 4, -248 << 4]);
        bus.load_mag([33, 18, 259]);
        let mut sensor = Lsm303agr::new(bus);

        let acc = sensor.acceleration().unwrap();
        assert_eq!(acc, Vector3::new(-144, 16, -992));
        assert_eq!(
            sensor.magnetic_field().unwrap(),
            Vector3::new(4950, 2700, 38850)
        );

        // Data-ready cleared: previous values are returned
        assert_eq!(sensor.acceleration().unwrap(), acc);
        assert!(sensor.heading().unwrap() < 360);
    }

    #[test]
    fn test_full_scale_reaches_impact_gestures() {
        let mut bus = FakeBus::new();
        // 7 g on X: beyond the 6 g impact threshold
        bus.load_accel([1750 << 4, 0, 0]);
        let mut sensor = Lsm303agr::new(bus);

        assert_eq!(sensor.acceleration().unwrap(), Vector3::new(7000, 0, 0));
        assert_eq!(sensor.gesture(), Gesture::SixG);
    }
}
