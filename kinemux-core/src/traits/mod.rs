//! Device traits
//!
//! These traits define the interface between the mode logic and the
//! board's onboard devices. Chip-level peripherals (UART, radio, GPIO)
//! come from `kinemux-hal`.

pub mod display;
pub mod sensor;

pub use display::{icons, Image, LedMatrix, MATRIX_SIZE, MAX_BRIGHTNESS};
pub use sensor::{Clock, Gesture, MotionSensor, SensorError, Vector3};
