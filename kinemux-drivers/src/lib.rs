//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in kinemux-core for the micro:bit's onboard devices:
//!
//! - LSM303AGR accelerometer/magnetometer ([`sensor::Lsm303agr`])
//! - Tilt-compensated compass heading
//! - Gesture classification
//! - 5×5 LED matrix multiplexing with per-pixel brightness
//! - Queue front ends for the serial link and radio ([`link`])

#![no_std]
#![deny(unsafe_code)]

pub mod link;
pub mod matrix;
pub mod sensor;
