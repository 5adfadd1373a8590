//! LED matrix driving

pub mod scanner;

pub use scanner::{MatrixScanner, SCAN_SLOTS};
