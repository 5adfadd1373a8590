//! Embassy async tasks
//!
//! Each task runs independently and communicates via signals and channels.

pub mod matrix;
pub mod modes;
pub mod radio;
pub mod serial;

pub use matrix::matrix_task;
pub use modes::{mode_task, BoardHardware};
pub use radio::radio_task;
pub use serial::serial_task;
