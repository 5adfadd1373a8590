//! Motion sensing

pub mod gesture;
pub mod heading;
pub mod lsm303agr;

pub use gesture::GestureDetector;
pub use heading::compass_heading;
pub use lsm303agr::Lsm303agr;
