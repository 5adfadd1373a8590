//! Event loop state machine
//!
//! Explicit, finite and deterministic: the loop is either waiting for its
//! first iteration or running exactly one mode session.

pub mod events;
pub mod machine;

pub use events::Event;
pub use machine::{Session, State};
