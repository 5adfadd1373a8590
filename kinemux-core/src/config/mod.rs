//! Configuration types
//!
//! The mode table is the only configuration input. It is fixed at build
//! time and validated once at boot.

pub mod modes;

pub use modes::{
    ConfigError, Mode, ModeEntryConfig, ModeSpec, ModeTable, ModeTableConfig, Sink, Source,
    MODE_COUNT,
};
