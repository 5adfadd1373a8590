//! Mode table compiled into the firmware
//!
//! `build.rs` validates modes.toml and generates [`MODE_TABLE_CONFIG`].
//! Edit modes.toml and rebuild to change the cycle.

use defmt::*;
use kinemux_core::config::{Mode, ModeEntryConfig, ModeTable, ModeTableConfig};

include!(concat!(env!("OUT_DIR"), "/modes.rs"));

/// Build the runtime mode table
///
/// The build already rejected invalid tables; falls back to the
/// canonical cycle if validation somehow fails here.
pub fn mode_table() -> ModeTable {
    match ModeTable::from_config(&MODE_TABLE_CONFIG) {
        Ok(table) => table,
        Err(e) => {
            warn!("Mode table rejected ({}), using canonical cycle", e);
            ModeTable::canonical()
        }
    }
}

/// Log the active cycle
pub fn log_mode_table(table: &ModeTable) {
    for spec in table.iter() {
        info!("  {} every {} ms", spec.mode.name(), spec.interval_ms);
    }
}
