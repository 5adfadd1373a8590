//! Build script for kinemux-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates modes.toml at compile time
//! - Generates the mode table constant compiled into the firmware

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use kinemux_core::config::{ModeTable, ModeTableConfig};

fn main() {
    setup_linker();
    let config = validate_config();
    generate_mode_table(&config);
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Parse and validate modes.toml
fn validate_config() -> ModeTableConfig {
    println!("cargo:rerun-if-changed=modes.toml");

    let config_path = Path::new("modes.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: modes.toml not found!                                    ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a modes.toml mode table.                  ║\n\
            ║  Please create one in the kinemux-firmware directory.            ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read modes.toml                                ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let config: ModeTableConfig = match toml::from_str(&content) {
        Ok(config) => config,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid mode table in modes.toml                         ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&e.to_string())
            );
        }
    };

    if let Err(e) = ModeTable::from_config(&config) {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Mode table rejected                                      ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            format_error_lines(&e.to_string())
        );
    }

    println!("cargo:warning=modes.toml validated successfully");
    config
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Write `modes.rs` into OUT_DIR for `config.rs` to include
fn generate_mode_table(config: &ModeTableConfig) {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    let entries = config
        .modes
        .iter()
        .map(|entry| {
            format!(
                "        ModeEntryConfig {{ mode: Mode::{:?}, interval_ms: {} }},",
                entry.mode, entry.interval_ms
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let source = format!(
        "/// Mode table from modes.toml\n\
         pub const MODE_TABLE_CONFIG: ModeTableConfig = ModeTableConfig {{\n    \
             modes: [\n{}\n    ],\n\
         }};\n",
        entries
    );

    fs::write(out_dir.join("modes.rs"), source).unwrap();
}
