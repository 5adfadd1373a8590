//! kinemux-receiver: stream CSV lines from a micro:bit to stdout or a file
//!
//! ```text
//! $ kinemux-receiver > data.csv
//! $ kinemux-receiver --serial-number 9904360258994e45 --output data.csv
//! ```
//!
//! Diagnostics go to stderr (`RUST_LOG` overrides the default `info`).

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Context};
use clap::Parser;
use log::{error, info};

use kinemux_receiver::{
    find_device, list_ports, open_port, stream_lines, DeviceMatcher, DEFAULT_BAUD,
    DEFAULT_PRODUCT,
};

#[derive(Parser, Debug)]
#[command(version, about = "Stream CSV lines from a micro:bit's USB serial port")]
struct Args {
    /// Serial port to open, skipping discovery
    #[arg(long)]
    port: Option<String>,

    /// Substring of the USB product descriptor to match
    #[arg(long, default_value = DEFAULT_PRODUCT)]
    product: String,

    /// Only accept the board with this USB serial number
    #[arg(long)]
    serial_number: Option<String>,

    /// Baud rate
    #[arg(long, default_value_t = DEFAULT_BAUD)]
    baud: u32,

    /// Warn after this many milliseconds without data
    #[arg(long, default_value_t = 20_000)]
    timeout_ms: u64,

    /// Write lines to this file instead of stdout
    #[arg(long, short)]
    output: Option<PathBuf>,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> anyhow::Result<()> {
    let port_name = match &args.port {
        Some(port) => port.clone(),
        None => discover(args)?,
    };

    let shutdown = Arc::new(AtomicBool::new(false));
    {
        let shutdown = Arc::clone(&shutdown);
        ctrlc::set_handler(move || shutdown.store(true, Ordering::SeqCst))
            .context("installing Ctrl-C handler")?;
    }

    let port = open_port(&port_name, args.baud)?;
    info!("Streaming from {} at {} baud", port_name, args.baud);

    let idle = Duration::from_millis(args.timeout_ms);
    let mut out: Box<dyn Write> = match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("creating {}", path.display()))?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(io::stdout().lock()),
    };

    // The port is moved in and dropped on every return path
    let stats = stream_lines(port, &mut *out, &shutdown, idle)?;

    if shutdown.load(Ordering::SeqCst) {
        info!("Interrupted");
    }
    info!("Stopped after {} lines ({} bytes)", stats.lines, stats.bytes);
    Ok(())
}

fn discover(args: &Args) -> anyhow::Result<String> {
    let entries = list_ports()?;
    let matcher = DeviceMatcher::new(args.product.as_str())
        .with_serial_number(args.serial_number.clone());

    find_device(&entries, &matcher)
        .map(|entry| entry.device.clone())
        .ok_or_else(|| anyhow!("Unable to find a micro:bit on any USB port"))
}
