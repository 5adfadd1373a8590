//! Line streaming from the serial port to an output sink
//!
//! Lines are decoded lossily (invalid UTF-8 becomes U+FFFD) and flushed
//! as soon as they are complete. Read timeouts and interrupted reads are
//! transient; anything else ends the stream with an error.

use std::io::{self, BufRead, BufReader, ErrorKind, Read, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use log::{debug, warn};
use serialport::SerialPort;

use crate::error::ReceiverError;

/// Baud rate the firmware uses for the host link
pub const DEFAULT_BAUD: u32 = 115_200;

/// Poll period for the serial read, bounding Ctrl-C latency
pub const READ_POLL: Duration = Duration::from_millis(250);

/// Totals for one streaming run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreamStats {
    /// Complete lines written
    pub lines: u64,
    /// Bytes written, including any trailing partial line
    pub bytes: u64,
    /// Idle periods that reached the warning threshold
    pub idle_warnings: u64,
}

/// Open a serial port (8N1) with a short poll timeout
pub fn open_port(port: &str, baud: u32) -> Result<Box<dyn SerialPort>, ReceiverError> {
    serialport::new(port, baud)
        .timeout(READ_POLL)
        .open()
        .map_err(|source| ReceiverError::Open {
            port: port.to_string(),
            source,
        })
}

/// Copy newline-terminated lines from `reader` to `out`
///
/// Runs until `reader` reports end of input, `shutdown` is set, or an
/// unrecoverable error occurs. A warning is logged each time no data has
/// arrived for `idle_timeout`. The reader is consumed and dropped on
/// every return path.
pub fn stream_lines<R, W>(
    reader: R,
    out: &mut W,
    shutdown: &AtomicBool,
    idle_timeout: Duration,
) -> Result<StreamStats, ReceiverError>
where
    R: Read,
    W: Write + ?Sized,
{
    let mut reader = BufReader::new(reader);
    let mut stats = StreamStats::default();
    let mut pending: Vec<u8> = Vec::new();
    let mut last_data = Instant::now();

    while !shutdown.load(Ordering::SeqCst) {
        match reader.read_until(b'\n', &mut pending) {
            Ok(0) => {
                debug!("End of input");
                break;
            }
            Ok(_) => {
                last_data = Instant::now();
                if pending.ends_with(b"\n") {
                    emit(out, &pending, &mut stats)?;
                    stats.lines += 1;
                    pending.clear();
                }
            }
            Err(e) if is_transient(&e) => {
                if last_data.elapsed() >= idle_timeout {
                    warn!("No data for {} ms", idle_timeout.as_millis());
                    stats.idle_warnings += 1;
                    last_data = Instant::now();
                }
            }
            Err(e) => return Err(ReceiverError::Read(e)),
        }
    }

    if !pending.is_empty() {
        emit(out, &pending, &mut stats)?;
    }
    Ok(stats)
}

fn is_transient(e: &io::Error) -> bool {
    matches!(e.kind(), ErrorKind::TimedOut | ErrorKind::Interrupted | ErrorKind::WouldBlock)
}

fn emit<W: Write + ?Sized>(out: &mut W, bytes: &[u8], stats: &mut StreamStats) -> Result<(), ReceiverError> {
    let text = String::from_utf8_lossy(bytes);
    out.write_all(text.as_bytes()).map_err(ReceiverError::Write)?;
    out.flush().map_err(ReceiverError::Write)?;
    stats.bytes += text.len() as u64;
    Ok(())
}
