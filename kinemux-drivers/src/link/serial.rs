//! Serial link as a line queue

use core::convert::Infallible;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::channel::Channel;
use kinemux_core::record::RECORD_CAPACITY;
use kinemux_hal::{UartConfig, UartTx, SERIAL_BAUDRATE};

use super::{to_line, Line, LinkError};

/// Host serial link; a serial task drains `lines` onto the UART
///
/// The UART is built once at the fixed baud rate, so `configure` only
/// marks the link ready.
pub struct QueuedSerial<'a, M: RawMutex, const N: usize> {
    lines: &'a Channel<M, Line, N>,
    configured: bool,
}

impl<'a, M: RawMutex, const N: usize> QueuedSerial<'a, M, N> {
    pub fn new(lines: &'a Channel<M, Line, N>) -> Self {
        Self {
            lines,
            configured: false,
        }
    }
}

impl<M: RawMutex, const N: usize> UartTx for QueuedSerial<'_, M, N> {
    type Error = LinkError<Infallible>;

    fn configure(&mut self, config: &UartConfig) {
        if config.baudrate != SERIAL_BAUDRATE {
            #[cfg(feature = "defmt")]
            defmt::warn!(
                "UART fixed at {} baud, ignoring {}",
                SERIAL_BAUDRATE,
                config.baudrate
            );
        }
        self.configured = true;
    }

    fn write(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        if !self.configured {
            return Err(LinkError::NotConfigured);
        }
        let line = to_line::<Infallible>(data, RECORD_CAPACITY)?;
        self.lines.try_send(line).map_err(|_| LinkError::QueueFull)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_sync::blocking_mutex::raw::NoopRawMutex;

    #[test]
    fn test_write_before_configure_fails() {
        let lines: Channel<NoopRawMutex, Line, 2> = Channel::new();
        let mut serial = QueuedSerial::new(&lines);

        assert_eq!(serial.write(b"1\n"), Err(LinkError::NotConfigured));
        assert!(lines.is_empty());
    }

    #[test]
    fn test_write_queues_without_waiting() {
        let lines: Channel<NoopRawMutex, Line, 2> = Channel::new();
        let mut serial = QueuedSerial::new(&lines);
        serial.configure(&UartConfig::default());

        serial.write(b"1,2\n").unwrap();
        serial.write(b"3,4\n").unwrap();
        // Nobody is draining: the third line is refused, not waited on
        assert_eq!(serial.write(b"5,6\n"), Err(LinkError::QueueFull));

        assert_eq!(lines.try_receive().unwrap().as_slice(), b"1,2\n");
        assert_eq!(lines.try_receive().unwrap().as_slice(), b"3,4\n");
    }

    #[test]
    fn test_oversize_line_refused() {
        let lines: Channel<NoopRawMutex, Line, 2> = Channel::new();
        let mut serial = QueuedSerial::new(&lines);
        serial.configure(&UartConfig::default());

        let long = [b'9'; RECORD_CAPACITY + 1];
        assert_eq!(serial.write(&long), Err(LinkError::TooLong));
        assert!(lines.is_empty());
    }
}
