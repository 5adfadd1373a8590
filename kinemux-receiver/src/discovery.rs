//! Serial port discovery
//!
//! Matches USB serial ports by product descriptor substring and,
//! optionally, by the board's USB serial number.

use log::{debug, info};
use serialport::{SerialPortInfo, SerialPortType};

use crate::error::ReceiverError;

/// Product descriptor substring of the micro:bit interface chip
pub const DEFAULT_PRODUCT: &str = "CMSIS-DAP";

/// One enumerated serial port
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortEntry {
    /// OS device path, e.g. `/dev/ttyACM0` or `COM3`
    pub device: String,
    /// USB product string, if the port is a USB device
    pub product: Option<String>,
    /// USB serial number, if the port is a USB device
    pub serial_number: Option<String>,
}

impl PortEntry {
    pub fn new(device: impl Into<String>) -> Self {
        Self {
            device: device.into(),
            product: None,
            serial_number: None,
        }
    }

    pub fn with_product(mut self, product: impl Into<String>) -> Self {
        self.product = Some(product.into());
        self
    }

    pub fn with_serial_number(mut self, serial_number: impl Into<String>) -> Self {
        self.serial_number = Some(serial_number.into());
        self
    }

    /// Human-readable description for logs
    pub fn description(&self) -> &str {
        self.product.as_deref().unwrap_or("n/a")
    }
}

impl From<SerialPortInfo> for PortEntry {
    fn from(info: SerialPortInfo) -> Self {
        match info.port_type {
            SerialPortType::UsbPort(usb) => Self {
                device: info.port_name,
                product: usb.product,
                serial_number: usb.serial_number,
            },
            _ => Self::new(info.port_name),
        }
    }
}

/// Which port counts as the board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceMatcher {
    /// Substring the USB product string must contain
    pub product: String,
    /// Exact USB serial number, if restricted to one board
    pub serial_number: Option<String>,
}

impl Default for DeviceMatcher {
    fn default() -> Self {
        Self {
            product: DEFAULT_PRODUCT.to_string(),
            serial_number: None,
        }
    }
}

impl DeviceMatcher {
    pub fn new(product: impl Into<String>) -> Self {
        Self {
            product: product.into(),
            serial_number: None,
        }
    }

    pub fn with_serial_number(mut self, serial_number: Option<String>) -> Self {
        self.serial_number = serial_number;
        self
    }

    pub fn matches(&self, entry: &PortEntry) -> bool {
        let product_ok = entry
            .product
            .as_deref()
            .is_some_and(|p| p.contains(&self.product));
        let serial_ok = match &self.serial_number {
            None => true,
            Some(wanted) => entry.serial_number.as_deref() == Some(wanted.as_str()),
        };
        product_ok && serial_ok
    }
}

/// Enumerate the host's serial ports
pub fn list_ports() -> Result<Vec<PortEntry>, ReceiverError> {
    let ports = serialport::available_ports().map_err(ReceiverError::Enumerate)?;
    Ok(ports.into_iter().map(PortEntry::from).collect())
}

/// First entry that matches, in enumeration order
pub fn find_device<'a>(entries: &'a [PortEntry], matcher: &DeviceMatcher) -> Option<&'a PortEntry> {
    for entry in entries {
        debug!("Checking {} ({})", entry.device, entry.description());
        if matcher.matches(entry) {
            info!(
                "Found micro:bit {} on {}",
                entry.serial_number.as_deref().unwrap_or("?"),
                entry.device
            );
            return Some(entry);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ports() -> Vec<PortEntry> {
        vec![
            PortEntry::new("/dev/ttyS0"),
            PortEntry::new("/dev/ttyUSB0").with_product("FT232R USB UART"),
            PortEntry::new("/dev/ttyACM0")
                .with_product("BBC micro:bit CMSIS-DAP")
                .with_serial_number("9904360258994e45"),
            PortEntry::new("/dev/ttyACM1")
                .with_product("BBC micro:bit CMSIS-DAP")
                .with_serial_number("9906360200052820"),
        ]
    }

    #[test]
    fn test_first_match_wins() {
        let entries = ports();
        let found = find_device(&entries, &DeviceMatcher::default()).unwrap();
        assert_eq!(found.device, "/dev/ttyACM0");
    }

    #[test]
    fn test_serial_number_filter() {
        let entries = ports();
        let matcher =
            DeviceMatcher::default().with_serial_number(Some("9906360200052820".to_string()));
        let found = find_device(&entries, &matcher).unwrap();
        assert_eq!(found.device, "/dev/ttyACM1");
    }

    #[test]
    fn test_no_match() {
        let entries = ports();
        let matcher = DeviceMatcher::default().with_serial_number(Some("nope".to_string()));
        assert!(find_device(&entries, &matcher).is_none());
        assert!(find_device(&[], &DeviceMatcher::default()).is_none());
    }

    #[test]
    fn test_product_substring() {
        let entry = PortEntry::new("COM3").with_product("FT232R USB UART");
        assert!(DeviceMatcher::new("FT232").matches(&entry));
        assert!(!DeviceMatcher::default().matches(&entry));
        assert!(!DeviceMatcher::default().matches(&PortEntry::new("COM4")));
    }
}
