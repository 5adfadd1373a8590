//! Receiver error types

use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReceiverError {
    /// Serial port enumeration failed
    #[error("unable to enumerate serial ports: {0}")]
    Enumerate(#[source] serialport::Error),

    /// The selected port could not be opened
    #[error("unable to open {port}: {source}")]
    Open {
        port: String,
        #[source]
        source: serialport::Error,
    },

    /// Unrecoverable read error on the serial port
    #[error("serial read failed: {0}")]
    Read(#[source] io::Error),

    /// Writing to the output sink failed
    #[error("output write failed: {0}")]
    Write(#[source] io::Error),
}
