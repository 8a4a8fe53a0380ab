//! Error types for the barcode-beacon-ble crate.

use thiserror::Error;

/// The main error type for this crate.
#[derive(Error, Debug)]
pub enum Error {
    /// Bluetooth-related error from the underlying BLE library.
    #[error("Bluetooth error: {0}")]
    Bluetooth(#[from] btleplug::Error),

    /// No Bluetooth radio hardware is present on this system.
    #[error("Bluetooth radio not available")]
    RadioUnavailable,

    /// A Bluetooth radio exists but is currently powered off.
    ///
    /// An enable request has already been issued to the radio interface;
    /// retry the broadcast once the radio is enabled.
    #[error("Bluetooth radio is disabled")]
    RadioDisabled,

    /// The barcode exceeds the single-byte length field of the wire format.
    #[error("Barcode length is {length} and must be <= 255")]
    BarcodeTooLong {
        /// The byte length of the rejected barcode.
        length: usize,
    },

    /// The scanner id does not fit the 2-byte field of the wire format.
    #[error("Scanner id is {value} and must be <= 65535")]
    ScannerIdOutOfRange {
        /// The out-of-range value that was provided.
        value: u32,
    },

    /// The radio rejected or failed the advertising start request.
    #[error("Advertising start failed: {reason}")]
    StartFailed {
        /// Description of why the start request failed.
        reason: String,
    },

    /// The radio failed the advertising stop request.
    #[error("Advertising stop failed: {reason}")]
    StopFailed {
        /// Description of why the stop request failed.
        reason: String,
    },

    /// Received service data that does not decode as an advertisement payload.
    #[error("Invalid payload: {context}")]
    InvalidPayload {
        /// Description of what was invalid about the data.
        context: String,
    },

    /// The requested operation is not supported on this platform.
    #[error("Operation not supported: {operation}")]
    NotSupported {
        /// Description of the unsupported operation.
        operation: String,
    },
}

/// A specialized Result type for this crate.
pub type Result<T> = std::result::Result<T, Error>;
