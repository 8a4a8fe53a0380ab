//! Precondition checks for broadcast requests.
//!
//! Both fields of the payload header have hard wire-format limits; these
//! checks run before any encoding or radio work is attempted.

use crate::error::{Error, Result};
use crate::protocol::payload::MAX_BARCODE_LEN;

/// Check that a barcode fits the single-byte length field.
pub fn validate_barcode(barcode: &[u8]) -> Result<()> {
    if barcode.len() > MAX_BARCODE_LEN {
        return Err(Error::BarcodeTooLong {
            length: barcode.len(),
        });
    }
    Ok(())
}

/// Check that a scanner id fits the 2-byte header field, narrowing it.
///
/// The id is accepted as `u32` at the API boundary so out-of-range values
/// are representable and rejected here rather than silently truncated.
pub fn validate_scanner_id(scanner_id: u32) -> Result<u16> {
    u16::try_from(scanner_id).map_err(|_| Error::ScannerIdOutOfRange { value: scanner_id })
}
