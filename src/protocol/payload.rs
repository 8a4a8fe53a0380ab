//! Advertisement payload encoding and parsing.
//!
//! Wire format of the scan-response service-data element:
//! - Marker(2) + ScannerId(2, big-endian) + Type(1) + Len(1) + Barcode(Len)
//!
//! The advertising-data block is independent of the payload: device name
//! plus a fixed manufacturer presence marker.

use crate::ble::settings::AdvertisingBlock;
use crate::ble::uuids::{BARCODE_SERVICE_UUID, BEACON_MANUFACTURER_ID, BEACON_PRESENCE_MARKER};
use crate::error::{Error, Result};
use crate::protocol::barcode_type::BarcodeType;

/// Marker bytes identifying an advertisement message.
pub const ADVERTISEMENT_MARKER: [u8; 2] = [b'0', b'A'];

/// Maximum barcode length representable by the single-byte length field.
pub const MAX_BARCODE_LEN: usize = 255;

/// A barcode advertisement message.
///
/// Built once per broadcast from the scanned value and consumed into the
/// scan-response block; it has no persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AdvertisementPayload {
    /// Unique id of the physical scanner.
    pub scanner_id: u16,
    /// Symbology of the scanned barcode.
    pub barcode_type: BarcodeType,
    /// Raw bytes of the scanned text.
    pub barcode: Vec<u8>,
}

impl AdvertisementPayload {
    /// Header size in bytes (marker + scanner id + type + length).
    pub const HEADER_SIZE: usize = 6;

    /// Create a new payload.
    ///
    /// The barcode must already satisfy the length precondition; see
    /// [`crate::protocol::validate::validate_barcode`].
    pub fn new(scanner_id: u16, barcode_type: BarcodeType, barcode: Vec<u8>) -> Self {
        debug_assert!(barcode.len() <= MAX_BARCODE_LEN);
        Self {
            scanner_id,
            barcode_type,
            barcode,
        }
    }

    /// Total encoded length in bytes.
    pub fn encoded_len(&self) -> usize {
        Self::HEADER_SIZE + self.barcode.len()
    }

    /// Serialize the payload to bytes.
    ///
    /// Format: Marker(2) + ScannerId(2, big-endian) + Type(1) + Len(1) + Barcode
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut data = Vec::with_capacity(self.encoded_len());
        data.extend_from_slice(&ADVERTISEMENT_MARKER);
        data.extend_from_slice(&self.scanner_id.to_be_bytes());
        data.push(self.barcode_type.to_raw());
        data.push(self.barcode.len() as u8);
        data.extend_from_slice(&self.barcode);
        data
    }

    /// Parse a payload from the bytes of a service-data element.
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() < Self::HEADER_SIZE {
            return Err(Error::InvalidPayload {
                context: format!(
                    "payload too short: {} bytes (need at least {})",
                    data.len(),
                    Self::HEADER_SIZE
                ),
            });
        }

        if data[0] != ADVERTISEMENT_MARKER[0] || data[1] != ADVERTISEMENT_MARKER[1] {
            return Err(Error::InvalidPayload {
                context: format!("invalid marker bytes: {:#04x} {:#04x}", data[0], data[1]),
            });
        }

        let scanner_id = u16::from_be_bytes([data[2], data[3]]);
        let barcode_type = BarcodeType::from_raw(data[4]);

        let barcode_len = data[5] as usize;
        if data.len() != Self::HEADER_SIZE + barcode_len {
            return Err(Error::InvalidPayload {
                context: format!(
                    "length byte says {} but {} barcode bytes follow",
                    barcode_len,
                    data.len() - Self::HEADER_SIZE
                ),
            });
        }

        Ok(Self {
            scanner_id,
            barcode_type,
            barcode: data[Self::HEADER_SIZE..].to_vec(),
        })
    }

    /// Get the barcode as text, if it is valid UTF-8.
    pub fn barcode_text(&self) -> Option<&str> {
        std::str::from_utf8(&self.barcode).ok()
    }
}

/// Build the advertising-data block for a broadcast.
///
/// Device name flag plus the fixed presence marker; identical for every
/// broadcast regardless of payload contents.
pub fn advertising_block() -> AdvertisingBlock {
    AdvertisingBlock::new()
        .with_device_name()
        .with_manufacturer_data(BEACON_MANUFACTURER_ID, BEACON_PRESENCE_MARKER.to_vec())
}

/// Build the scan-response block carrying the payload as service data.
pub fn scan_response_block(payload: &AdvertisementPayload) -> AdvertisingBlock {
    AdvertisingBlock::new().with_service_data(BARCODE_SERVICE_UUID, payload.to_bytes())
}
