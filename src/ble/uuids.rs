//! BLE service and advertising constants.
//!
//! Contains the identifiers that mark a broadcast as carrying a barcode
//! advertisement payload.

use uuid::Uuid;

/// Barcode advertisement service UUID (16-bit alias 0xC9E3 in the
/// Bluetooth base UUID).
///
/// The scan-response block carries the advertisement payload as service
/// data keyed by this UUID.
pub const BARCODE_SERVICE_UUID: Uuid = Uuid::from_u128(0x0000_c9e3_0000_1000_8000_00805f9b34fb);

/// 16-bit alias of [`BARCODE_SERVICE_UUID`], as it appears on the air in
/// a Service Data (0x16) AD element.
pub const BARCODE_SERVICE_UUID_16: u16 = 0xC9E3;

/// Manufacturer company identifier used in the advertising-data block.
///
/// 0xFFFF is the Bluetooth SIG reserved test id; receivers key on it
/// together with [`BEACON_PRESENCE_MARKER`] to spot a sender.
pub const BEACON_MANUFACTURER_ID: u16 = 0xFFFF;

/// Fixed manufacturer data value advertised by every sender.
///
/// A presence marker only; never derived from the payload.
pub const BEACON_PRESENCE_MARKER: [u8; 4] = [0xFF, 0xFF, 0xFF, 0xFF];

/// Check if a service UUID is the barcode advertisement service.
pub fn is_barcode_service(uuid: &Uuid) -> bool {
    *uuid == BARCODE_SERVICE_UUID
}
