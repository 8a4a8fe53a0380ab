//! Protocol module for constructing and parsing advertisement messages.
//!
//! This module contains the implementations for:
//! - The pinned barcode symbology code table
//! - Advertisement payload encoding and parsing
//! - Broadcast precondition checks

pub mod barcode_type;
pub mod payload;
pub mod validate;

pub use barcode_type::BarcodeType;
pub use payload::{AdvertisementPayload, ADVERTISEMENT_MARKER, MAX_BARCODE_LEN};
pub use validate::{validate_barcode, validate_scanner_id};
