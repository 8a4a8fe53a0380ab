//! # barcode-beacon-ble
//!
//! A cross-platform Rust library for broadcasting scanned barcodes over
//! Bluetooth Low Energy advertising.
//!
//! A scanned barcode, its symbology, and a scanner id are encoded into a
//! fixed-layout payload and advertised for a bounded duration, so a
//! nearby receiver can read the barcode without ever connecting to the
//! sending device. Fire-and-forget: one payload, one timed advertisement,
//! no acknowledgment or retry.
//!
//! ## Features
//!
//! - **Deterministic wire format**: 6-byte header + barcode bytes,
//!   carried as service data in the scan-response block
//! - **Pinned symbology codes**: versioned single-byte code table that
//!   cannot drift with upstream SDK enumerations
//! - **Timed sessions**: every broadcast is torn down after a
//!   configurable duration (default 4.5 s)
//! - **Injected radio**: the Bluetooth stack is a trait, so hosts bring
//!   their own peripheral implementation and tests bring mocks
//! - **Session events**: asynchronous start/stop outcomes are observable
//!   without giving up the non-blocking broadcast call
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use barcode_beacon_ble::{BarcodeBroadcaster, BarcodeType, Result, SystemRadio};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let radio = Arc::new(SystemRadio::new().await?);
//!     let broadcaster = BarcodeBroadcaster::new(radio);
//!
//!     // `true` means accepted for dispatch; the advertisement stops on
//!     // its own after the configured duration.
//!     if broadcaster.broadcast("4006381333931", BarcodeType::Ean13, 42).await {
//!         println!("barcode dispatched");
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Platform Notes
//!
//! The bundled [`SystemRadio`] detects adapters through the host
//! Bluetooth stack but cannot put an advertisement on the air, because
//! the common cross-platform stacks only expose the central role. Hosts
//! with a peripheral-capable stack (BlueZ advertising manager, an
//! embedded softdevice, a mobile OS advertiser) implement
//! [`RadioInterface`] and inject it into [`BarcodeBroadcaster`].
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialization/deserialization for protocol types

// Public modules
pub mod ble;
pub mod broadcaster;
pub mod error;
pub mod protocol;

// Re-exports for convenience
pub use broadcaster::{
    BarcodeBroadcaster, SessionEvent, SessionEventKind, DEFAULT_ADVERTISING_DURATION_MS,
};
pub use error::{Error, Result};
pub use protocol::{AdvertisementPayload, BarcodeType};

// Re-export commonly used types from submodules
pub use ble::radio::{Advertiser, RadioInterface};
pub use ble::settings::{AdvertiseMode, AdvertiseSettings, AdvertisingBlock, TxPowerLevel};
pub use ble::system::SystemRadio;
pub use ble::uuids::{BARCODE_SERVICE_UUID, BARCODE_SERVICE_UUID_16, BEACON_MANUFACTURER_ID};
