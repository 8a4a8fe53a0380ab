//! Radio interface traits.
//!
//! The broadcaster never talks to a radio stack directly; it is handed a
//! [`RadioInterface`] at construction. A session captures the
//! [`Advertiser`] handle it starts with and issues its stop request on
//! that same handle.

use std::sync::Arc;

use async_trait::async_trait;

use crate::ble::settings::{AdvertiseSettings, AdvertisingBlock};
use crate::error::Result;

/// Handle to one advertisement on a radio.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Advertiser: Send + Sync {
    /// Start advertising with the given settings and data blocks.
    ///
    /// Resolves once the radio has accepted or rejected the request; the
    /// advertisement itself continues until [`Advertiser::stop`].
    async fn start(
        &self,
        settings: &AdvertiseSettings,
        advertising_data: &AdvertisingBlock,
        scan_response: &AdvertisingBlock,
    ) -> Result<()>;

    /// Stop the advertisement started on this handle.
    async fn stop(&self) -> Result<()>;
}

/// A host Bluetooth radio, as consumed by the broadcaster.
///
/// Power management, pairing, and GAP state stay with the implementor;
/// the broadcaster only queries state and obtains advertiser handles.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RadioInterface: Send + Sync {
    /// Check whether radio hardware is present at all.
    async fn is_available(&self) -> bool;

    /// Check whether the radio is currently powered on.
    async fn is_enabled(&self) -> bool;

    /// Ask the host to enable the radio (e.g. a system UI flow).
    ///
    /// Fire-and-forget; the caller retries its broadcast once the radio
    /// reports enabled.
    async fn request_enable(&self);

    /// Obtain an advertiser handle, if the radio supports advertising.
    async fn advertiser(&self) -> Option<Arc<dyn Advertiser>>;
}
