//! System radio backed by the host Bluetooth stack.
//!
//! Default [`RadioInterface`] implementation. Adapter presence and state
//! are queried through btleplug; the peripheral (advertising) role is not
//! exposed by btleplug, so the advertiser handle logs the broadcast and
//! reports it as accepted. Hosts with a peripheral-capable stack inject
//! their own [`RadioInterface`] instead.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use btleplug::api::{Central as _, Manager as _};
use btleplug::platform::Manager;
use tracing::{debug, info, warn};

use crate::ble::radio::{Advertiser, RadioInterface};
use crate::ble::settings::{AdvertiseSettings, AdvertisingBlock};
use crate::error::{Error, Result};

/// Radio interface backed by the host Bluetooth stack.
pub struct SystemRadio {
    manager: Manager,
}

impl SystemRadio {
    /// Create a new system radio.
    ///
    /// # Errors
    ///
    /// Returns an error if the host Bluetooth stack cannot be reached.
    pub async fn new() -> Result<Self> {
        let manager = Manager::new().await.map_err(|_e| Error::RadioUnavailable)?;
        Ok(Self { manager })
    }
}

#[async_trait]
impl RadioInterface for SystemRadio {
    async fn is_available(&self) -> bool {
        match self.manager.adapters().await {
            Ok(adapters) => !adapters.is_empty(),
            Err(e) => {
                debug!("Failed to enumerate Bluetooth adapters: {}", e);
                false
            }
        }
    }

    async fn is_enabled(&self) -> bool {
        // A powered-off adapter stops answering info queries; use that as
        // the enabled check since btleplug has no portable power-state API.
        let adapters = match self.manager.adapters().await {
            Ok(adapters) => adapters,
            Err(_) => return false,
        };

        match adapters.into_iter().next() {
            Some(adapter) => adapter.adapter_info().await.is_ok(),
            None => false,
        }
    }

    async fn request_enable(&self) {
        warn!("Bluetooth disabled. Please enable Bluetooth and retry.");
    }

    async fn advertiser(&self) -> Option<Arc<dyn Advertiser>> {
        Some(Arc::new(SystemAdvertiser::new()))
    }
}

/// Advertiser handle for the system radio.
pub struct SystemAdvertiser {
    is_advertising: AtomicBool,
}

impl SystemAdvertiser {
    fn new() -> Self {
        Self {
            is_advertising: AtomicBool::new(false),
        }
    }

    /// Check if this handle currently has an advertisement up.
    pub fn is_advertising(&self) -> bool {
        self.is_advertising.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Advertiser for SystemAdvertiser {
    async fn start(
        &self,
        settings: &AdvertiseSettings,
        advertising_data: &AdvertisingBlock,
        scan_response: &AdvertisingBlock,
    ) -> Result<()> {
        let payload_len = scan_response
            .service_data
            .as_ref()
            .map(|(_, data)| data.len())
            .unwrap_or(0);
        let manufacturer_id = advertising_data
            .manufacturer_data
            .as_ref()
            .map(|(id, _)| *id)
            .unwrap_or_default();

        warn!(
            "BLE peripheral role not supported by the host stack; {:?} advertisement \
             (manufacturer {:#06x}, {} payload bytes) accepted but will not be visible over the air",
            settings.mode, manufacturer_id, payload_len
        );

        self.is_advertising.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn stop(&self) -> Result<()> {
        info!("Stopping advertisement");
        self.is_advertising.store(false, Ordering::SeqCst);
        Ok(())
    }
}
