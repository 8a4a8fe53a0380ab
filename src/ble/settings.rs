//! Advertising settings and data blocks.
//!
//! Plain data handed to a [`crate::ble::radio::Advertiser`] when a
//! broadcast starts. Mirrors the settings surface of the host radio
//! stacks (advertise mode, TX power, connectability) without binding to
//! any one of them.

use uuid::Uuid;

/// Advertising interval preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum AdvertiseMode {
    /// Longest interval, lowest power draw.
    LowPower = 0,
    /// Balanced interval and power draw.
    Balanced = 1,
    /// Shortest interval, maximum discoverability.
    #[default]
    LowLatency = 2,
}

impl AdvertiseMode {
    /// Create from raw byte value.
    pub fn from_raw(value: u8) -> Self {
        match value {
            0 => Self::LowPower,
            1 => Self::Balanced,
            _ => Self::LowLatency,
        }
    }

    /// Convert to raw byte value.
    pub fn to_raw(&self) -> u8 {
        *self as u8
    }
}

/// Transmit power preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum TxPowerLevel {
    /// Lowest transmit power.
    UltraLow = 0,
    /// Low transmit power.
    Low = 1,
    /// Medium transmit power.
    Medium = 2,
    /// Highest transmit power, maximum range.
    #[default]
    High = 3,
}

impl TxPowerLevel {
    /// Create from raw byte value.
    pub fn from_raw(value: u8) -> Self {
        match value {
            0 => Self::UltraLow,
            1 => Self::Low,
            2 => Self::Medium,
            _ => Self::High,
        }
    }

    /// Convert to raw byte value.
    pub fn to_raw(&self) -> u8 {
        *self as u8
    }
}

/// Settings for one advertising session.
///
/// The defaults are the barcode broadcast profile: low-latency,
/// high-power, non-connectable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AdvertiseSettings {
    /// Advertising interval preference.
    pub mode: AdvertiseMode,
    /// Transmit power preference.
    pub tx_power: TxPowerLevel,
    /// Whether the advertisement accepts connections.
    pub connectable: bool,
}

impl Default for AdvertiseSettings {
    fn default() -> Self {
        Self {
            mode: AdvertiseMode::LowLatency,
            tx_power: TxPowerLevel::High,
            connectable: false,
        }
    }
}

/// One advertising data block (advertising data or scan response).
///
/// Each broadcast hands two of these to the radio: the advertising-data
/// block carrying the device name and the presence marker, and the
/// scan-response block carrying the payload as service data.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AdvertisingBlock {
    /// Whether the device name AD element is included.
    pub include_device_name: bool,
    /// Manufacturer-specific data: (company id, value).
    pub manufacturer_data: Option<(u16, Vec<u8>)>,
    /// Service data: (service UUID, value).
    pub service_data: Option<(Uuid, Vec<u8>)>,
}

impl AdvertisingBlock {
    /// Create an empty block.
    pub fn new() -> Self {
        Self::default()
    }

    /// Include the device name AD element.
    pub fn with_device_name(mut self) -> Self {
        self.include_device_name = true;
        self
    }

    /// Attach a manufacturer-specific data element.
    pub fn with_manufacturer_data(mut self, company_id: u16, data: Vec<u8>) -> Self {
        self.manufacturer_data = Some((company_id, data));
        self
    }

    /// Attach a service data element.
    pub fn with_service_data(mut self, service: Uuid, data: Vec<u8>) -> Self {
        self.service_data = Some((service, data));
        self
    }
}
