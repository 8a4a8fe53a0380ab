//! Barcode symbology codes.
//!
//! Pinned numeric code table (version 1) for the single-byte symbology
//! field of the advertisement payload. The values reproduce the positions
//! the scanner SDK's label-type enumeration has always advertised, frozen
//! here so the wire format cannot shift if that enumeration is reordered
//! upstream. New symbologies get new codes; existing codes never change.

/// Barcode symbology carried in byte 4 of the advertisement payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum BarcodeType {
    /// Code 39.
    #[default]
    Code39 = 0,
    /// Codabar.
    Codabar = 1,
    /// Code 128.
    Code128 = 2,
    /// Discrete 2 of 5.
    Discrete2Of5 = 3,
    /// IATA 2 of 5.
    Iata2Of5 = 4,
    /// Interleaved 2 of 5.
    Interleaved2Of5 = 5,
    /// Code 93.
    Code93 = 6,
    /// UPC-A.
    UpcA = 7,
    /// UPC-E0.
    UpcE0 = 8,
    /// UPC-E1.
    UpcE1 = 9,
    /// EAN-8.
    Ean8 = 10,
    /// EAN-13.
    Ean13 = 11,
    /// MSI Plessey.
    Msi = 12,
    /// GS1-128 (EAN-128).
    Ean128 = 13,
    /// Trioptic Code 39.
    Trioptic39 = 14,
    /// Bookland EAN.
    Bookland = 15,
    /// UPC coupon code.
    Coupon = 16,
    /// GS1 DataBar.
    Databar = 17,
    /// ISBT 128.
    Isbt128 = 18,
    /// Code 32 (Italian Pharmacode).
    Code32 = 19,
    /// PDF417.
    Pdf417 = 20,
    /// MicroPDF417.
    MicroPdf = 21,
    /// TLC-39.
    Tlc39 = 22,
    /// Code 11.
    Code11 = 23,
    /// MaxiCode.
    Maxicode = 24,
    /// Data Matrix.
    Datamatrix = 25,
    /// QR Code.
    QrCode = 26,
    /// Symbology not present in this version of the code table.
    Unknown = 255,
}

impl BarcodeType {
    /// Create from the raw wire value.
    pub fn from_raw(value: u8) -> Self {
        match value {
            0 => Self::Code39,
            1 => Self::Codabar,
            2 => Self::Code128,
            3 => Self::Discrete2Of5,
            4 => Self::Iata2Of5,
            5 => Self::Interleaved2Of5,
            6 => Self::Code93,
            7 => Self::UpcA,
            8 => Self::UpcE0,
            9 => Self::UpcE1,
            10 => Self::Ean8,
            11 => Self::Ean13,
            12 => Self::Msi,
            13 => Self::Ean128,
            14 => Self::Trioptic39,
            15 => Self::Bookland,
            16 => Self::Coupon,
            17 => Self::Databar,
            18 => Self::Isbt128,
            19 => Self::Code32,
            20 => Self::Pdf417,
            21 => Self::MicroPdf,
            22 => Self::Tlc39,
            23 => Self::Code11,
            24 => Self::Maxicode,
            25 => Self::Datamatrix,
            26 => Self::QrCode,
            _ => Self::Unknown,
        }
    }

    /// Convert to the raw wire value.
    pub fn to_raw(&self) -> u8 {
        *self as u8
    }

    /// Check if this symbology is defined in the code table.
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown)
    }

    /// Get the symbology name as a string.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Code39 => "Code 39",
            Self::Codabar => "Codabar",
            Self::Code128 => "Code 128",
            Self::Discrete2Of5 => "Discrete 2 of 5",
            Self::Iata2Of5 => "IATA 2 of 5",
            Self::Interleaved2Of5 => "Interleaved 2 of 5",
            Self::Code93 => "Code 93",
            Self::UpcA => "UPC-A",
            Self::UpcE0 => "UPC-E0",
            Self::UpcE1 => "UPC-E1",
            Self::Ean8 => "EAN-8",
            Self::Ean13 => "EAN-13",
            Self::Msi => "MSI",
            Self::Ean128 => "GS1-128",
            Self::Trioptic39 => "Trioptic Code 39",
            Self::Bookland => "Bookland EAN",
            Self::Coupon => "Coupon",
            Self::Databar => "GS1 DataBar",
            Self::Isbt128 => "ISBT 128",
            Self::Code32 => "Code 32",
            Self::Pdf417 => "PDF417",
            Self::MicroPdf => "MicroPDF417",
            Self::Tlc39 => "TLC-39",
            Self::Code11 => "Code 11",
            Self::Maxicode => "MaxiCode",
            Self::Datamatrix => "Data Matrix",
            Self::QrCode => "QR Code",
            Self::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for BarcodeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
