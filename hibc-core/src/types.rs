//! Decoded HIBC records

use alloc::string::String;
use chrono::NaiveDateTime;
use core::fmt;
use serde::{Deserialize, Serialize};

/// Which part of a label a record was decoded from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentKind {
    /// Labeler, product and unit of measure, ending in a check character
    Primary,
    /// Lot/serial, quantity and date, ending in link and check characters
    Secondary,
    /// Both halves in one payload, sharing a single check character
    Concatenated,
    /// A Primary and Secondary joined by the linker; never decoded directly
    Merged,
}

impl fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SegmentKind::Primary => "primary",
            SegmentKind::Secondary => "secondary",
            SegmentKind::Concatenated => "concatenated",
            SegmentKind::Merged => "merged",
        };
        f.write_str(name)
    }
}

/// Batch or unit identifier carried by the Secondary data
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LotOrSerial {
    /// Lot (batch) number
    Lot(String),
    /// Serial number
    Serial(String),
}

impl LotOrSerial {
    /// Returns the identifier text regardless of its kind
    pub fn value(&self) -> &str {
        match self {
            LotOrSerial::Lot(v) | LotOrSerial::Serial(v) => v,
        }
    }

    /// Returns the lot number, if this is a lot
    pub fn lot(&self) -> Option<&str> {
        match self {
            LotOrSerial::Lot(v) => Some(v),
            LotOrSerial::Serial(_) => None,
        }
    }

    /// Returns the serial number, if this is a serial
    pub fn serial(&self) -> Option<&str> {
        match self {
            LotOrSerial::Serial(v) => Some(v),
            LotOrSerial::Lot(_) => None,
        }
    }
}

/// Which field the lot/serial extractor should fill
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LotOrSerialField {
    Lot,
    Serial,
}

impl LotOrSerialField {
    pub(crate) fn wrap(self, value: String) -> LotOrSerial {
        match self {
            LotOrSerialField::Lot => LotOrSerial::Lot(value),
            LotOrSerialField::Serial => LotOrSerial::Serial(value),
        }
    }
}

/// Fields carried by a Primary segment
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PrimaryFields {
    /// Labeler identification code (4 characters)
    pub labeler_id: String,

    /// Labeler's product or catalog number
    pub product_number: String,

    /// Packaging level, 0-9
    pub unit_of_measure: u8,
}

/// Fields carried by a Secondary segment
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct SecondaryFields {
    /// Lot or serial number, when the payload supplies a non-empty one
    pub lot_or_serial: Option<LotOrSerial>,

    /// Quantity, when a `8` or `9` quantity identifier was present
    pub quantity: Option<u32>,

    /// Expiration date, explicit or embedded in the lot/serial
    pub expiration_date: Option<NaiveDateTime>,

    /// Link character; only standalone Secondary segments carry one
    pub link_character: Option<char>,
}

/// A single successfully decoded payload
///
/// Created once by `decode` and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodedBarcode {
    /// Input exactly as scanned, including any frame markers
    pub raw: String,

    /// Segment classification
    pub kind: SegmentKind,

    /// Check character (verbatim, never recomputed)
    pub check_character: char,

    /// Present for Primary and Concatenated payloads
    pub primary: Option<PrimaryFields>,

    /// Present for Secondary and Concatenated payloads
    pub secondary: Option<SecondaryFields>,
}

impl DecodedBarcode {
    /// Labeler identification code
    pub fn labeler_id(&self) -> Option<&str> {
        self.primary.as_ref().map(|p| p.labeler_id.as_str())
    }

    /// Product number
    pub fn product_number(&self) -> Option<&str> {
        self.primary.as_ref().map(|p| p.product_number.as_str())
    }

    /// Unit of measure digit
    pub fn unit_of_measure(&self) -> Option<u8> {
        self.primary.as_ref().map(|p| p.unit_of_measure)
    }

    /// Link character of a standalone Secondary
    pub fn link_character(&self) -> Option<char> {
        self.secondary.as_ref().and_then(|s| s.link_character)
    }

    /// Lot or serial number
    pub fn lot_or_serial(&self) -> Option<&LotOrSerial> {
        self.secondary.as_ref().and_then(|s| s.lot_or_serial.as_ref())
    }

    /// Lot number, if the Secondary data carries a lot
    pub fn lot(&self) -> Option<&str> {
        self.lot_or_serial().and_then(LotOrSerial::lot)
    }

    /// Serial number, if the Secondary data carries a serial
    pub fn serial(&self) -> Option<&str> {
        self.lot_or_serial().and_then(LotOrSerial::serial)
    }

    /// Quantity
    pub fn quantity(&self) -> Option<u32> {
        self.secondary.as_ref().and_then(|s| s.quantity)
    }

    /// Expiration date
    pub fn expiration_date(&self) -> Option<NaiveDateTime> {
        self.secondary.as_ref().and_then(|s| s.expiration_date)
    }
}

/// One logical label assembled from a linked Primary and Secondary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergedBarcode {
    /// Raw Primary payload
    pub primary_raw: String,

    /// Raw Secondary payload
    pub secondary_raw: String,

    /// Labeler, product and unit of measure from the Primary
    pub primary: PrimaryFields,

    /// Lot/serial, quantity and date from the Secondary
    pub secondary: SecondaryFields,

    /// The shared character (Primary check == Secondary link)
    pub link_character: char,
}

impl MergedBarcode {
    /// Always `SegmentKind::Merged`
    pub const fn kind(&self) -> SegmentKind {
        SegmentKind::Merged
    }

    /// Labeler identification code
    pub fn labeler_id(&self) -> &str {
        &self.primary.labeler_id
    }

    /// Product number
    pub fn product_number(&self) -> &str {
        &self.primary.product_number
    }

    /// Unit of measure digit
    pub fn unit_of_measure(&self) -> u8 {
        self.primary.unit_of_measure
    }

    /// Lot or serial number
    pub fn lot_or_serial(&self) -> Option<&LotOrSerial> {
        self.secondary.lot_or_serial.as_ref()
    }

    /// Quantity
    pub fn quantity(&self) -> Option<u32> {
        self.secondary.quantity
    }

    /// Expiration date
    pub fn expiration_date(&self) -> Option<NaiveDateTime> {
        self.secondary.expiration_date
    }
}

/// Either a self-contained decode or a merged pair: one physical label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LabelRecord {
    /// A Primary, Secondary or Concatenated decode
    Single(DecodedBarcode),
    /// A linked Primary/Secondary pair
    Merged(MergedBarcode),
}

impl LabelRecord {
    /// Kind of the underlying record
    pub fn kind(&self) -> SegmentKind {
        match self {
            LabelRecord::Single(decoded) => decoded.kind,
            LabelRecord::Merged(merged) => merged.kind(),
        }
    }

    /// Labeler identification code, when the label has Primary data
    pub fn labeler_id(&self) -> Option<&str> {
        match self {
            LabelRecord::Single(decoded) => decoded.labeler_id(),
            LabelRecord::Merged(merged) => Some(merged.labeler_id()),
        }
    }

    /// Expiration date, when the label has one
    pub fn expiration_date(&self) -> Option<NaiveDateTime> {
        match self {
            LabelRecord::Single(decoded) => decoded.expiration_date(),
            LabelRecord::Merged(merged) => merged.expiration_date(),
        }
    }
}

impl From<DecodedBarcode> for LabelRecord {
    fn from(decoded: DecodedBarcode) -> Self {
        LabelRecord::Single(decoded)
    }
}

impl From<MergedBarcode> for LabelRecord {
    fn from(merged: MergedBarcode) -> Self {
        LabelRecord::Merged(merged)
    }
}
