//! Error types for HIBC decoding

use crate::types::{PrimaryFields, SegmentKind};
use alloc::string::String;
use core::fmt;
use serde::{Deserialize, Serialize};

/// Reasons a payload can fail to decode
#[cfg_attr(feature = "std", derive(thiserror::Error))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DecodeError {
    /// Nothing left after removing the frame markers
    #[cfg_attr(feature = "std", error("Empty barcode"))]
    EmptyBarcode,

    /// Payload does not start with the `+` flag character
    #[cfg_attr(feature = "std", error("Barcode is not in HIBC format: missing '+' flag"))]
    NotHibcFormat,

    /// Structural failure: too short, too many segments, unknown prefix
    #[cfg_attr(feature = "std", error("Invalid barcode structure"))]
    InvalidBarcode,

    /// Primary segment too short for one of its fields
    #[cfg_attr(feature = "std", error("Invalid primary segment"))]
    InvalidLine1,

    /// Explicit or embedded expiration date is malformed or truncated
    #[cfg_attr(feature = "std", error("Invalid expiration date"))]
    InvalidExpirationDate,

    /// No character left for the check character
    #[cfg_attr(feature = "std", error("Missing check character"))]
    EmptyCheckCharacter,

    /// No character left for the link character
    #[cfg_attr(feature = "std", error("Missing link character"))]
    EmptyLinkCharacter,

    /// Quantity identifier present but its digits are not a number
    #[cfg_attr(feature = "std", error("Invalid quantity"))]
    InvalidQuantity,
}

impl DecodeError {
    /// Stable numeric code, matching the order of the HIBC result codes
    pub const fn code(&self) -> u8 {
        match self {
            DecodeError::EmptyBarcode => 1,
            DecodeError::NotHibcFormat => 2,
            DecodeError::InvalidBarcode => 3,
            DecodeError::InvalidExpirationDate => 4,
            DecodeError::EmptyCheckCharacter => 5,
            DecodeError::EmptyLinkCharacter => 6,
            DecodeError::InvalidQuantity => 7,
            DecodeError::InvalidLine1 => 8,
        }
    }
}

/// A failed decode, with whatever was recovered before the failing step
///
/// Callers must not treat any of the partial fields as complete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodeFailure {
    /// The input exactly as passed to `decode`
    pub raw: String,

    /// The failing step
    pub error: DecodeError,

    /// Segment classification, when the payload got that far
    pub kind: Option<SegmentKind>,

    /// Primary half of a Concatenated payload whose Secondary half failed
    pub primary: Option<PrimaryFields>,
}

impl DecodeFailure {
    pub(crate) fn new(raw: &str, error: DecodeError) -> Self {
        Self {
            raw: String::from(raw),
            error,
            kind: None,
            primary: None,
        }
    }

    pub(crate) fn with_kind(mut self, kind: SegmentKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub(crate) fn with_primary(mut self, primary: PrimaryFields) -> Self {
        self.primary = Some(primary);
        self
    }
}

impl fmt::Display for DecodeFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to decode {:?}: {:?}", self.raw, self.error)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for DecodeFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}
