//! # HIBC Core
//!
//! Decoder for Health Industry Bar Code (HIBC) supplier labeling payloads,
//! and linker for labels printed as separate Primary and Secondary barcodes.
//!
//! ## Modules
//!
//! - `constants`: Marker characters, field widths, date layouts, options
//! - `types`: Decoded records (DecodedBarcode, MergedBarcode, LotOrSerial)
//! - `error`: Decode error codes and partial failures
//! - `decoder`: Framing, segment splitting and record assembly
//! - `date`: Fixed-width expiration date reading
//! - `linker`: Primary/Secondary pairing and batch linking
//! - `scanner`: Batch decoding of newline-separated scanner output
//!
//! ## Example
//!
//! ```
//! use hibc_core::{decode, is_pair, merge};
//!
//! let primary = decode("+A99912345/").unwrap();
//! let secondary = decode("+$$52001510X3/R").unwrap();
//!
//! assert!(is_pair(&primary, &secondary));
//! let label = merge(&primary, &secondary).unwrap();
//! assert_eq!(label.labeler_id(), "A999");
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

extern crate alloc;

pub mod constants;
pub mod date;
pub mod decoder;
pub mod error;
pub mod linker;
mod primary;
mod reader;
pub mod scanner;
mod secondary;
pub mod types;

// Re-export commonly used types
pub use constants::DecodeOptions;
pub use decoder::{decode, decode_with};
pub use error::{DecodeError, DecodeFailure};
pub use linker::{is_pair, link_labels, merge, LinkReport};
pub use types::{
    DecodedBarcode, LabelRecord, LotOrSerial, MergedBarcode, PrimaryFields, SecondaryFields,
    SegmentKind,
};

/// Result type alias for HIBC decoding
pub type Result<T> = core::result::Result<T, DecodeFailure>;
