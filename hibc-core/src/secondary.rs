//! Secondary segment decoding
//!
//! A Secondary segment opens with one of these prefixes:
//!
//! | prefix          | meaning                                   |
//! |-----------------|-------------------------------------------|
//! | digit           | explicit `YYDDD` date, then lot           |
//! | `$` + digit     | lot                                       |
//! | `$+` + digit    | serial                                    |
//! | `$$` + digit    | lot, optionally opening with a date       |
//! | `$$+`           | serial, optionally opening with a date    |
//!
//! After the prefix come an optional quantity, the lot/serial value, the link
//! character (standalone segments only) and the check character.

use crate::constants::{
    quantity_width, DateLayout, DecodeOptions, EXPLICIT_DATE_LEN, SECONDARY_FLAG, SERIAL_FLAG,
};
use crate::date::{read_date, split_embedded_date};
use crate::error::DecodeError;
use crate::reader::{all_digits, FieldReader};
use crate::types::{LotOrSerialField, SecondaryFields};
use alloc::string::String;
use chrono::NaiveDateTime;

#[cfg(feature = "logging")]
use tracing::trace;

/// Result of decoding a Secondary segment
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SecondarySegment {
    pub(crate) fields: SecondaryFields,
    pub(crate) check_character: char,
}

/// Output of the quantity/check/link extractor
#[derive(Debug, Clone, PartialEq, Eq)]
struct TrailingFields<'a> {
    quantity: Option<u32>,
    value: &'a str,
    link_character: Option<char>,
    check_character: char,
}

/// Secondary prefix, matched in priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Prefix {
    ExplicitDate,
    Lot,
    Serial,
    LotWithDate,
    SerialWithDate,
}

impl Prefix {
    /// Match the prefix and return how many characters it occupies
    fn detect(segment: &str) -> Option<(Prefix, usize)> {
        let mut chars = segment.chars();
        let c0 = chars.next()?;
        if c0.is_ascii_digit() {
            return Some((Prefix::ExplicitDate, 0));
        }
        if c0 != SECONDARY_FLAG {
            return None;
        }

        let len = segment.chars().count();
        let c1 = chars.next();
        let c2 = chars.next();
        let is_digit = |c: Option<char>| c.is_some_and(|c| c.is_ascii_digit());

        if len > 2 && is_digit(c1) {
            Some((Prefix::Lot, 1))
        } else if len > 3 && c1 == Some(SERIAL_FLAG) && is_digit(c2) {
            Some((Prefix::Serial, 2))
        } else if len > 3 && c1 == Some(SECONDARY_FLAG) && is_digit(c2) {
            Some((Prefix::LotWithDate, 2))
        } else if len > 3 && c1 == Some(SECONDARY_FLAG) && c2 == Some(SERIAL_FLAG) {
            Some((Prefix::SerialWithDate, 3))
        } else {
            None
        }
    }

    fn field(self) -> LotOrSerialField {
        match self {
            Prefix::ExplicitDate | Prefix::Lot | Prefix::LotWithDate => LotOrSerialField::Lot,
            Prefix::Serial | Prefix::SerialWithDate => LotOrSerialField::Serial,
        }
    }

    fn embeds_date(self) -> bool {
        matches!(self, Prefix::LotWithDate | Prefix::SerialWithDate)
    }
}

/// Decode `segment` as a Secondary segment
///
/// Standalone segments end in link + check characters; the Secondary half of
/// a Concatenated payload ends in the shared check character only.
pub(crate) fn decode_secondary(
    segment: &str,
    concatenated: bool,
    options: &DecodeOptions,
) -> Result<SecondarySegment, DecodeError> {
    let (prefix, prefix_len) = Prefix::detect(segment).ok_or(DecodeError::InvalidBarcode)?;

    #[cfg(feature = "logging")]
    trace!("secondary prefix {:?} in {:?}", prefix, segment);

    let mut reader = FieldReader::new(segment);
    reader.skip(prefix_len);

    let mut expiration_date: Option<NaiveDateTime> = None;
    if prefix == Prefix::ExplicitDate {
        let text = reader
            .take_front(EXPLICIT_DATE_LEN)
            .ok_or(DecodeError::InvalidExpirationDate)?;
        expiration_date = Some(read_date(text, DateLayout::YearDayOfYear, options)?);
    }

    let trailing = extract_quantity_check_link(reader.rest(), concatenated)?;

    let mut value = trailing.value;
    if prefix.embeds_date() {
        let (date, rest) = split_embedded_date(value, options)?;
        if date.is_some() {
            expiration_date = date;
        }
        value = rest;
    }

    let lot_or_serial = if value.is_empty() {
        None
    } else {
        Some(prefix.field().wrap(String::from(value)))
    };

    Ok(SecondarySegment {
        fields: SecondaryFields {
            lot_or_serial,
            quantity: trailing.quantity,
            expiration_date,
            link_character: trailing.link_character,
        },
        check_character: trailing.check_character,
    })
}

/// Pull the optional quantity from the front, then check and link characters
/// from the back; whatever remains is the lot/serial value.
fn extract_quantity_check_link(
    data: &str,
    concatenated: bool,
) -> Result<TrailingFields<'_>, DecodeError> {
    let mut reader = FieldReader::new(data);
    if reader.is_empty() {
        return Err(DecodeError::InvalidBarcode);
    }

    let quantity = match reader.peek().and_then(quantity_width) {
        Some(width) => {
            reader.skip(1);
            let digits = reader.take_front(width).ok_or(DecodeError::InvalidQuantity)?;
            if !all_digits(digits) {
                return Err(DecodeError::InvalidQuantity);
            }
            Some(digits.parse::<u32>().map_err(|_| DecodeError::InvalidQuantity)?)
        }
        None => None,
    };

    let check_character = reader.take_back().ok_or(DecodeError::EmptyCheckCharacter)?;

    let link_character = if concatenated {
        None
    } else {
        Some(reader.take_back().ok_or(DecodeError::EmptyLinkCharacter)?)
    };

    Ok(TrailingFields {
        quantity,
        value: reader.rest(),
        link_character,
        check_character,
    })
}
