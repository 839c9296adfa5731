//! Payload decoding: framing, segment splitting and record assembly

use crate::constants::{
    DecodeOptions, FORMAT_MARKER, FRAME_MARKER, MIN_PAYLOAD_LEN, SEGMENT_SEPARATOR,
    TRAILING_PAIR_LEN,
};
use crate::error::{DecodeError, DecodeFailure};
use crate::primary::decode_primary;
use crate::reader::byte_offset;
use crate::secondary::decode_secondary;
use crate::types::{DecodedBarcode, SegmentKind};
use alloc::string::String;
use alloc::vec::Vec;

#[cfg(feature = "logging")]
use tracing::{debug, trace};

/// Payload with frame and format markers removed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Framed<'a> {
    /// Everything except the last two characters
    body: &'a str,

    /// Last two characters; may hold a `/` check or link character
    trailing: &'a str,
}

/// Strip frame markers and the format marker, then hold back the trailing pair
fn normalize_framing(raw: &str) -> Result<Framed<'_>, DecodeError> {
    let mut payload = raw;

    if let Some(rest) = payload.strip_prefix(FRAME_MARKER) {
        if rest.is_empty() {
            return Err(DecodeError::EmptyBarcode);
        }
        payload = rest;
    }

    if let Some(rest) = payload.strip_suffix(FRAME_MARKER) {
        if rest.is_empty() {
            return Err(DecodeError::EmptyBarcode);
        }
        payload = rest;
    }

    let payload = payload
        .strip_prefix(FORMAT_MARKER)
        .ok_or(DecodeError::NotHibcFormat)?;

    let len = payload.chars().count();
    if len < MIN_PAYLOAD_LEN {
        return Err(DecodeError::InvalidBarcode);
    }

    let split_at = byte_offset(payload, len - TRAILING_PAIR_LEN).ok_or(DecodeError::InvalidBarcode)?;
    let (body, trailing) = payload.split_at(split_at);

    Ok(Framed { body, trailing })
}

/// Join a split part back onto the held-back trailing pair
fn with_trailing(part: &str, trailing: &str) -> String {
    let mut segment = String::with_capacity(part.len() + trailing.len());
    segment.push_str(part);
    segment.push_str(trailing);
    segment
}

/// Decode a HIBC payload with default options
///
/// Frame markers (`*`) around the payload are optional; the `+` flag is
/// required. The payload is classified as a Primary segment (starts with a
/// letter), a Secondary segment (anything else), or a Concatenated payload
/// (Primary and Secondary separated by `/`).
///
/// # Example
/// ```
/// use hibc_core::{decode, SegmentKind};
///
/// let decoded = decode("+Z999009993020351/05271C").unwrap();
/// assert_eq!(decoded.kind, SegmentKind::Concatenated);
/// assert_eq!(decoded.labeler_id(), Some("Z999"));
/// assert_eq!(decoded.check_character, 'C');
/// ```
pub fn decode(raw: &str) -> Result<DecodedBarcode, DecodeFailure> {
    decode_with(raw, &DecodeOptions::default())
}

/// Decode a HIBC payload with explicit options
pub fn decode_with(raw: &str, options: &DecodeOptions) -> Result<DecodedBarcode, DecodeFailure> {
    let result = decode_framed(raw, options);

    #[cfg(feature = "logging")]
    match &result {
        Ok(decoded) => trace!("decoded {:?} as {}", raw, decoded.kind),
        Err(failure) => debug!("rejected {:?}: {:?}", raw, failure.error),
    }

    result
}

fn decode_framed(raw: &str, options: &DecodeOptions) -> Result<DecodedBarcode, DecodeFailure> {
    let framed = normalize_framing(raw).map_err(|e| DecodeFailure::new(raw, e))?;

    let parts: Vec<&str> = framed.body.split(SEGMENT_SEPARATOR).collect();
    match parts.as_slice() {
        [single] => {
            let segment = with_trailing(single, framed.trailing);
            let starts_with_letter = segment
                .chars()
                .next()
                .is_some_and(|c| c.is_ascii_alphabetic());
            if starts_with_letter {
                decode_single_primary(raw, &segment)
            } else {
                decode_single_secondary(raw, &segment, options)
            }
        }
        [primary, secondary] => {
            decode_concatenated(raw, primary, &with_trailing(secondary, framed.trailing), options)
        }
        _ => {
            #[cfg(feature = "logging")]
            trace!("{} segments in {:?}", parts.len(), raw);

            Err(DecodeFailure::new(raw, DecodeError::InvalidBarcode))
        }
    }
}

fn decode_single_primary(raw: &str, segment: &str) -> Result<DecodedBarcode, DecodeFailure> {
    let kind = SegmentKind::Primary;
    let primary =
        decode_primary(segment, false).map_err(|e| DecodeFailure::new(raw, e).with_kind(kind))?;

    let check_character = primary
        .check_character
        .ok_or_else(|| DecodeFailure::new(raw, DecodeError::InvalidLine1).with_kind(kind))?;

    Ok(DecodedBarcode {
        raw: String::from(raw),
        kind,
        check_character,
        primary: Some(primary.fields),
        secondary: None,
    })
}

fn decode_single_secondary(
    raw: &str,
    segment: &str,
    options: &DecodeOptions,
) -> Result<DecodedBarcode, DecodeFailure> {
    let kind = SegmentKind::Secondary;
    let secondary = decode_secondary(segment, false, options)
        .map_err(|e| DecodeFailure::new(raw, e).with_kind(kind))?;

    Ok(DecodedBarcode {
        raw: String::from(raw),
        kind,
        check_character: secondary.check_character,
        primary: None,
        secondary: Some(secondary.fields),
    })
}

fn decode_concatenated(
    raw: &str,
    primary_part: &str,
    secondary_part: &str,
    options: &DecodeOptions,
) -> Result<DecodedBarcode, DecodeFailure> {
    let kind = SegmentKind::Concatenated;
    let primary = decode_primary(primary_part, true)
        .map_err(|e| DecodeFailure::new(raw, e).with_kind(kind))?;

    let secondary = match decode_secondary(secondary_part, true, options) {
        Ok(secondary) => secondary,
        Err(e) => {
            return Err(DecodeFailure::new(raw, e)
                .with_kind(kind)
                .with_primary(primary.fields))
        }
    };

    Ok(DecodedBarcode {
        raw: String::from(raw),
        kind,
        check_character: secondary.check_character,
        primary: Some(primary.fields),
        secondary: Some(secondary.fields),
    })
}
