//! Primary segment decoding

use crate::constants::LABELER_ID_LEN;
use crate::error::DecodeError;
use crate::reader::FieldReader;
use crate::types::PrimaryFields;
use alloc::string::String;

/// Result of decoding a Primary segment
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PrimarySegment {
    pub(crate) fields: PrimaryFields,

    /// `None` for the Primary half of a Concatenated payload
    pub(crate) check_character: Option<char>,
}

/// Decode `segment` as a Primary segment
///
/// Layout: labeler id (4) + product number (variable) + unit of measure (1)
/// + check character (1). The Primary half of a Concatenated payload has no
/// check character of its own.
pub(crate) fn decode_primary(
    segment: &str,
    concatenated: bool,
) -> Result<PrimarySegment, DecodeError> {
    let mut reader = FieldReader::new(segment);

    let labeler_id = reader
        .take_front(LABELER_ID_LEN)
        .ok_or(DecodeError::InvalidLine1)?;

    if reader.is_empty() {
        return Err(DecodeError::InvalidLine1);
    }

    let check_character = if concatenated {
        None
    } else {
        let check = reader.take_back().ok_or(DecodeError::InvalidLine1)?;
        if reader.is_empty() {
            return Err(DecodeError::InvalidLine1);
        }
        Some(check)
    };

    let unit_of_measure = reader
        .take_back()
        .and_then(|c| c.to_digit(10))
        .ok_or(DecodeError::InvalidLine1)? as u8;

    Ok(PrimarySegment {
        fields: PrimaryFields {
            labeler_id: String::from(labeler_id),
            product_number: String::from(reader.rest()),
            unit_of_measure,
        },
        check_character,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_standalone_primary() {
        let decoded = decode_primary("Z999009993020351C", false).unwrap();
        assert_eq!(decoded.fields.labeler_id, "Z999");
        assert_eq!(decoded.fields.product_number, "00999302035");
        assert_eq!(decoded.fields.unit_of_measure, 1);
        assert_eq!(decoded.check_character, Some('C'));
    }

    #[test]
    fn test_decode_concatenated_primary_has_no_check() {
        let decoded = decode_primary("Z999009993020351", true).unwrap();
        assert_eq!(decoded.fields.product_number, "00999302035");
        assert_eq!(decoded.fields.unit_of_measure, 1);
        assert_eq!(decoded.check_character, None);
    }

    #[test]
    fn test_empty_product_number_is_accepted() {
        let decoded = decode_primary("A1231C", false).unwrap();
        assert_eq!(decoded.fields.labeler_id, "A123");
        assert_eq!(decoded.fields.product_number, "");
        assert_eq!(decoded.fields.unit_of_measure, 1);
    }

    #[test]
    fn test_too_short() {
        assert_eq!(decode_primary("Z99", false), Err(DecodeError::InvalidLine1));
        assert_eq!(decode_primary("Z999", false), Err(DecodeError::InvalidLine1));
        assert_eq!(decode_primary("Z999C", false), Err(DecodeError::InvalidLine1));
        assert_eq!(decode_primary("Z999", true), Err(DecodeError::InvalidLine1));
    }

    #[test]
    fn test_unit_of_measure_must_be_digit() {
        assert_eq!(
            decode_primary("Z99900999302035XC", false),
            Err(DecodeError::InvalidLine1)
        );
    }
}
