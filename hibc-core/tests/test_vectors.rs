//! Test vectors from the HIBC supplier labeling documentation
//!
//! Every sample label decodes to labeler `Z999`, product `00999302035`, unit
//! of measure `1`, lot `3C001` or serial `0001`, and one of three reference
//! dates: September 2005, September 28 2005, or September 28 2005 22:00.

use chrono::{NaiveDate, NaiveDateTime};
use hibc_core::{decode, is_pair, merge, DecodeError, DecodedBarcode, LotOrSerial, SegmentKind};

const LABELER_ID: &str = "Z999";
const PRODUCT: &str = "00999302035";
const UOM: u8 = 1;
const LOT: &str = "3C001";
const SERIAL: &str = "0001";

fn month_year() -> NaiveDateTime {
    at(2005, 9, 1, 0)
}

fn day_month_year() -> NaiveDateTime {
    at(2005, 9, 28, 0)
}

fn day_month_year_hour() -> NaiveDateTime {
    at(2005, 9, 28, 22)
}

fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, 0, 0)
        .unwrap()
}

fn decode_ok(barcode: &str) -> DecodedBarcode {
    match decode(barcode) {
        Ok(decoded) => decoded,
        Err(failure) => panic!("{} failed with {:?}", barcode, failure.error),
    }
}

fn assert_primary_fields(decoded: &DecodedBarcode) {
    assert_eq!(decoded.labeler_id(), Some(LABELER_ID));
    assert_eq!(decoded.product_number(), Some(PRODUCT));
    assert_eq!(decoded.unit_of_measure(), Some(UOM));
}

fn assert_concatenated(
    barcode: &str,
    date: Option<NaiveDateTime>,
    lot_or_serial: Option<LotOrSerial>,
    quantity: Option<u32>,
) {
    let decoded = decode_ok(barcode);
    assert_eq!(decoded.kind, SegmentKind::Concatenated, "{}", barcode);
    assert_primary_fields(&decoded);
    assert_eq!(decoded.check_character, 'C', "{}", barcode);
    assert_eq!(decoded.link_character(), None, "{}", barcode);
    assert_eq!(decoded.expiration_date(), date, "{}", barcode);
    assert_eq!(decoded.lot_or_serial(), lot_or_serial.as_ref(), "{}", barcode);
    assert_eq!(decoded.quantity(), quantity, "{}", barcode);
}

fn assert_secondary(
    barcode: &str,
    date: Option<NaiveDateTime>,
    lot_or_serial: Option<LotOrSerial>,
    quantity: Option<u32>,
) {
    let decoded = decode_ok(barcode);
    assert_eq!(decoded.kind, SegmentKind::Secondary, "{}", barcode);
    assert_eq!(decoded.primary, None, "{}", barcode);
    assert_eq!(decoded.link_character(), Some('L'), "{}", barcode);
    assert_eq!(decoded.check_character, 'C', "{}", barcode);
    assert_eq!(decoded.expiration_date(), date, "{}", barcode);
    assert_eq!(decoded.lot_or_serial(), lot_or_serial.as_ref(), "{}", barcode);
    assert_eq!(decoded.quantity(), quantity, "{}", barcode);
}

fn lot() -> Option<LotOrSerial> {
    Some(LotOrSerial::Lot(LOT.to_string()))
}

fn serial() -> Option<LotOrSerial> {
    Some(LotOrSerial::Serial(SERIAL.to_string()))
}

#[test]
fn test_spaces_as_check_and_link_characters() {
    let primary = decode_ok("+Z999009993020351 ");
    assert_eq!(primary.kind, SegmentKind::Primary);
    assert_primary_fields(&primary);
    assert_eq!(primary.check_character, ' ');

    let mismatched = decode_ok("+$$09053C001 C");
    assert_eq!(mismatched.kind, SegmentKind::Secondary);
    assert_eq!(mismatched.expiration_date(), Some(month_year()));
    assert_eq!(mismatched.lot(), Some(LOT));
    assert_eq!(mismatched.link_character(), Some(' '));
    assert_eq!(mismatched.check_character, 'C');

    let matching = decode_ok("+$$09053C001  ");
    assert_eq!(matching.link_character(), Some(' '));
    assert_eq!(matching.check_character, ' ');

    // Pairing compares the Primary check with the Secondary link only
    assert!(is_pair(&primary, &mismatched));
    assert!(is_pair(&primary, &matching));
}

#[test]
fn test_leading_and_trailing_frame_markers() {
    for barcode in [
        "*+Z999009993020351/05271C",
        "+Z999009993020351/05271C*",
        "*+Z999009993020351/05271C*",
    ] {
        assert_concatenated(barcode, Some(day_month_year()), None, None);
    }
}

#[test]
fn test_slash_in_check_and_link_characters() {
    let primary = decode_ok("+Z999009993020351/");
    assert_eq!(primary.kind, SegmentKind::Primary);
    assert_primary_fields(&primary);
    assert_eq!(primary.check_character, '/');

    let unlinked = decode_ok("+$$09053C001L/");
    assert_eq!(unlinked.kind, SegmentKind::Secondary);
    assert_eq!(unlinked.expiration_date(), Some(month_year()));
    assert_eq!(unlinked.lot(), Some(LOT));
    assert_eq!(unlinked.link_character(), Some('L'));
    assert_eq!(unlinked.check_character, '/');

    let linked = decode_ok("+$$09053C001//");
    assert_eq!(linked.link_character(), Some('/'));
    assert_eq!(linked.check_character, '/');

    assert!(!is_pair(&primary, &unlinked));
    assert!(is_pair(&primary, &linked));
}

#[test]
fn test_concatenated_lot_formats() {
    let cases = [
        ("+Z999009993020351/05271C", Some(day_month_year()), None),
        ("+Z999009993020351/$3C001C", None, lot()),
        ("+Z999009993020351/$$09053C001C", Some(month_year()), lot()),
        ("+Z999009993020351/$$20928053C001C", Some(day_month_year()), lot()),
        ("+Z999009993020351/$$30509283C001C", Some(day_month_year()), lot()),
        ("+Z999009993020351/$$4050928223C001C", Some(day_month_year_hour()), lot()),
        ("+Z999009993020351/$$5052713C001C", Some(day_month_year()), lot()),
        ("+Z999009993020351/$$605271223C001C", Some(day_month_year_hour()), lot()),
        ("+Z999009993020351/$$73C001C", None, lot()),
    ];
    for (barcode, date, lot_or_serial) in cases {
        assert_concatenated(barcode, date, lot_or_serial, None);
    }
}

#[test]
fn test_concatenated_two_digit_quantity() {
    let cases = [
        ("+Z999009993020351/$$82409053C001C", Some(month_year()), lot()),
        ("+Z999009993020351/$$82420928053C001C", Some(day_month_year()), lot()),
        ("+Z999009993020351/$$82430509283C001C", Some(day_month_year()), lot()),
        ("+Z999009993020351/$$8244050928223C001C", Some(day_month_year_hour()), lot()),
        ("+Z999009993020351/$$8245052713C001C", Some(day_month_year()), lot()),
        ("+Z999009993020351/$$824605271223C001C", Some(day_month_year_hour()), lot()),
        ("+Z999009993020351/$$82473C001C", None, lot()),
        ("+Z999009993020351/$$824C", None, None),
    ];
    for (barcode, date, lot_or_serial) in cases {
        assert_concatenated(barcode, date, lot_or_serial, Some(24));
    }
}

#[test]
fn test_concatenated_five_digit_quantity() {
    let cases = [
        ("+Z999009993020351/$$90010009053C001C", Some(month_year()), lot()),
        ("+Z999009993020351/$$90010020928053C001C", Some(day_month_year()), lot()),
        ("+Z999009993020351/$$90010030509283C001C", Some(day_month_year()), lot()),
        ("+Z999009993020351/$$9001004050928223C001C", Some(day_month_year_hour()), lot()),
        ("+Z999009993020351/$$9001005052713C001C", Some(day_month_year()), lot()),
        ("+Z999009993020351/$$900100605271223C001C", Some(day_month_year_hour()), lot()),
        ("+Z999009993020351/$$90010073C001C", None, lot()),
        ("+Z999009993020351/$$900100C", None, None),
    ];
    for (barcode, date, lot_or_serial) in cases {
        assert_concatenated(barcode, date, lot_or_serial, Some(100));
    }
}

#[test]
fn test_concatenated_serial_formats() {
    // The documentation's hour samples for serials encode 20:00, not 22:00
    let cases = [
        ("+Z999009993020351/$+0001C", None),
        ("+Z999009993020351/$$+09050001C", Some(month_year())),
        ("+Z999009993020351/$$+20928050001C", Some(day_month_year())),
        ("+Z999009993020351/$$+30509280001C", Some(day_month_year())),
        ("+Z999009993020351/$$+4050928200001C", Some(at(2005, 9, 28, 20))),
        ("+Z999009993020351/$$+5052710001C", Some(day_month_year())),
        ("+Z999009993020351/$$+605271200001C", Some(at(2005, 9, 28, 20))),
        ("+Z999009993020351/$$+70001C", None),
    ];
    for (barcode, date) in cases {
        assert_concatenated(barcode, date, serial(), None);
    }
}

#[test]
fn test_secondary_documentation_samples() {
    let cases = [
        ("+05271LC", Some(day_month_year()), None, None),
        ("+$3C001LC", None, lot(), None),
        ("+$$09053C001LC", Some(month_year()), lot(), None),
        ("+$$20928053C001LC", Some(day_month_year()), lot(), None),
        ("+$$30509283C001LC", Some(day_month_year()), lot(), None),
        ("+$$4050928223C001LC", Some(day_month_year_hour()), lot(), None),
        ("+$$5052713C001LC", Some(day_month_year()), lot(), None),
        ("+$$605271223C001LC", Some(day_month_year_hour()), lot(), None),
        ("+$$73C001LC", None, lot(), None),
        ("+$$82409053C001LC", Some(month_year()), lot(), Some(24)),
        ("+$$82420928053C001LC", Some(day_month_year()), lot(), Some(24)),
        ("+$$82430509283C001LC", Some(day_month_year()), lot(), Some(24)),
        ("+$$8244050928223C001LC", Some(day_month_year_hour()), lot(), Some(24)),
        ("+$$8245052713C001LC", Some(day_month_year()), lot(), Some(24)),
        ("+$$824605271223C001LC", Some(day_month_year_hour()), lot(), Some(24)),
        ("+$$82473C001LC", None, lot(), Some(24)),
        ("+$$824LC", None, None, Some(24)),
        ("+$$90010009053C001LC", Some(month_year()), lot(), Some(100)),
        ("+$$90010020928053C001LC", Some(day_month_year()), lot(), Some(100)),
        ("+$$90010030509283C001LC", Some(day_month_year()), lot(), Some(100)),
        ("+$$9001004050928223C001LC", Some(day_month_year_hour()), lot(), Some(100)),
        ("+$$9001005052713C001LC", Some(day_month_year()), lot(), Some(100)),
        ("+$$900100605271223C001LC", Some(day_month_year_hour()), lot(), Some(100)),
        ("+$$90010073C001LC", None, lot(), Some(100)),
        ("+$$900100LC", None, None, Some(100)),
        ("+$+0001LC", None, serial(), None),
        ("+$$+09050001LC", Some(month_year()), serial(), None),
        ("+$$+20928050001LC", Some(day_month_year()), serial(), None),
        ("+$$+30509280001LC", Some(day_month_year()), serial(), None),
        ("+$$+4050928200001LC", Some(at(2005, 9, 28, 20)), serial(), None),
        ("+$$+5052710001LC", Some(day_month_year()), serial(), None),
        ("+$$+605271200001LC", Some(at(2005, 9, 28, 20)), serial(), None),
        ("+$$+70001LC", None, serial(), None),
    ];
    for (barcode, date, lot_or_serial, quantity) in cases {
        assert_secondary(barcode, date, lot_or_serial, quantity);
    }
}

#[test]
fn test_primary_and_secondary_merge() {
    let primary = decode_ok("+Z999009993020351C");
    let secondary = decode_ok("+$$8244050928223C001CX");

    assert!(is_pair(&primary, &secondary));
    let merged = merge(&primary, &secondary).unwrap();
    assert_eq!(merged.kind(), SegmentKind::Merged);
    assert_eq!(merged.labeler_id(), LABELER_ID);
    assert_eq!(merged.product_number(), PRODUCT);
    assert_eq!(merged.unit_of_measure(), UOM);
    assert_eq!(merged.lot_or_serial(), lot().as_ref());
    assert_eq!(merged.quantity(), Some(24));
    assert_eq!(merged.expiration_date(), Some(day_month_year_hour()));
}

#[test]
fn test_error_codes() {
    let cases = [
        ("", DecodeError::NotHibcFormat),
        ("*", DecodeError::EmptyBarcode),
        ("**", DecodeError::EmptyBarcode),
        ("Z999009993020351C", DecodeError::NotHibcFormat),
        ("+Z99", DecodeError::InvalidBarcode),
        ("+A1/2/3/4LC", DecodeError::InvalidBarcode),
        ("+#3C001LC", DecodeError::InvalidBarcode),
        ("+Z99/05271C", DecodeError::InvalidLine1),
        ("+Z99C", DecodeError::InvalidLine1),
        ("+052LC", DecodeError::InvalidExpirationDate),
        ("+05400LC", DecodeError::InvalidExpirationDate),
        ("+$$13053C001LC", DecodeError::InvalidExpirationDate),
        ("+$$8AB3C001LC", DecodeError::InvalidQuantity),
        ("+$$824", DecodeError::EmptyCheckCharacter),
        ("+$$824C", DecodeError::EmptyLinkCharacter),
    ];
    for (barcode, expected) in cases {
        let failure = decode(barcode).unwrap_err();
        assert_eq!(failure.error, expected, "{:?}", barcode);
        assert_eq!(failure.raw, barcode);
    }
}
