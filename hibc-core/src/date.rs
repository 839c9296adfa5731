//! Fixed-width expiration date reading
//!
//! HIBC dates are plain digit runs in one of six layouts. They are read
//! numerically here rather than through a locale-aware formatter, so a value
//! either has exactly the layout's digit count and a real calendar meaning, or
//! it is rejected.

use crate::constants::{DateLayout, DateMarker, DecodeOptions};
use crate::error::DecodeError;
use crate::reader::{all_digits, FieldReader};
use chrono::{NaiveDate, NaiveDateTime};

#[cfg(feature = "logging")]
use tracing::trace;

/// Read `text` as a date in `layout`
///
/// `text` must be exactly `layout.width()` ASCII digits.
pub fn read_date(
    text: &str,
    layout: DateLayout,
    options: &DecodeOptions,
) -> Result<NaiveDateTime, DecodeError> {
    if text.len() != layout.width() || !all_digits(text) {
        return Err(DecodeError::InvalidExpirationDate);
    }

    // Safe to slice by byte: every character is an ASCII digit
    let num = |range: core::ops::Range<usize>| -> u32 {
        text.as_bytes()[range]
            .iter()
            .fold(0, |acc, b| acc * 10 + u32::from(b - b'0'))
    };

    let (date, hour) = match layout {
        DateLayout::MonthYear => (
            NaiveDate::from_ymd_opt(options.full_year(num(2..4)), num(0..2), 1),
            0,
        ),
        DateLayout::MonthDayYear => (
            NaiveDate::from_ymd_opt(options.full_year(num(4..6)), num(0..2), num(2..4)),
            0,
        ),
        DateLayout::YearMonthDay => (
            NaiveDate::from_ymd_opt(options.full_year(num(0..2)), num(2..4), num(4..6)),
            0,
        ),
        DateLayout::YearMonthDayHour => (
            NaiveDate::from_ymd_opt(options.full_year(num(0..2)), num(2..4), num(4..6)),
            num(6..8),
        ),
        DateLayout::YearDayOfYear => (
            NaiveDate::from_yo_opt(options.full_year(num(0..2)), num(2..5)),
            0,
        ),
        DateLayout::YearDayOfYearHour => (
            NaiveDate::from_yo_opt(options.full_year(num(0..2)), num(2..5)),
            num(5..7),
        ),
    };

    date.and_then(|d| d.and_hms_opt(hour, 0, 0))
        .ok_or(DecodeError::InvalidExpirationDate)
}

/// Split a date embedded at the front of a lot or serial value
///
/// Returns the decoded date (if the value announces one) and the part of the
/// value left after the format identifier and date are removed. Values whose
/// first character is not a known format identifier are returned unchanged.
pub fn split_embedded_date<'a>(
    value: &'a str,
    options: &DecodeOptions,
) -> Result<(Option<NaiveDateTime>, &'a str), DecodeError> {
    let mut reader = FieldReader::new(value);
    let identifier = match reader.peek() {
        Some(c) => c,
        None => return Ok((None, value)),
    };

    match DateMarker::from_identifier(identifier) {
        DateMarker::Absent => Ok((None, value)),
        DateMarker::NoDate => {
            reader.skip(1);
            Ok((None, reader.rest()))
        }
        DateMarker::Date {
            layout,
            consumes_identifier,
        } => {
            if consumes_identifier {
                reader.skip(1);
            }
            let text = reader
                .take_front(layout.width())
                .ok_or(DecodeError::InvalidExpirationDate)?;
            let date = read_date(text, layout, options)?;

            #[cfg(feature = "logging")]
            trace!("embedded {} date {:?} -> {}", layout.pattern(), text, date);

            Ok((Some(date), reader.rest()))
        }
    }
}
