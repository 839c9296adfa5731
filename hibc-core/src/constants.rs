//! Constants and field layouts for HIBC supplier labeling payloads

use serde::{Deserialize, Serialize};

/// Optional start/stop character some scanners leave around the payload
pub const FRAME_MARKER: char = '*';

/// Mandatory HIBC flag character at the start of every payload
pub const FORMAT_MARKER: char = '+';

/// Separator between the Primary and Secondary halves of a Concatenated payload
pub const SEGMENT_SEPARATOR: char = '/';

/// Leading character of every non-date Secondary prefix (`$`, `$$`, `$+`, `$$+`)
pub const SECONDARY_FLAG: char = '$';

/// Serial number flag following one or two `$` characters
pub const SERIAL_FLAG: char = '+';

/// Minimum number of characters after the format marker
pub const MIN_PAYLOAD_LEN: usize = 4;

/// Trailing characters held back from the split (check and link may be `/`)
pub const TRAILING_PAIR_LEN: usize = 2;

/// Width of the labeler identification code
pub const LABELER_ID_LEN: usize = 4;

/// Width of the explicit `YYDDD` date that opens a date-led Secondary segment
pub const EXPLICIT_DATE_LEN: usize = 5;

/// Quantity identifier announcing a two digit quantity
pub const QTY_TWO_DIGIT_ID: char = '8';

/// Quantity identifier announcing a five digit quantity
pub const QTY_FIVE_DIGIT_ID: char = '9';

/// Two-digit years below this value map to the 2000s, the rest to the 1900s
pub const DEFAULT_CENTURY_PIVOT: u8 = 69;

/// Returns the number of quantity digits announced by `identifier`, if any
pub const fn quantity_width(identifier: char) -> Option<usize> {
    match identifier {
        QTY_TWO_DIGIT_ID => Some(2),
        QTY_FIVE_DIGIT_ID => Some(5),
        _ => None,
    }
}

/// Fixed-width date layouts used by HIBC expiration dates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DateLayout {
    /// `MMYY`, resolved to the first day of the month
    MonthYear,
    /// `MMDDYY`
    MonthDayYear,
    /// `YYMMDD`
    YearMonthDay,
    /// `YYMMDDHH`
    YearMonthDayHour,
    /// `YYDDD` (Julian day of year)
    YearDayOfYear,
    /// `YYDDDHH`
    YearDayOfYearHour,
}

impl DateLayout {
    /// Returns the number of characters the layout occupies
    pub const fn width(&self) -> usize {
        match self {
            DateLayout::MonthYear => 4,
            DateLayout::MonthDayYear => 6,
            DateLayout::YearMonthDay => 6,
            DateLayout::YearMonthDayHour => 8,
            DateLayout::YearDayOfYear => 5,
            DateLayout::YearDayOfYearHour => 7,
        }
    }

    /// Human readable pattern, as printed on HIBC documentation
    pub const fn pattern(&self) -> &'static str {
        match self {
            DateLayout::MonthYear => "MMYY",
            DateLayout::MonthDayYear => "MMDDYY",
            DateLayout::YearMonthDay => "YYMMDD",
            DateLayout::YearMonthDayHour => "YYMMDDHH",
            DateLayout::YearDayOfYear => "YYDDD",
            DateLayout::YearDayOfYearHour => "YYDDDHH",
        }
    }
}

/// Meaning of the format identifier digit that may open a lot or serial value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateMarker {
    /// A date follows; `consumes_identifier` is false for `0`/`1`, where the
    /// digit is already the first month digit
    Date {
        /// Layout of the date that follows
        layout: DateLayout,
        /// Whether the identifier digit is stripped before reading the date
        consumes_identifier: bool,
    },
    /// Identifier `7`: explicitly no date, strip the identifier only
    NoDate,
    /// Anything else: the value carries no date marker at all
    Absent,
}

impl DateMarker {
    /// Classify the first character of a lot or serial value
    pub const fn from_identifier(identifier: char) -> Self {
        let layout = match identifier {
            '0' | '1' => {
                return DateMarker::Date {
                    layout: DateLayout::MonthYear,
                    consumes_identifier: false,
                }
            }
            '2' => DateLayout::MonthDayYear,
            '3' => DateLayout::YearMonthDay,
            '4' => DateLayout::YearMonthDayHour,
            '5' => DateLayout::YearDayOfYear,
            '6' => DateLayout::YearDayOfYearHour,
            '7' => return DateMarker::NoDate,
            _ => return DateMarker::Absent,
        };
        DateMarker::Date {
            layout,
            consumes_identifier: true,
        }
    }
}

/// Runtime options for decoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodeOptions {
    /// Two-digit years below the pivot are read as 20YY, others as 19YY
    #[serde(default = "default_century_pivot")]
    pub century_pivot: u8,
}

fn default_century_pivot() -> u8 {
    DEFAULT_CENTURY_PIVOT
}

impl DecodeOptions {
    /// Create options with an explicit century pivot
    pub const fn with_century_pivot(century_pivot: u8) -> Self {
        Self { century_pivot }
    }

    /// Expand a two-digit year into a full year
    pub const fn full_year(&self, yy: u32) -> i32 {
        if yy < self.century_pivot as u32 {
            2000 + yy as i32
        } else {
            1900 + yy as i32
        }
    }
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            century_pivot: DEFAULT_CENTURY_PIVOT,
        }
    }
}
