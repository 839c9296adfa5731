//! Batch decoding of newline-separated scanner output

use crate::constants::DecodeOptions;
use crate::decoder::decode_with;
use crate::error::DecodeFailure;
use crate::types::{DecodedBarcode, SegmentKind};
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

#[cfg(feature = "logging")]
use tracing::{debug, warn};

/// A payload decoded from one line of input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedLine {
    /// 1-based line number in the input
    pub line: usize,

    /// Decode outcome for that line
    pub result: Result<DecodedBarcode, DecodeFailure>,
}

/// Scan statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanStats {
    /// Non-blank lines seen
    pub lines_scanned: usize,

    /// Lines that decoded successfully
    pub decoded: usize,

    /// Lines that failed to decode
    pub failures: usize,

    /// Standalone Primary segments
    pub primary: usize,

    /// Standalone Secondary segments
    pub secondary: usize,

    /// Concatenated payloads
    pub concatenated: usize,
}

impl ScanStats {
    /// Calculate the decode success rate as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.lines_scanned == 0 {
            0.0
        } else {
            (self.decoded as f64 / self.lines_scanned as f64) * 100.0
        }
    }

    fn record(&mut self, result: &Result<DecodedBarcode, DecodeFailure>) {
        self.lines_scanned += 1;
        match result {
            Ok(decoded) => {
                self.decoded += 1;
                match decoded.kind {
                    SegmentKind::Primary => self.primary += 1,
                    SegmentKind::Secondary => self.secondary += 1,
                    SegmentKind::Concatenated => self.concatenated += 1,
                    SegmentKind::Merged => {}
                }
            }
            Err(_) => self.failures += 1,
        }
    }
}

/// Split `text` into non-blank payload lines, tolerating CRLF line endings
fn payload_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line))
        .filter(|(_, line)| !line.trim().is_empty())
}

/// Decode every non-blank line of `text` with default options
///
/// Lines are decoded as-is (no whitespace trimming), because a space is a
/// legal check or link character.
pub fn scan_lines(text: &str) -> Vec<ScannedLine> {
    scan_lines_with_stats(text, &DecodeOptions::default()).0
}

/// Decode every non-blank line of `text` and collect statistics
pub fn scan_lines_with_stats(
    text: &str,
    options: &DecodeOptions,
) -> (Vec<ScannedLine>, ScanStats) {
    let mut stats = ScanStats::default();
    let mut results = Vec::new();

    for (line, payload) in payload_lines(text) {
        let result = decode_with(payload, options);

        #[cfg(feature = "logging")]
        if let Err(failure) = &result {
            warn!("Line {}: {:?} rejected: {:?}", line, payload, failure.error);
        }

        stats.record(&result);
        results.push(ScannedLine { line, result });
    }

    #[cfg(feature = "logging")]
    debug!(
        "Scan complete: {} of {} lines decoded",
        stats.decoded, stats.lines_scanned
    );

    (results, stats)
}

/// Keep only the successfully decoded records, in input order
pub fn decoded_records(lines: Vec<ScannedLine>) -> Vec<DecodedBarcode> {
    lines.into_iter().filter_map(|l| l.result.ok()).collect()
}
