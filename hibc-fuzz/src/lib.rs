//! Fuzzing entry points for hibc-core
//!
//! To use with cargo-fuzz:
//! 1. Install cargo-fuzz: cargo install cargo-fuzz
//! 2. Run fuzzer: cargo fuzz run fuzz_decode

use hibc_core::{
    constants::DecodeOptions,
    decode, is_pair, link_labels, merge,
    scanner::{decoded_records, scan_lines_with_stats},
};

pub fn fuzz_decode(data: &[u8]) {
    let raw = String::from_utf8_lossy(data);

    // Try to decode - should never panic
    let _ = decode(&raw);
}

/// Split the input in two and try to pair the halves
pub fn fuzz_pair(data: &[u8]) {
    let raw = String::from_utf8_lossy(data);
    let Some((a, b)) = raw.split_once('\n') else {
        return;
    };

    if let (Ok(a), Ok(b)) = (decode(a), decode(b)) {
        let paired = is_pair(&a, &b);
        assert_eq!(paired, is_pair(&b, &a));
        assert_eq!(paired, merge(&a, &b).is_some());
    }
}

pub fn fuzz_scan(data: &[u8]) {
    let text = String::from_utf8_lossy(data);

    // Try to scan and link - should never panic
    let (lines, _) = scan_lines_with_stats(&text, &DecodeOptions::default());
    let _ = link_labels(decoded_records(lines));
}
