//! Integration tests for the complete scan → decode → link flow

use hibc_core::{
    constants::DecodeOptions,
    linker::link_labels,
    scanner::{decoded_records, scan_lines, scan_lines_with_stats},
    DecodeError, LabelRecord, SegmentKind,
};

const SHIFT_LOG: &str = "\
+A99912345/
+$$52001510X3/R
*+Z999009993020351/$$82409053C001C*

+H123PRODUCT0L
+$+0001LC
not-a-label
+$$13053C001LC
";

#[test]
fn test_full_workflow() {
    // Step 1: Scan the log
    let (lines, stats) = scan_lines_with_stats(SHIFT_LOG, &DecodeOptions::default());

    assert_eq!(stats.lines_scanned, 7);
    assert_eq!(stats.decoded, 5);
    assert_eq!(stats.failures, 2);
    assert_eq!(stats.primary, 2);
    assert_eq!(stats.secondary, 2);
    assert_eq!(stats.concatenated, 1);

    // Blank line is skipped, numbering is preserved
    assert_eq!(lines[3].line, 5);

    // Step 2: Link decoded records into labels
    let report = link_labels(decoded_records(lines));

    assert_eq!(report.merged.len(), 2);
    assert_eq!(report.concatenated.len(), 1);
    assert!(report.unpaired_primaries.is_empty());
    assert!(report.unpaired_secondaries.is_empty());

    let first = &report.merged[0];
    assert_eq!(first.labeler_id(), "A999");
    assert_eq!(first.product_number(), "1234");
    assert_eq!(first.unit_of_measure(), 5);
    assert_eq!(first.link_character, '/');

    let second = &report.merged[1];
    assert_eq!(second.labeler_id(), "H123");
    assert_eq!(second.product_number(), "PRODUCT");
    assert_eq!(second.lot_or_serial().and_then(|v| v.serial()), Some("0001"));

    let stats = report.stats();
    assert_eq!(stats.total, 5);
    assert!((stats.pairing_rate - 100.0).abs() < 1e-9);

    // Step 3: One record per physical label
    let labels = report.into_labels();
    assert_eq!(labels.len(), 3);
    assert_eq!(labels[0].kind(), SegmentKind::Merged);
    assert_eq!(labels[1].kind(), SegmentKind::Merged);
    assert_eq!(labels[2].kind(), SegmentKind::Concatenated);
    assert_eq!(labels[2].labeler_id(), Some("Z999"));
}

#[test]
fn test_failures_are_reported_per_line() {
    let lines = scan_lines(SHIFT_LOG);

    let failures: Vec<_> = lines
        .iter()
        .filter_map(|l| l.result.as_ref().err().map(|f| (l.line, f.error)))
        .collect();

    assert_eq!(
        failures,
        vec![
            (7, DecodeError::NotHibcFormat),
            (8, DecodeError::InvalidExpirationDate),
        ]
    );
}

#[test]
fn test_unmatched_segments_stay_separate() {
    let log = "+A99912345X\n+$$52001510X3/R\n";
    let report = link_labels(decoded_records(scan_lines(log)));

    assert!(report.merged.is_empty());
    assert_eq!(report.unpaired_primaries.len(), 1);
    assert_eq!(report.unpaired_secondaries.len(), 1);
    assert_eq!(report.stats().pairing_rate, 0.0);

    let labels = report.into_labels();
    assert!(matches!(labels[0], LabelRecord::Single(ref d) if d.kind == SegmentKind::Primary));
    assert!(matches!(labels[1], LabelRecord::Single(ref d) if d.kind == SegmentKind::Secondary));
}

#[test]
fn test_century_pivot_option() {
    let options = DecodeOptions::with_century_pivot(0);
    let (lines, _) = scan_lines_with_stats("+$$3050928LOTLC\n", &options);

    let decoded = lines[0].result.as_ref().unwrap();
    let date = decoded.expiration_date().unwrap();
    assert_eq!(date.format("%Y-%m-%d").to_string(), "1905-09-28");
}

#[test]
fn test_records_serialize_to_json() {
    let lines = scan_lines("+Z999009993020351/$$+70001C\n");
    let decoded = lines[0].result.as_ref().unwrap();

    let json = serde_json::to_value(decoded).unwrap();
    assert_eq!(json["kind"], "concatenated");
    assert_eq!(json["primary"]["labeler_id"], "Z999");

    let back: hibc_core::DecodedBarcode = serde_json::from_value(json).unwrap();
    assert_eq!(&back, decoded);
}
