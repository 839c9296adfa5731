use hibc_cli::commands::decode;
use hibc_core::{constants::DecodeOptions, DecodeError, SegmentKind};

fn args(barcodes: &[&str]) -> Vec<String> {
    barcodes.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_decode_mixed_arguments() {
    let outputs = decode::decode_all(
        &args(&["+A99912345/", "+$$52001510X3/R", "A99912345/"]),
        &DecodeOptions::default(),
    );

    assert_eq!(outputs.len(), 3);

    let primary = outputs[0].record.as_ref().unwrap();
    assert_eq!(primary.kind, SegmentKind::Primary);
    assert_eq!(primary.labeler_id(), Some("A999"));

    let secondary = outputs[1].record.as_ref().unwrap();
    assert_eq!(secondary.kind, SegmentKind::Secondary);
    assert_eq!(secondary.lot(), Some("10X3"));

    let error = outputs[2].error.as_ref().unwrap();
    assert_eq!(error.error, DecodeError::NotHibcFormat);
    assert_eq!(error.code, DecodeError::NotHibcFormat.code());
    assert!(outputs[2].record.is_none());
}

#[test]
fn test_decode_json_shape() {
    let outputs = decode::decode_all(
        &args(&["+Z999009993020351/$$+70001C", "+Z99"]),
        &DecodeOptions::default(),
    );
    let json = serde_json::to_value(&outputs).unwrap();

    assert_eq!(json[0]["input"], "+Z999009993020351/$$+70001C");
    assert_eq!(json[0]["record"]["kind"], "concatenated");
    assert!(json[0].get("error").is_none());

    assert_eq!(json[1]["error"]["error"], "InvalidBarcode");
    assert!(json[1].get("record").is_none());
}

#[test]
fn test_decode_execute_succeeds_with_failures() {
    // Individual failures are reported, not returned as errors
    decode::execute(
        &args(&["+$$824LC", "", "*"]),
        false,
        &DecodeOptions::default(),
    )
    .unwrap();

    decode::execute(&args(&["+05271LC"]), true, &DecodeOptions::default()).unwrap();
}

#[test]
fn test_decode_with_century_pivot() {
    let outputs = decode::decode_all(&args(&["+$$3690101LOTLC"]), &DecodeOptions::with_century_pivot(70));
    let date = outputs[0].record.as_ref().unwrap().expiration_date().unwrap();
    assert_eq!(date.format("%Y").to_string(), "2069");
}
