//! Decode a shift log of scanned payloads and pair split labels

use hibc_core::{decode, is_pair, link_labels, merge};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("HIBC Pairing Example\n");

    // A label printed as two barcodes
    let primary = decode("+A99912345/")?;
    let secondary = decode("+$$52001510X3/R")?;

    println!("Primary:   {:?} -> check {:?}", primary.raw, primary.check_character);
    println!(
        "Secondary: {:?} -> link {:?}",
        secondary.raw,
        secondary.link_character()
    );
    println!("Pair: {}", is_pair(&primary, &secondary));

    if let Some(merged) = merge(&primary, &secondary) {
        println!(
            "Merged: labeler {} product {} lot {:?} expires {:?}\n",
            merged.labeler_id(),
            merged.product_number(),
            merged.lot_or_serial().map(|v| v.value()),
            merged.expiration_date()
        );
    }

    // A batch as captured from a keyboard-wedge scanner
    let log = [
        "+H123PRODUCT0L",
        "+Z999009993020351/$$82409053C001C",
        "+$+0001LC",
    ];
    let records = log.iter().map(|raw| decode(raw)).collect::<Result<Vec<_>, _>>()?;
    let report = link_labels(records);
    let stats = report.stats();

    println!(
        "Linked {} records: {} merged, {} concatenated, {} unpaired",
        stats.total, stats.merged, stats.concatenated, stats.unpaired
    );
    println!("Use 'hibc scan --input <FILE>' to process a whole log");

    Ok(())
}
