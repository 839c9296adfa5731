use anyhow::{Context, Result};
use colored::*;
use hibc_core::{
    constants::DecodeOptions, decode_with, is_pair, merge, DecodedBarcode, MergedBarcode,
    SegmentKind,
};
use serde::Serialize;
use tracing::{debug, info};

/// Result of checking two payloads against each other
#[derive(Debug, Serialize)]
pub struct PairOutput {
    pub paired: bool,
    pub first: DecodedBarcode,
    pub second: DecodedBarcode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merged: Option<MergedBarcode>,
}

/// Decode both payloads and merge them when they are two halves of one label
pub fn pair_barcodes(first: &str, second: &str, options: &DecodeOptions) -> Result<PairOutput> {
    let first = decode_with(first, options)
        .with_context(|| format!("Failed to decode first barcode: {:?}", first))?;
    let second = decode_with(second, options)
        .with_context(|| format!("Failed to decode second barcode: {:?}", second))?;

    debug!(
        "Pairing {} {:?} with {} {:?}",
        first.kind, first.raw, second.kind, second.raw
    );

    let merged = merge(&first, &second);

    Ok(PairOutput {
        paired: is_pair(&first, &second),
        first,
        second,
        merged,
    })
}

pub fn execute(first: &str, second: &str, json: bool, options: &DecodeOptions) -> Result<()> {
    info!("Checking whether {:?} and {:?} pair", first, second);

    let output = pair_barcodes(first, second, options)?;

    if json {
        let text = serde_json::to_string_pretty(&output)
            .with_context(|| "Failed to serialize pair result")?;
        println!("{}", text);
        return Ok(());
    }

    match &output.merged {
        Some(merged) => {
            println!(
                "{} {:?} and {:?} are linked by {:?}",
                "✓".green(),
                merged.primary_raw,
                merged.secondary_raw,
                merged.link_character
            );
            println!("  Labeler:           {}", merged.labeler_id());
            println!("  Product:           {}", merged.product_number());
            println!("  Unit of measure:   {}", merged.unit_of_measure());
            if let Some(value) = merged.lot_or_serial() {
                println!("  Lot/serial:        {}", value.value());
            }
            if let Some(quantity) = merged.quantity() {
                println!("  Quantity:          {}", quantity);
            }
            if let Some(date) = merged.expiration_date() {
                println!("  Expires:           {}", date);
            }
        }
        None => {
            println!(
                "{} {:?} ({}) and {:?} ({}) do not pair",
                "✗".red(),
                output.first.raw,
                output.first.kind,
                output.second.raw,
                output.second.kind
            );
            if let (Some(check), Some(link)) = (
                primary_check(&output.first, &output.second),
                secondary_link(&output.first, &output.second),
            ) {
                println!("  Primary check {:?} != Secondary link {:?}", check, link);
            }
        }
    }

    Ok(())
}

fn primary_check(a: &DecodedBarcode, b: &DecodedBarcode) -> Option<char> {
    [a, b]
        .into_iter()
        .find(|d| d.kind == SegmentKind::Primary)
        .map(|d| d.check_character)
}

fn secondary_link(a: &DecodedBarcode, b: &DecodedBarcode) -> Option<char> {
    [a, b].into_iter().find_map(|d| d.link_character())
}
