use anyhow::{Context, Result};
use colored::*;
use hibc_core::{
    constants::DecodeOptions, decode_with, DecodeError, DecodeFailure, DecodedBarcode,
    SegmentKind,
};
use serde::Serialize;
use tracing::info;

/// Outcome of decoding one command-line argument
#[derive(Debug, Serialize)]
pub struct DecodeOutput {
    pub input: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record: Option<DecodedBarcode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorOutput>,
}

#[derive(Debug, Serialize)]
pub struct ErrorOutput {
    pub code: u8,
    pub error: DecodeError,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<SegmentKind>,
}

impl From<DecodeFailure> for ErrorOutput {
    fn from(failure: DecodeFailure) -> Self {
        Self {
            code: failure.error.code(),
            error: failure.error,
            message: failure.error.to_string(),
            kind: failure.kind,
        }
    }
}

/// Decode every barcode, keeping failures alongside successes
pub fn decode_all(barcodes: &[String], options: &DecodeOptions) -> Vec<DecodeOutput> {
    barcodes
        .iter()
        .map(|raw| match decode_with(raw, options) {
            Ok(record) => DecodeOutput {
                input: raw.clone(),
                record: Some(record),
                error: None,
            },
            Err(failure) => DecodeOutput {
                input: raw.clone(),
                record: None,
                error: Some(failure.into()),
            },
        })
        .collect()
}

pub fn execute(barcodes: &[String], json: bool, options: &DecodeOptions) -> Result<()> {
    info!("Decoding {} barcode(s)", barcodes.len());

    let outputs = decode_all(barcodes, options);

    if json {
        let text = serde_json::to_string_pretty(&outputs)
            .with_context(|| "Failed to serialize decode results")?;
        println!("{}", text);
        return Ok(());
    }

    for output in &outputs {
        match (&output.record, &output.error) {
            (Some(record), _) => print_record(&output.input, record),
            (None, Some(error)) => println!(
                "{} {:?}: {} (code {})",
                "✗".red(),
                output.input,
                error.message,
                error.code
            ),
            (None, None) => {}
        }
    }

    let failed = outputs.iter().filter(|o| o.error.is_some()).count();
    println!();
    println!(
        "Decoded {} of {} barcode(s)",
        outputs.len() - failed,
        outputs.len()
    );

    Ok(())
}

fn print_record(input: &str, record: &DecodedBarcode) {
    println!("{} {:?} ({})", "✓".green(), input, record.kind);
    if let Some(primary) = &record.primary {
        println!("  Labeler:           {}", primary.labeler_id);
        println!("  Product:           {}", primary.product_number);
        println!("  Unit of measure:   {}", primary.unit_of_measure);
    }
    if let Some(value) = record.lot() {
        println!("  Lot:               {}", value);
    }
    if let Some(value) = record.serial() {
        println!("  Serial:            {}", value);
    }
    if let Some(quantity) = record.quantity() {
        println!("  Quantity:          {}", quantity);
    }
    if let Some(date) = record.expiration_date() {
        println!("  Expires:           {}", date);
    }
    if let Some(link) = record.link_character() {
        println!("  Link character:    {:?}", link);
    }
    println!("  Check character:   {:?}", record.check_character);
}
