use anyhow::Result;
use clap::{Parser, Subcommand};
use hibc_cli::commands;
use hibc_core::constants::{DecodeOptions, DEFAULT_CENTURY_PIVOT};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "hibc")]
#[command(about = "HIBC - Decode and pair HIBC supplier labeling barcodes", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Two-digit years below this map to 20yy, the rest to 19yy
    #[arg(long, global = true, default_value_t = DEFAULT_CENTURY_PIVOT)]
    century_pivot: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode one or more barcode payloads
    Decode {
        /// Payloads as read by the scanner, e.g. "+A99912345/"
        #[arg(required = true)]
        barcodes: Vec<String>,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check whether a Primary and a Secondary belong to the same label
    Pair {
        /// First payload (Primary or Secondary)
        first: String,

        /// Second payload (Primary or Secondary)
        second: String,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Decode and link a file of newline-separated payloads
    Scan {
        /// Input file to scan, or "-" for stdin
        #[arg(short, long)]
        input: String,

        /// Output JSON file for the scan report
        #[arg(short, long)]
        output: Option<String>,

        /// Show statistics only
        #[arg(long)]
        stats_only: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    let options = DecodeOptions::with_century_pivot(cli.century_pivot);

    // Execute command
    match cli.command {
        Commands::Decode { barcodes, json } => {
            commands::decode::execute(&barcodes, json, &options)
        }

        Commands::Pair {
            first,
            second,
            json,
        } => commands::pair::execute(&first, &second, json, &options),

        Commands::Scan {
            input,
            output,
            stats_only,
        } => commands::scan::execute(&input, output.as_deref(), stats_only, &options),
    }
}
