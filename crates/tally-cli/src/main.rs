mod commands;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "tally",
    version,
    about = "Reconcile invoice line items against a reference price list"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract line items from an invoice PDF (without reconciling)
    Extract {
        /// Path to invoice PDF
        input_file: PathBuf,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Write extracted line items to a JSON file
        #[arg(short = 'O', long = "out", value_name = "FILE")]
        out: Option<PathBuf>,
    },
    /// Reconcile invoices against a reference price list
    Check {
        /// Invoice PDF(s) or pre-extracted JSON file(s)
        #[arg(required = true)]
        invoices: Vec<PathBuf>,

        /// Reference price list (.xlsx or .csv) with item and total columns
        #[arg(short, long, value_name = "FILE")]
        reference: PathBuf,

        /// Where to write the xlsx discrepancy report
        #[arg(long = "out", value_name = "FILE", default_value = "discrepancies.xlsx")]
        out: PathBuf,

        /// Output format for the stdout summary: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Also show matched rows that are within tolerance
        #[arg(long)]
        show_all: bool,
    },
    /// Validate and summarize a reference price list
    Reference {
        /// Path to reference file (.xlsx or .csv)
        file: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Extract {
            input_file,
            output,
            out,
        } => commands::extract::run(input_file, &output, out),
        Commands::Check {
            invoices,
            reference,
            out,
            output,
            show_all,
        } => commands::check::run(invoices, reference, out, &output, show_all),
        Commands::Reference { file } => commands::reference::run(file),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
