use clap::Parser;
use omr_extractor::cli::{args::Args, commands};
use std::process;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    match commands::run(args) {
        Ok(_stats) => {
            // Success - stats have already been reported by the command
            process::exit(0);
        }
        Err(error) => {
            // Error occurred - print the full cause chain and exit nonzero
            eprintln!("Error: {:#}", anyhow::Error::from(error));
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("OMR Extractor - Answer Sheet Response Extraction");
    println!("================================================");
    println!();
    println!("Decode the raw CSV export of an OMR scanning pipeline into student");
    println!("registration ids, multiple-choice answers and survey responses.");
    println!();
    println!("USAGE:");
    println!("    omr-extractor <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    extract     Decode a scan export and write the responses (main command)");
    println!("    check       Validate a scan export without writing output");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Show help information");
    println!("    -V, --version    Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    # Extract responses from a scan export:");
    println!("    omr-extractor extract --input scans.csv --output responses.csv");
    println!();
    println!("    # Supply manually recovered questionnaire ids:");
    println!("    omr-extractor extract --input scans.csv --output responses.csv \\");
    println!("                          --qids qids.csv");
    println!();
    println!("    # Validate a batch scanned from the old minimal sheet:");
    println!("    omr-extractor check --input scans.csv --schema minimal");
    println!();
    println!("For detailed help on any command, use:");
    println!("    omr-extractor <COMMAND> --help");
}
