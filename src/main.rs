use anyhow::Context;
use clap::Parser;
use spectro_ingest::IngestError;
use spectro_ingest::cli::{
    args::Args,
    commands::{self, CommandSummary},
};
use std::process;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    match run_with_signals(args) {
        Ok(summary) if summary.is_success() => process::exit(0),
        Ok(summary) => {
            eprintln!("Completed with {} failure(s)", summary.failures);
            process::exit(1);
        }
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Run the selected command on a fresh runtime, aborting on CTRL+C
fn run_with_signals(args: Args) -> anyhow::Result<CommandSummary> {
    let runtime = tokio::runtime::Runtime::new().context("Failed to create async runtime")?;

    let result = runtime.block_on(async {
        tokio::select! {
            result = commands::run(args) => result,
            signal = tokio::signal::ctrl_c() => {
                if let Err(e) = signal {
                    eprintln!("Failed to listen for CTRL+C: {}", e);
                }
                eprintln!("\nReceived CTRL+C, shutting down...");
                Err(IngestError::Interrupted {
                    reason: "Processing interrupted by user".to_string(),
                })
            }
        }
    });

    result.context("Command failed")
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("Spectro Ingest - Molecular Spectroscopy File Decoder");
    println!("====================================================");
    println!();
    println!("Decode .int, .var, .qpart and Pickett/JPL-CDMS .cat files into typed");
    println!("records, derive line strengths at 300 K, and export catalogs.");
    println!();
    println!("USAGE:");
    println!("    spectro-ingest <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    inspect     Decode a single file and print its contents");
    println!("    convert     Decode a catalog and export it to Parquet or CSV");
    println!("    validate    Ingest every species listed in a TOML manifest");
    println!("    scan        Decode every metadata file under a directory");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -v, --verbose    Increase logging verbosity (repeatable)");
    println!("    -q, --quiet      Only show errors");
    println!("    -c, --config     Path to configuration file");
    println!("    -h, --help       Show help information");
    println!("    -V, --version    Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    # Show the partition function of a species:");
    println!("    spectro-ingest inspect h2co.qpart");
    println!();
    println!("    # Decode a catalog with its quantum number labels:");
    println!("    spectro-ingest inspect h2co.cat --qpart h2co.qpart --labels \"N, Ka, Kc\"");
    println!();
    println!("    # Export a rovibrational catalog to Parquet:");
    println!("    spectro-ingest convert --cat hdo.cat --qpart hdo.qpart \\");
    println!("                           --labels \"N, Ka, Kc, v\" --rovibrational --vib-label v \\");
    println!("                           -o hdo.parquet");
    println!();
    println!("    # Validate a batch of species:");
    println!("    spectro-ingest validate --manifest species.toml --format json");
    println!();
    println!("For detailed help on any command, use:");
    println!("    spectro-ingest <COMMAND> --help");
}
