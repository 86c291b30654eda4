// ============================================================================
// vme-cli/src/main.rs
// ============================================================================
//
// MAIN ENTRY POINT: vme Command-Line Application
//
// Parses arguments, initializes logging and runs the extract pipeline. Any
// error is printed as "Error: <message>" on stderr and the process exits
// with status 1. Temporary downloads are owned inside `run_extract`, so they
// are cleaned up before `process::exit` is reached.
//
// AI-ASSISTANT-INFO: Entry point for the vme CLI

use clap::Parser;
use std::process;
use vme_cli::{Cli, init_logging, run_extract};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    log::debug!("vme v{} starting", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run_extract(&cli) {
        log::debug!("Extraction failed: {e:?}");
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
