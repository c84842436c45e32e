//! Bank Ledger CLI
//!
//! # Usage
//!
//! ```bash
//! cargo run -- roster.csv > updated_roster.csv
//! cargo run -- roster.csv --transactions batch.csv --output updated_roster.csv
//! cargo run -- roster.csv --transactions batch.csv --log-file bank.log --statements-dir statements
//! ```
//!
//! The program loads the customer roster, optionally replays a batch
//! transaction file against it, then writes the updated roster (to stdout
//! or `--output`) and, if requested, a statement file per customer.
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (missing arguments, file not found, malformed roster, etc.)

use std::fs::File;
use std::process;

use bank_ledger::cli;
use bank_ledger::{
    io, AuditLog, LedgerError, TransactionEngine,
};

fn run(args: cli::CliArgs) -> Result<(), String> {
    let registry = io::read_roster(&args.roster_file).map_err(|e| {
        format!("Failed to load roster '{}': {}", args.roster_file.display(), e)
    })?;

    let audit = match &args.log_file {
        Some(path) => AuditLog::with_sink(path)
            .map_err(|e| format!("Failed to open log file '{}': {}", path.display(), e))?,
        None => AuditLog::new(),
    };

    let mut engine = TransactionEngine::new(registry, audit);

    if let Some(path) = &args.transactions_file {
        let summary = io::replay(&mut engine, path)?;
        eprintln!(
            "Replayed {} transactions ({} rejected, {} malformed)",
            summary.applied, summary.rejected, summary.malformed
        );
    }

    let write_result: Result<(), LedgerError> = match &args.output_file {
        Some(path) => File::create(path)
            .map_err(LedgerError::from)
            .and_then(|mut file| io::write_roster(engine.registry(), &mut file)),
        None => io::write_roster(engine.registry(), &mut std::io::stdout()),
    };
    write_result.map_err(|e| format!("Failed to write roster: {}", e))?;

    if let Some(dir) = &args.statements_dir {
        io::write_all_statements(&engine, dir)
            .map_err(|e| format!("Failed to write statements: {}", e))?;
    }

    Ok(())
}

fn main() {
    let args = cli::parse_args();

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
