//! Wallet Ledger CLI
//!
//! Runs an operation script against a fresh (or imported) ledger.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- script.csv > accounts.csv
//! cargo run -- --strategy async --queue-capacity 64 script.csv > accounts.csv
//! cargo run -- --import state/ --export state/ script.csv > accounts.csv
//! RUST_LOG=debug cargo run -- script.csv
//! ```
//!
//! The final account states are printed to stdout as `id,phone,balance`.
//! Failed operations are logged to stderr and do not stop the run.
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (missing arguments, unreadable input, invalid import, etc.)

use std::process;
use wallet_ledger::cli;
use wallet_ledger::strategy;
use wallet_ledger::telemetry;

fn main() {
    let args = cli::parse_args();
    telemetry::init(args.log_level.as_deref());

    let strategy = {
        let config = if matches!(args.strategy, cli::StrategyType::Async) {
            Some(args.to_queue_config())
        } else {
            None
        };
        strategy::create_strategy(args.strategy.clone(), config, args.snapshot_paths())
    };

    let mut output = std::io::stdout();
    if let Err(e) = strategy.process(&args.input_file, &mut output) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
