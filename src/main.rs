//! mcpi CLI - Monte Carlo estimation sweep
//!
//! Thin entry point; argument handling and commands live in `mcpi::cli`.

use std::process::ExitCode;

use mcpi::cli::{run_cli, Args};

fn main() -> ExitCode {
    match Args::parse() {
        Ok(args) => run_cli(args),
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("Run 'mcpi help' for usage.");
            ExitCode::from(1)
        }
    }
}
