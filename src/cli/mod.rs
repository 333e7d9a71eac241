//! CLI module for mcpi.
//!
//! All CLI logic lives here rather than in main.rs so it can be tested.
//! The entry point `run_cli` is called from main.rs with parsed arguments.

mod args;
mod commands;
mod input;
mod output;

pub use args::{Args, Command, RunOptions, DEFAULT_ESTIMATE_TRIALS};
pub use commands::{
    execute, resolve_config, resolve_mode, run_cli, run_estimate, run_sweep, Streams,
};
pub use input::{prompt_values, TokenReader};
pub use output::{print_help, print_version, version_text, HELP};
