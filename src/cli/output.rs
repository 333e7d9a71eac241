//! CLI help and version text.

use std::io::Write;

use crate::error::SimResult;

/// Version line, with the git revision when the build recorded one.
#[must_use]
pub fn version_text() -> String {
    match option_env!("GIT_HASH") {
        Some(hash) if !hash.is_empty() => {
            format!("mcpi {} ({hash})", env!("CARGO_PKG_VERSION"))
        }
        _ => format!("mcpi {}", env!("CARGO_PKG_VERSION")),
    }
}

/// Help message.
pub const HELP: &str = r"mcpi - Monte Carlo estimation of π and ∫(v³+1)dv

USAGE:
    mcpi [COMMAND] [OPTIONS]

COMMANDS:
    sweep                       Multi-series sweep over sample sizes (default)
    estimate                    Single estimate with a fixed trial count
    help                        Show this help message
    version                     Show version information

OPTIONS:
    -c, --config <file.yaml>    Load settings from a YAML file
    -m, --mode <circle|curve>   Experiment whose parameters are prompted for
        --seed <N>              Master seed (default: drawn from OS entropy)
        --sizes <n,n,...>       Sweep sample sizes (default: 1e4..1e8)
        --replicates <N>        Replicate series (default: number of sizes)
    -n, --trials <N>            Trials for 'estimate' (default: 10000000)
        --continue-stream       Do not reseed between series
        --json                  Print the report as JSON
    -v, --verbose               Progress diagnostics on stderr

INPUT:
    circle mode prompts for x, y, r (center and radius)
    curve mode prompts for a, b (integration bounds, -1 <= a < b)

EXAMPLES:
    echo '0 0 1' | mcpi sweep --seed 42 --sizes 1000,10000,100000
    echo '0 2' | mcpi estimate --mode curve --trials 1000000
    mcpi sweep --config sweep.yaml --json
";

/// Print version information.
///
/// # Errors
///
/// Returns `Io` if the writer fails.
pub fn print_version<W: Write>(out: &mut W) -> SimResult<()> {
    writeln!(out, "{}", version_text())?;
    Ok(())
}

/// Print help message.
///
/// # Errors
///
/// Returns `Io` if the writer fails.
pub fn print_help<W: Write>(out: &mut W) -> SimResult<()> {
    write!(out, "{HELP}")?;
    Ok(())
}
