//! CLI argument parsing.
//!
//! The parser accepts any iterator of strings so it can be tested without
//! touching `std::env::args()`.

use std::path::PathBuf;

use crate::domains::ModeKind;
use crate::error::{SimError, SimResult};

/// Trial count of the single-estimate command when none is given.
pub const DEFAULT_ESTIMATE_TRIALS: usize = 10_000_000;

/// CLI arguments container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args {
    /// The command to execute.
    pub command: Command,
}

/// Available CLI commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Multi-series sweep over sample sizes.
    Sweep(RunOptions),
    /// One estimate with a fixed trial count.
    Estimate(RunOptions),
    /// Show help
    Help,
    /// Show version
    Version,
}

/// Options shared by `sweep` and `estimate`. Flags override the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// YAML configuration file.
    pub config_path: Option<PathBuf>,
    /// Experiment kind whose parameters are prompted for.
    pub mode: Option<ModeKind>,
    /// Master seed.
    pub seed: Option<u64>,
    /// Sweep sample sizes.
    pub sample_sizes: Option<Vec<usize>>,
    /// Replicate series count.
    pub replicates: Option<usize>,
    /// Trial count for `estimate`.
    pub trials: Option<usize>,
    /// Keep one random stream across series.
    pub continue_stream: bool,
    /// Emit JSON instead of text.
    pub json: bool,
    /// Progress diagnostics on stderr.
    pub verbose: bool,
}

impl Args {
    /// Parse command-line arguments from an iterator. The first item is the
    /// program name.
    ///
    /// # Errors
    ///
    /// Returns `Config` for unknown options, missing option values and
    /// values that do not parse.
    pub fn parse_from<I, S>(args: I) -> SimResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let args: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();
        Self::parse_from_vec(&args)
    }

    /// Parse command-line arguments from the environment.
    ///
    /// # Errors
    ///
    /// See [`Args::parse_from`].
    pub fn parse() -> SimResult<Self> {
        Self::parse_from(std::env::args())
    }

    fn parse_from_vec(args: &[String]) -> SimResult<Self> {
        let rest = args.get(1..).unwrap_or_default();

        let command = match rest.first().map(String::as_str) {
            None => Command::Sweep(RunOptions::default()),
            Some("sweep") => Command::Sweep(Self::parse_options(&rest[1..])?),
            Some("estimate") => Command::Estimate(Self::parse_options(&rest[1..])?),
            Some("-h" | "--help" | "help") => Command::Help,
            Some("-V" | "--version" | "version") => Command::Version,
            // Bare options run the default sweep.
            Some(flag) if flag.starts_with('-') => Command::Sweep(Self::parse_options(rest)?),
            Some(unknown) => {
                return Err(SimError::config(format!("unknown command '{unknown}'")));
            }
        };

        Ok(Self { command })
    }

    fn parse_options(args: &[String]) -> SimResult<RunOptions> {
        let mut options = RunOptions::default();
        let mut iter = args.iter();

        while let Some(arg) = iter.next() {
            let mut value = |flag: &str| {
                iter.next()
                    .ok_or_else(|| SimError::config(format!("'{flag}' requires a value")))
            };

            match arg.as_str() {
                "--config" | "-c" => {
                    options.config_path = Some(PathBuf::from(value(arg)?));
                }
                "--mode" | "-m" => options.mode = Some(value(arg)?.parse()?),
                "--seed" => options.seed = Some(parse_number(arg, value(arg)?)?),
                "--sizes" => options.sample_sizes = Some(parse_sizes(value(arg)?)?),
                "--replicates" => options.replicates = Some(parse_number(arg, value(arg)?)?),
                "--trials" | "-n" => options.trials = Some(parse_number(arg, value(arg)?)?),
                "--continue-stream" => options.continue_stream = true,
                "--json" => options.json = true,
                "-v" | "--verbose" => options.verbose = true,
                unknown => {
                    return Err(SimError::config(format!("unknown option '{unknown}'")));
                }
            }
        }

        Ok(options)
    }
}

fn parse_number<T: std::str::FromStr>(flag: &str, raw: &str) -> SimResult<T> {
    raw.replace('_', "")
        .parse()
        .map_err(|_| SimError::config(format!("invalid value '{raw}' for '{flag}'")))
}

fn parse_sizes(raw: &str) -> SimResult<Vec<usize>> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| parse_number("--sizes", s))
        .collect()
}
