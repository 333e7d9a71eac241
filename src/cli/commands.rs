//! CLI command handlers.
//!
//! Handlers take their streams as parameters so the whole command path,
//! prompts included, runs against in-memory buffers in tests.

use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use super::args::{Args, Command, RunOptions, DEFAULT_ESTIMATE_TRIALS};
use super::input::{prompt_values, TokenReader};
use super::output::{print_help, print_version};
use crate::config::{OutputFormat, SweepConfig};
use crate::domains::monte_carlo::TrialRunner;
use crate::domains::sweep::{SeriesSeeding, SweepDriver};
use crate::domains::ExperimentMode;
use crate::engine::jidoka::{Cell, EstimateGuard};
use crate::error::{SimError, SimResult};
use crate::report::{format_significant, EstimateReport, SweepReport, DISPLAY_PRECISION};

/// Input, output and diagnostic streams of one CLI invocation.
#[derive(Debug)]
pub struct Streams<R, W, E> {
    /// Parameter input.
    pub input: R,
    /// Prompts (text mode) and reports.
    pub out: W,
    /// Errors, verbose diagnostics, and prompts in JSON mode.
    pub err: E,
}

/// Main CLI entry point.
#[must_use]
pub fn run_cli(args: Args) -> ExitCode {
    let stdin = io::stdin();
    let mut streams = Streams {
        input: stdin.lock(),
        out: io::stdout().lock(),
        err: io::stderr().lock(),
    };

    match execute(args.command, &mut streams) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let _ = writeln!(streams.err, "Error: {e}");
            ExitCode::from(1)
        }
    }
}

/// Dispatch a parsed command.
///
/// # Errors
///
/// Returns the first error raised by the command.
pub fn execute<R: BufRead, W: Write, E: Write>(
    command: Command,
    streams: &mut Streams<R, W, E>,
) -> SimResult<()> {
    match command {
        Command::Sweep(options) => run_sweep(&options, streams).map(|_| ()),
        Command::Estimate(options) => run_estimate(&options, streams).map(|_| ()),
        Command::Help => print_help(&mut streams.out),
        Command::Version => print_version(&mut streams.out),
    }
}

/// Load the config file (if any) and apply command-line overrides.
///
/// # Errors
///
/// Returns config loading and validation errors.
pub fn resolve_config(options: &RunOptions) -> SimResult<SweepConfig> {
    let mut config = match &options.config_path {
        Some(path) => SweepConfig::load(path)?,
        None => SweepConfig::default(),
    };

    if options.seed.is_some() {
        config.reproducibility.seed = options.seed;
    }
    if let Some(kind) = options.mode {
        // An explicit --mode of another kind discards the file's parameters.
        if config.mode.is_some_and(|m| m.kind() != kind) {
            config.mode = None;
        }
        config.prompt_mode = kind;
    }
    if let Some(sizes) = &options.sample_sizes {
        config.sweep.sample_sizes.clone_from(sizes);
    }
    if options.replicates.is_some() {
        config.sweep.replicates = options.replicates;
    }
    if options.continue_stream {
        config.sweep.independent_series = false;
    }
    if options.json {
        config.output.format = OutputFormat::Json;
    }

    config.validate_semantic()?;
    Ok(config)
}

/// Take the experiment from the config, or prompt for its parameters.
///
/// # Errors
///
/// Returns `InvalidInput`, `InvalidGeometry` or `InvalidBounds`.
pub fn resolve_mode<R: BufRead, W: Write, E: Write>(
    config: &SweepConfig,
    streams: &mut Streams<R, W, E>,
) -> SimResult<ExperimentMode> {
    if let Some(mode) = config.mode {
        return Ok(mode);
    }

    let kind = config.prompt_mode;
    let mut reader = TokenReader::new(&mut streams.input);
    // Keep stdout parseable in JSON mode.
    let values = match config.output.format {
        OutputFormat::Text => prompt_values(&mut reader, &mut streams.out, kind.parameters())?,
        OutputFormat::Json => prompt_values(&mut reader, &mut streams.err, kind.parameters())?,
    };
    kind.with_values(&values)
}

/// Run the multi-series sweep and write its report.
///
/// # Errors
///
/// Returns configuration, input, estimator and guard errors.
pub fn run_sweep<R: BufRead, W: Write, E: Write>(
    options: &RunOptions,
    streams: &mut Streams<R, W, E>,
) -> SimResult<SweepReport> {
    let config = resolve_config(options)?;
    let mode = resolve_mode(&config, streams)?;
    let plan = config.plan()?;
    let seed = config.reproducibility.seed;
    let seeding = plan.seeding();

    let mut predicate = mode.predicate(seed)?;
    let mut driver = SweepDriver::new(plan, seed);
    // Continued streams start from entropy-seeded samplers unless a seed
    // was given, and cannot be replayed.
    let replay_seed =
        (seed.is_some() || seeding == SeriesSeeding::Independent).then(|| driver.master_seed());

    let verbose = options.verbose;
    let replicates = driver.plan().replicates();
    if verbose {
        writeln!(
            streams.err,
            "mcpi: {} sweep, truth = {}",
            mode.kind(),
            format_significant(mode.truth(), DISPLAY_PRECISION)
        )?;
        writeln!(
            streams.err,
            "mcpi: {} series x {:?}, {:?} streams",
            replicates,
            driver.plan().sample_sizes(),
            seeding
        )?;
        if let Some(s) = replay_seed {
            writeln!(streams.err, "mcpi: master seed {s}")?;
        }
    }

    let err = &mut streams.err;
    let table = driver.run_with_progress(&mut predicate, &mode.estimator(), |p| {
        if verbose {
            writeln!(
                err,
                "  series {}/{replicates}  n = {:>11}  hits = {:>11}  estimate = {}",
                p.series + 1,
                p.trials,
                p.successes,
                format_significant(p.estimate, DISPLAY_PRECISION)
            )?;
        }
        Ok(())
    })?;

    if verbose {
        writeln!(
            streams.err,
            "mcpi: {} estimates passed guard checks",
            driver.guard_checks()
        )?;
    }

    let report = SweepReport::new(mode, replay_seed, seeding, table);
    report.write(&mut streams.out, config.output.format)?;
    Ok(report)
}

/// Run one fixed-count estimate and write its report.
///
/// # Errors
///
/// Returns configuration, input, estimator and guard errors.
pub fn run_estimate<R: BufRead, W: Write, E: Write>(
    options: &RunOptions,
    streams: &mut Streams<R, W, E>,
) -> SimResult<EstimateReport> {
    let config = resolve_config(options)?;
    let trials = options.trials.unwrap_or(DEFAULT_ESTIMATE_TRIALS);
    if trials == 0 {
        return Err(SimError::config("--trials must be positive"));
    }
    let mode = resolve_mode(&config, streams)?;
    let seed = config.reproducibility.seed;

    let mut predicate = mode.predicate(seed)?;
    let successes = TrialRunner::new(trials).run(&mut predicate);
    let result = mode.estimator().result(successes, trials)?;

    let mut guard = EstimateGuard::default();
    guard.check(Cell { series: 0, column: 0 }, result.estimate, successes, trials)?;

    if options.verbose {
        writeln!(
            streams.err,
            "mcpi: {successes}/{trials} hits, std error {}, 95% CI [{}, {}]",
            format_significant(result.std_error, DISPLAY_PRECISION),
            format_significant(result.confidence_interval.0, DISPLAY_PRECISION),
            format_significant(result.confidence_interval.1, DISPLAY_PRECISION)
        )?;
    }

    let report = EstimateReport::new(mode, seed, result);
    report.write(&mut streams.out, config.output.format)?;
    Ok(report)
}
