//! Sweep and estimate reports.
//!
//! Text output keeps the classic layout:
//!
//! ```text
//! Seria 1: 3.1412 3.14268 ...
//! Epsilon 1: 0.0001228535895 ...
//! Mid results: 0.0003370648281 ...
//! ```
//!
//! Values use 10 significant digits in `%g` style. JSON output carries the
//! same data plus the run parameters.

use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::config::OutputFormat;
use crate::domains::monte_carlo::MonteCarloResult;
use crate::domains::sweep::{relative_error, SeriesSeeding, SweepTable};
use crate::domains::{ExperimentMode, ModeKind};
use crate::error::SimResult;

/// Significant digits used in text reports.
pub const DISPLAY_PRECISION: usize = 10;

/// Format `value` with `precision` significant digits, like C's `%g`.
///
/// Trailing zeros are removed. Scientific notation is used when the
/// decimal exponent is below -4 or at least `precision`.
#[must_use]
pub fn format_significant(value: f64, precision: usize) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let precision = precision.max(1);
    // Rounding to `precision` digits can bump the exponent (9.99.. -> 1e1),
    // so read it back from the rounded scientific form.
    let sci = format!("{:.*e}", precision - 1, value);
    let (mantissa, exp) = match sci.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (sci.as_str(), 0),
    };

    if exp < -4 || exp >= precision as i32 {
        let sign = if exp < 0 { '-' } else { '+' };
        format!(
            "{}e{sign}{:02}",
            trim_fraction(mantissa),
            exp.unsigned_abs()
        )
    } else {
        let decimals = (precision as i32 - 1 - exp).max(0) as usize;
        trim_fraction(&format!("{value:.decimals$}")).to_string()
    }
}

fn trim_fraction(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

fn join_row(values: &[f64]) -> String {
    values
        .iter()
        .map(|&v| format_significant(v, DISPLAY_PRECISION))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Complete result of a sweep, ready for output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepReport {
    /// Experiment parameters.
    pub mode: ExperimentMode,
    /// True value estimates are compared against.
    pub truth: f64,
    /// Master seed the run can be replayed from, if any.
    pub seed: Option<u64>,
    /// Series seeding policy.
    pub seeding: SeriesSeeding,
    /// Ordered trial counts.
    pub sample_sizes: Vec<usize>,
    /// Raw estimates, one row per series.
    pub series: Vec<Vec<f64>>,
    /// Relative errors, one row per series.
    pub errors: Vec<Vec<f64>>,
    /// Relative error of the cross-series mean per sample size.
    pub mid_results: Vec<f64>,
}

impl SweepReport {
    /// Derive errors and mid results from a finished table.
    #[must_use]
    pub fn new(
        mode: ExperimentMode,
        seed: Option<u64>,
        seeding: SeriesSeeding,
        table: SweepTable,
    ) -> Self {
        let truth = mode.truth();
        let errors = table.relative_errors(truth);
        let mid_results = table.mid_results(truth);
        Self {
            mode,
            truth,
            seed,
            seeding,
            sample_sizes: table.sample_sizes,
            series: table.series,
            errors,
            mid_results,
        }
    }

    /// Write the labelled text report.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the writer fails.
    pub fn write_text<W: Write>(&self, out: &mut W) -> SimResult<()> {
        for (i, row) in self.series.iter().enumerate() {
            writeln!(out, "Seria {}: {}", i + 1, join_row(row))?;
        }
        for (i, row) in self.errors.iter().enumerate() {
            writeln!(out, "Epsilon {}: {}", i + 1, join_row(row))?;
        }
        writeln!(out, "Mid results: {}", join_row(&self.mid_results))?;
        Ok(())
    }

    /// Write the report in `format`.
    ///
    /// # Errors
    ///
    /// Returns `Io` or `Serialization` on failure.
    pub fn write<W: Write>(&self, out: &mut W, format: OutputFormat) -> SimResult<()> {
        match format {
            OutputFormat::Text => self.write_text(out),
            OutputFormat::Json => write_json(out, self),
        }
    }
}

/// Result of a single fixed-count estimate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstimateReport {
    /// Experiment parameters.
    pub mode: ExperimentMode,
    /// True value.
    pub truth: f64,
    /// Master seed the run can be replayed from, if any.
    pub seed: Option<u64>,
    /// Estimate with standard error and confidence interval.
    pub result: MonteCarloResult,
    /// Relative error against `truth`.
    pub relative_error: f64,
}

impl EstimateReport {
    /// Build a report from one estimate.
    #[must_use]
    pub fn new(mode: ExperimentMode, seed: Option<u64>, result: MonteCarloResult) -> Self {
        let truth = mode.truth();
        let relative_error = relative_error(result.estimate, truth);
        Self {
            mode,
            truth,
            seed,
            result,
            relative_error,
        }
    }

    /// Write `Pi: <value>` or `Integral: <value>`.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the writer fails.
    pub fn write_text<W: Write>(&self, out: &mut W) -> SimResult<()> {
        let label = match self.mode.kind() {
            ModeKind::Circle => "Pi",
            ModeKind::Curve => "Integral",
        };
        writeln!(
            out,
            "{label}: {}",
            format_significant(self.result.estimate, DISPLAY_PRECISION)
        )?;
        Ok(())
    }

    /// Write the report in `format`.
    ///
    /// # Errors
    ///
    /// Returns `Io` or `Serialization` on failure.
    pub fn write<W: Write>(&self, out: &mut W, format: OutputFormat) -> SimResult<()> {
        match format {
            OutputFormat::Text => self.write_text(out),
            OutputFormat::Json => write_json(out, self),
        }
    }
}

fn write_json<W: Write, T: Serialize>(out: &mut W, value: &T) -> SimResult<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render<F: FnOnce(&mut Vec<u8>) -> SimResult<()>>(f: F) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_format_significant_fixed() {
        assert_eq!(format_significant(std::f64::consts::PI, 10), "3.141592654");
        assert_eq!(format_significant(4.0, 10), "4");
        assert_eq!(format_significant(0.5, 10), "0.5");
        assert_eq!(format_significant(-2.25, 10), "-2.25");
        assert_eq!(format_significant(123_456.0, 10), "123456");
        assert_eq!(format_significant(0.0001, 10), "0.0001");
    }

    #[test]
    fn test_format_significant_scientific() {
        assert_eq!(format_significant(0.000_012_5, 10), "1.25e-05");
        assert_eq!(format_significant(1.0e12, 10), "1e+12");
        assert_eq!(format_significant(12_345_678_901.0, 10), "1.23456789e+10");
    }

    #[test]
    fn test_format_significant_rounding_bumps_exponent() {
        assert_eq!(format_significant(9_999_999_999.6, 10), "1e+10");
        assert_eq!(format_significant(0.999_999_999_96, 10), "1");
    }

    #[test]
    fn test_format_significant_special() {
        assert_eq!(format_significant(0.0, 10), "0");
        assert_eq!(format_significant(f64::NAN, 10), "nan");
        assert_eq!(format_significant(f64::NEG_INFINITY, 10), "-inf");
    }

    fn sample_report() -> SweepReport {
        let table = SweepTable {
            sample_sizes: vec![10, 100],
            series: vec![vec![4.0, 3.2], vec![2.0, 3.0]],
        };
        SweepReport::new(
            ExperimentMode::Curve { a: 0.0, b: 2.0 },
            Some(42),
            SeriesSeeding::Independent,
            table,
        )
    }

    #[test]
    fn test_sweep_report_derivations() {
        let report = sample_report();
        assert!((report.truth - 6.0).abs() < 1e-12);
        assert_eq!(report.errors.len(), 2);
        assert_eq!(report.mid_results.len(), 2);
        // mean of column 0 is 3.0 -> |3 - 6| / 6
        assert!((report.mid_results[0] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_sweep_report_text_layout() {
        let report = sample_report();
        let text = render(|buf| report.write_text(buf));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "Seria 1: 4 3.2");
        assert_eq!(lines[1], "Seria 2: 2 3");
        assert!(lines[2].starts_with("Epsilon 1: 0.3333333333 "));
        assert_eq!(lines[3], "Epsilon 2: 0.6666666667 0.5");
        assert!(lines[4].starts_with("Mid results: 0.5 "));
    }

    #[test]
    fn test_sweep_report_json() {
        let report = sample_report();
        let text = render(|buf| report.write(buf, OutputFormat::Json));
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["seed"], 42);
        assert_eq!(value["mode"]["kind"], "curve");
        assert_eq!(value["seeding"], "independent");
        assert_eq!(value["series"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_estimate_report_text() {
        let result = MonteCarloResult::new(std::f64::consts::PI, 0.001, 1000, 785);
        let report = EstimateReport::new(ExperimentMode::Circle { x: 0.0, y: 0.0, r: 1.0 }, None, result);
        assert_eq!(report.relative_error, 0.0);
        let text = render(|buf| report.write(buf, OutputFormat::Text));
        assert_eq!(text, "Pi: 3.141592654\n");
    }

    #[test]
    fn test_estimate_report_curve_label() {
        let result = MonteCarloResult::new(6.0, 0.0, 10, 3);
        let report = EstimateReport::new(ExperimentMode::Curve { a: 0.0, b: 2.0 }, Some(1), result);
        let text = render(|buf| report.write_text(buf));
        assert_eq!(text, "Integral: 6\n");
    }
}
