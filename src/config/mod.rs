//! Configuration system with YAML schema and validation.
//!
//! Implements Poka-Yoke (mistake-proofing) through:
//! - Type-safe configuration structs
//! - Schema validation via serde and `validator`
//! - Semantic validation of sample sizes and experiment parameters
//!
//! # Example
//!
//! ```yaml
//! schema_version: "1.0"
//! reproducibility:
//!   seed: 42
//! mode:
//!   kind: curve
//!   a: 0.0
//!   b: 2.0
//! sweep:
//!   sample_sizes: [10000, 100000, 1000000]
//!   independent_series: true
//! output:
//!   format: json
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use validator::Validate;

use crate::domains::sweep::{SeriesSeeding, SweepPlan, DEFAULT_SAMPLE_SIZES};
use crate::domains::{ExperimentMode, ModeKind};
use crate::error::{SimError, SimResult};

/// Top-level sweep configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct SweepConfig {
    /// Schema version for forward compatibility.
    #[validate(length(min = 1))]
    #[serde(default = "default_schema_version")]
    pub schema_version: String,

    /// Reproducibility settings.
    #[serde(default)]
    pub reproducibility: ReproducibilityConfig,

    /// Experiment to run. When absent, parameters are read from stdin.
    #[serde(default)]
    pub mode: Option<ExperimentMode>,

    /// Mode whose parameters are prompted for when `mode` is absent.
    #[serde(default)]
    pub prompt_mode: ModeKind,

    /// Sweep shape.
    #[validate(nested)]
    #[serde(default)]
    pub sweep: SweepSection,

    /// Report output.
    #[serde(default)]
    pub output: OutputConfig,
}

fn default_schema_version() -> String {
    "1.0".to_string()
}

impl SweepConfig {
    /// Load configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File cannot be read
    /// - YAML parsing fails
    /// - Validation fails
    pub fn load<P: AsRef<Path>>(path: P) -> SimResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML string.
    ///
    /// # Errors
    ///
    /// Returns error if parsing or validation fails.
    pub fn from_yaml(yaml: &str) -> SimResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;

        // Poka-Yoke: validate all constraints
        config.validate()?;

        // Additional semantic validation
        config.validate_semantic()?;

        Ok(config)
    }

    /// Create a builder for configuration.
    #[must_use]
    pub fn builder() -> SweepConfigBuilder {
        SweepConfigBuilder::default()
    }

    /// Validate semantic constraints beyond schema.
    ///
    /// # Errors
    ///
    /// Returns `Config` for an empty sample size list, a zero sample size
    /// or zero replicates, or the geometry/bounds error of an invalid mode.
    pub fn validate_semantic(&self) -> SimResult<()> {
        if self.sweep.sample_sizes.is_empty() {
            return Err(SimError::config("sweep.sample_sizes must not be empty"));
        }

        if let Some(pos) = self.sweep.sample_sizes.iter().position(|&n| n == 0) {
            return Err(SimError::config(format!(
                "sweep.sample_sizes[{pos}] must be positive"
            )));
        }

        if self.sweep.replicates == Some(0) {
            return Err(SimError::config("sweep.replicates must be at least 1"));
        }

        if let Some(mode) = &self.mode {
            mode.validate()?;
        }

        Ok(())
    }

    /// Mode kind used for prompting or reporting.
    #[must_use]
    pub fn mode_kind(&self) -> ModeKind {
        self.mode.map_or(self.prompt_mode, |m| m.kind())
    }

    /// Turn the sweep section into an executable plan.
    ///
    /// # Errors
    ///
    /// Returns `Config` if the sample sizes or replicate count are invalid.
    pub fn plan(&self) -> SimResult<SweepPlan> {
        let mut plan = SweepPlan::new(self.sweep.sample_sizes.clone())?;
        if let Some(replicates) = self.sweep.replicates {
            plan = plan.with_replicates(replicates)?;
        }
        let seeding = if self.sweep.independent_series {
            SeriesSeeding::Independent
        } else {
            SeriesSeeding::Continued
        };
        Ok(plan.with_seeding(seeding))
    }
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            reproducibility: ReproducibilityConfig::default(),
            mode: None,
            prompt_mode: ModeKind::default(),
            sweep: SweepSection::default(),
            output: OutputConfig::default(),
        }
    }
}

/// Configuration builder for programmatic construction.
#[derive(Debug, Default)]
pub struct SweepConfigBuilder {
    seed: Option<u64>,
    mode: Option<ExperimentMode>,
    prompt_mode: Option<ModeKind>,
    sample_sizes: Option<Vec<usize>>,
    replicates: Option<usize>,
    independent_series: Option<bool>,
    format: Option<OutputFormat>,
}

impl SweepConfigBuilder {
    /// Set the random seed.
    #[must_use]
    pub const fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the experiment.
    #[must_use]
    pub const fn mode(mut self, mode: ExperimentMode) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Set the mode prompted for when no experiment is given.
    #[must_use]
    pub const fn prompt_mode(mut self, kind: ModeKind) -> Self {
        self.prompt_mode = Some(kind);
        self
    }

    /// Set the sample sizes.
    #[must_use]
    pub fn sample_sizes(mut self, sizes: Vec<usize>) -> Self {
        self.sample_sizes = Some(sizes);
        self
    }

    /// Set the replicate count.
    #[must_use]
    pub const fn replicates(mut self, n: usize) -> Self {
        self.replicates = Some(n);
        self
    }

    /// Choose independent (`true`) or continued (`false`) series streams.
    #[must_use]
    pub const fn independent_series(mut self, independent: bool) -> Self {
        self.independent_series = Some(independent);
        self
    }

    /// Set the report format.
    #[must_use]
    pub const fn format(mut self, format: OutputFormat) -> Self {
        self.format = Some(format);
        self
    }

    /// Build the configuration.
    #[must_use]
    pub fn build(self) -> SweepConfig {
        let mut config = SweepConfig::default();

        if self.seed.is_some() {
            config.reproducibility.seed = self.seed;
        }
        if self.mode.is_some() {
            config.mode = self.mode;
        }
        if let Some(kind) = self.prompt_mode {
            config.prompt_mode = kind;
        }
        if let Some(sizes) = self.sample_sizes {
            config.sweep.sample_sizes = sizes;
        }
        if self.replicates.is_some() {
            config.sweep.replicates = self.replicates;
        }
        if let Some(independent) = self.independent_series {
            config.sweep.independent_series = independent;
        }
        if let Some(format) = self.format {
            config.output.format = format;
        }

        config
    }
}

/// Reproducibility settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReproducibilityConfig {
    /// Master seed. `None` draws one from OS entropy at startup.
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Sweep shape settings.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct SweepSection {
    /// Ordered trial counts.
    #[validate(length(min = 1))]
    #[serde(default = "default_sample_sizes")]
    pub sample_sizes: Vec<usize>,
    /// Replicate series; defaults to the number of sample sizes.
    #[serde(default)]
    pub replicates: Option<usize>,
    /// Reseed the predicate before every series.
    #[serde(default = "default_true")]
    pub independent_series: bool,
}

fn default_sample_sizes() -> Vec<usize> {
    DEFAULT_SAMPLE_SIZES.to_vec()
}

const fn default_true() -> bool {
    true
}

impl Default for SweepSection {
    fn default() -> Self {
        Self {
            sample_sizes: default_sample_sizes(),
            replicates: None,
            independent_series: true,
        }
    }
}

/// Report output settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// Report format.
    #[serde(default)]
    pub format: OutputFormat,
}

/// Report format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    /// Labelled text lines.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_YAML: &str = r"
schema_version: '1.0'
reproducibility:
  seed: 7
mode:
  kind: curve
  a: 0.0
  b: 2.0
sweep:
  sample_sizes: [10, 100, 1000]
  replicates: 4
  independent_series: false
output:
  format: json
";

    #[test]
    fn test_default_config() {
        let config = SweepConfig::default();
        assert_eq!(config.schema_version, "1.0");
        assert_eq!(config.reproducibility.seed, None);
        assert_eq!(config.sweep.sample_sizes, DEFAULT_SAMPLE_SIZES.to_vec());
        assert!(config.sweep.independent_series);
        assert_eq!(config.output.format, OutputFormat::Text);
        assert_eq!(config.mode_kind(), ModeKind::Circle);
    }

    #[test]
    fn test_parse_full_yaml() {
        let config = SweepConfig::from_yaml(FULL_YAML).unwrap();
        assert_eq!(config.reproducibility.seed, Some(7));
        assert_eq!(config.mode, Some(ExperimentMode::Curve { a: 0.0, b: 2.0 }));
        assert_eq!(config.mode_kind(), ModeKind::Curve);
        assert_eq!(config.output.format, OutputFormat::Json);

        let plan = config.plan().unwrap();
        assert_eq!(plan.sample_sizes(), &[10, 100, 1000]);
        assert_eq!(plan.replicates(), 4);
        assert_eq!(plan.seeding(), SeriesSeeding::Continued);
    }

    #[test]
    fn test_minimal_yaml_uses_defaults() {
        let config = SweepConfig::from_yaml("{}").unwrap();
        assert!(config.mode.is_none());
        assert_eq!(config.plan().unwrap().replicates(), 5);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result = SweepConfig::from_yaml("sweep:\n  sizes: [10]\n");
        assert!(matches!(result, Err(SimError::YamlParse(_))));
    }

    #[test]
    fn test_empty_sample_sizes_rejected() {
        let result = SweepConfig::from_yaml("sweep:\n  sample_sizes: []\n");
        assert!(matches!(result, Err(SimError::Validation(_))));
    }

    #[test]
    fn test_zero_sample_size_rejected() {
        let result = SweepConfig::from_yaml("sweep:\n  sample_sizes: [10, 0]\n");
        assert!(matches!(result, Err(SimError::Config { .. })));
    }

    #[test]
    fn test_semantic_rejects_empty_sample_sizes() {
        let config = SweepConfig::builder().sample_sizes(Vec::new()).build();
        let err = config.validate_semantic().unwrap_err();
        assert!(matches!(err, SimError::Config { .. }));
        assert!(err.to_string().contains("must not be empty"));
    }

    #[test]
    fn test_zero_replicates_rejected() {
        let result = SweepConfig::from_yaml("sweep:\n  replicates: 0\n");
        assert!(matches!(result, Err(SimError::Config { .. })));
    }

    #[test]
    fn test_invalid_mode_rejected() {
        let yaml = "mode:\n  kind: circle\n  x: 0.0\n  y: 0.0\n  r: -1.0\n";
        let result = SweepConfig::from_yaml(yaml);
        assert!(matches!(result, Err(SimError::InvalidGeometry(_))));
    }

    #[test]
    fn test_prompt_mode_parsed() {
        let config = SweepConfig::from_yaml("prompt_mode: curve\n").unwrap();
        assert_eq!(config.mode_kind(), ModeKind::Curve);
    }

    #[test]
    fn test_builder() {
        let config = SweepConfig::builder()
            .seed(42)
            .mode(ExperimentMode::Circle { x: 0.0, y: 0.0, r: 1.0 })
            .sample_sizes(vec![10, 20])
            .replicates(3)
            .independent_series(false)
            .format(OutputFormat::Json)
            .build();

        assert_eq!(config.reproducibility.seed, Some(42));
        assert_eq!(config.sweep.sample_sizes, vec![10, 20]);
        assert_eq!(config.sweep.replicates, Some(3));
        assert!(!config.sweep.independent_series);
        assert_eq!(config.output.format, OutputFormat::Json);
        assert!(config.validate_semantic().is_ok());
    }

    #[test]
    fn test_builder_prompt_mode() {
        let config = SweepConfig::builder().prompt_mode(ModeKind::Curve).build();
        assert!(config.mode.is_none());
        assert_eq!(config.mode_kind(), ModeKind::Curve);
    }

    #[test]
    fn test_load_missing_file() {
        let result = SweepConfig::load("/nonexistent/sweep.yaml");
        assert!(matches!(result, Err(SimError::Io(_))));
    }
}
