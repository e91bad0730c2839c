//! Configuration with YAML schema and validation.
//!
//! ```yaml
//! schema_version: "1.0"
//! solver:
//!   max_nodes: 5000000
//!   verify_cost: true
//!   progress_interval: 10000
//! tsplib:
//!   no_edge: 999999999
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use validator::Validate;

use crate::error::{TspError, TspResult};

/// Sentinel written into matrices built from TSPLIB files.
pub const DEFAULT_NO_EDGE: i64 = 999_999_999;

/// Top-level configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct LittleConfig {
    /// Schema version for forward compatibility.
    #[validate(length(min = 1))]
    #[serde(default = "default_schema_version")]
    pub schema_version: String,

    /// Search settings.
    #[validate(nested)]
    #[serde(default)]
    pub solver: SolverConfig,

    /// TSPLIB input settings.
    #[validate(nested)]
    #[serde(default)]
    pub tsplib: TsplibConfig,
}

fn default_schema_version() -> String {
    "1.0".to_string()
}

impl Default for LittleConfig {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            solver: SolverConfig::default(),
            tsplib: TsplibConfig::default(),
        }
    }
}

impl LittleConfig {
    /// Load configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File cannot be read
    /// - YAML parsing fails
    /// - Validation fails
    pub fn load<P: AsRef<Path>>(path: P) -> TspResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML string.
    ///
    /// # Errors
    ///
    /// Returns error if parsing or validation fails.
    pub fn from_yaml(yaml: &str) -> TspResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        config.validate_semantic()?;
        Ok(config)
    }

    /// Serialize to YAML.
    ///
    /// # Errors
    ///
    /// Returns error if serialization fails.
    pub fn to_yaml(&self) -> TspResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Create a builder for configuration.
    #[must_use]
    pub fn builder() -> LittleConfigBuilder {
        LittleConfigBuilder::default()
    }

    fn validate_semantic(&self) -> TspResult<()> {
        if self.tsplib.no_edge <= 0 {
            return Err(TspError::config(format!(
                "tsplib.no_edge must be positive, got {}",
                self.tsplib.no_edge
            )));
        }
        if self.solver.max_nodes.is_some_and(|n| n < 2) {
            return Err(TspError::config(
                "solver.max_nodes must allow at least the root and one child",
            ));
        }
        Ok(())
    }
}

/// Branch-and-bound search settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct SolverConfig {
    /// Stop after this many tree nodes; the result is then not proven optimal.
    #[validate(range(min = 1))]
    #[serde(default)]
    pub max_nodes: Option<usize>,

    /// Recompute every improving tour from the input matrix.
    #[serde(default = "default_verify_cost")]
    pub verify_cost: bool,

    /// Log a progress line every this many nodes.
    #[validate(range(min = 1))]
    #[serde(default = "default_progress_interval")]
    pub progress_interval: usize,
}

fn default_verify_cost() -> bool {
    true
}

fn default_progress_interval() -> usize {
    10_000
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_nodes: None,
            verify_cost: default_verify_cost(),
            progress_interval: default_progress_interval(),
        }
    }
}

/// TSPLIB reader settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct TsplibConfig {
    /// Cost standing for "no edge" (and the diagonal).
    #[serde(default = "default_no_edge")]
    pub no_edge: i64,
}

fn default_no_edge() -> i64 {
    DEFAULT_NO_EDGE
}

impl Default for TsplibConfig {
    fn default() -> Self {
        Self {
            no_edge: default_no_edge(),
        }
    }
}

/// Builder for [`LittleConfig`].
#[derive(Debug, Default)]
pub struct LittleConfigBuilder {
    config: LittleConfig,
}

impl LittleConfigBuilder {
    /// Limit the search tree size.
    #[must_use]
    pub fn max_nodes(mut self, max_nodes: usize) -> Self {
        self.config.solver.max_nodes = Some(max_nodes);
        self
    }

    /// Toggle tour cost verification.
    #[must_use]
    pub fn verify_cost(mut self, verify: bool) -> Self {
        self.config.solver.verify_cost = verify;
        self
    }

    /// Set the progress log interval.
    #[must_use]
    pub fn progress_interval(mut self, interval: usize) -> Self {
        self.config.solver.progress_interval = interval;
        self
    }

    /// Set the TSPLIB "no edge" sentinel.
    #[must_use]
    pub fn no_edge(mut self, no_edge: i64) -> Self {
        self.config.tsplib.no_edge = no_edge;
        self
    }

    /// Finish building.
    #[must_use]
    pub fn build(self) -> LittleConfig {
        self.config
    }
}
