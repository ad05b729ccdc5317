use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};

/// Numeric thresholds used by the transform code.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct TransformConfig {
    /// A linear map whose determinant magnitude is below this value is
    /// treated as singular and is not inverted.
    pub singular_threshold: f64,

    /// Absolute tolerance for approximate comparisons of matrices and
    /// transformed points.
    pub tolerance: f64,
}

impl TransformConfig {
    pub const DEFAULT_SINGULAR_THRESHOLD: f64 = 1e-20;
    pub const DEFAULT_TOLERANCE: f64 = 1e-9;

    pub fn new(singular_threshold: f64, tolerance: f64) -> Self {
        Self {
            singular_threshold,
            tolerance,
        }
    }

    /// Parses a config from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let config: TransformConfig =
            serde_json::from_str(json).context("Failed to parse transform config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.singular_threshold.is_nan() || self.singular_threshold < 0.0 {
            bail!(
                "singular_threshold must be a non-negative number, got {}",
                self.singular_threshold
            );
        }
        if self.tolerance.is_nan() || self.tolerance < 0.0 {
            bail!("tolerance must be a non-negative number, got {}", self.tolerance);
        }
        Ok(())
    }
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            singular_threshold: Self::DEFAULT_SINGULAR_THRESHOLD,
            tolerance: Self::DEFAULT_TOLERANCE,
        }
    }
}
