//! Scoring configuration and seed derivation.
//!
//! Holds the fixed metric weights used to fold the four cross-evaluation
//! dimensions into an overall score, plus the base seed all deterministic
//! draws derive from. Loadable from YAML for experiments with alternative
//! weightings.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur loading or validating a scoring configuration
#[derive(Error, Debug)]
pub enum ScoringError {
    #[error("Failed to read scoring configuration: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse YAML scoring configuration: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Metric weight must be non-negative: {0} = {1}")]
    NegativeWeight(&'static str, f64),

    #[error("Metric weights must sum to 1.0, got {0}")]
    WeightSum(f64),
}

/// Weighting and seeding configuration for the simulation engine.
///
/// The default weights fold each metric dimension in equally (25% each);
/// the weighting is identical across every judge/target pair.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoringConfig {
    /// Weight of the quality dimension
    #[serde(default = "default_weight")]
    pub quality_weight: f64,
    /// Weight of the clarity dimension
    #[serde(default = "default_weight")]
    pub clarity_weight: f64,
    /// Weight of the relevance dimension
    #[serde(default = "default_weight")]
    pub relevance_weight: f64,
    /// Weight of the accuracy dimension
    #[serde(default = "default_weight")]
    pub accuracy_weight: f64,
    /// Base seed mixed into every derived seed
    #[serde(default = "default_seed")]
    pub seed: u64,
}

const fn default_weight() -> f64 {
    0.25
}

const fn default_seed() -> u64 {
    42
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            quality_weight: default_weight(),
            clarity_weight: default_weight(),
            relevance_weight: default_weight(),
            accuracy_weight: default_weight(),
            seed: default_seed(),
        }
    }
}

impl ScoringConfig {
    /// Load a scoring configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or fails
    /// weight validation.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ScoringError> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the weight vector.
    ///
    /// # Errors
    ///
    /// Returns an error if any weight is negative or the weights do not
    /// sum to 1.0 (within epsilon).
    pub fn validate(&self) -> Result<(), ScoringError> {
        for (name, weight) in [
            ("quality_weight", self.quality_weight),
            ("clarity_weight", self.clarity_weight),
            ("relevance_weight", self.relevance_weight),
            ("accuracy_weight", self.accuracy_weight),
        ] {
            if weight < 0.0 {
                return Err(ScoringError::NegativeWeight(name, weight));
            }
        }

        let sum = self.quality_weight
            + self.clarity_weight
            + self.relevance_weight
            + self.accuracy_weight;
        if (sum - 1.0).abs() > 1e-6 {
            return Err(ScoringError::WeightSum(sum));
        }

        Ok(())
    }

    /// Weights in metric order: quality, clarity, relevance, accuracy
    #[must_use]
    pub const fn weights(&self) -> [f64; 4] {
        [
            self.quality_weight,
            self.clarity_weight,
            self.relevance_weight,
            self.accuracy_weight,
        ]
    }
}

/// Derive a seed from the base seed and a sequence of string parts.
///
/// FNV-1a over the parts with a separator fold between them, XORed with
/// the base. Hand-rolled rather than `DefaultHasher` because std's hasher
/// is randomly keyed per process, which would break reproducibility.
#[must_use]
pub fn derive_seed(base: u64, parts: &[&str]) -> u64 {
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    for part in parts {
        for byte in part.bytes() {
            hash ^= u64::from(byte);
            hash = hash.wrapping_mul(0x0100_0000_01b3);
        }
        // Separator fold so ("ab", "c") and ("a", "bc") diverge
        hash ^= 0x1f;
        hash = hash.wrapping_mul(0x0100_0000_01b3);
    }
    hash ^ base
}

/// Round to one decimal place
#[must_use]
pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Round to two decimal places
#[must_use]
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
