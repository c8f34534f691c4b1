//! # Validator Configuration
//!
//! The FIGI tables (reserved providers, letter values, association
//! alphabet) are compiled-in constants. The only tunable is how the
//! check digit is derived from the digit sum, which is loadable from YAML:
//!
//! ```yaml
//! check_digit: literal   # or: reduced
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{FincheckError, FincheckResult};

/// How the Modulus-10 digit sum is turned into a check digit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckDigitPolicy {
    /// `10 - (sum % 10)`. A sum divisible by ten yields 10, which no
    /// single decimal character can match.
    #[default]
    Literal,
    /// `(10 - (sum % 10)) % 10`. A sum divisible by ten yields 0.
    Reduced,
}

impl CheckDigitPolicy {
    /// Derive the check digit value from a double-add-double digit sum.
    pub fn apply(self, sum: u32) -> u8 {
        // sum % 10 is in 0..=9, so the result fits in 1..=10.
        let raw = (10 - sum % 10) as u8;
        match self {
            Self::Literal => raw,
            Self::Reduced => raw % 10,
        }
    }
}

impl std::fmt::Display for CheckDigitPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Literal => "literal",
            Self::Reduced => "reduced",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for CheckDigitPolicy {
    type Err = FincheckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "literal" => Ok(Self::Literal),
            "reduced" => Ok(Self::Reduced),
            other => Err(FincheckError::Config(format!(
                "unknown check digit policy \"{other}\" (expected literal or reduced)"
            ))),
        }
    }
}

/// Configuration for a [`FigiValidator`](crate::figi::FigiValidator).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ValidatorConfig {
    /// Check digit derivation.
    pub check_digit: CheckDigitPolicy,
}

impl ValidatorConfig {
    /// Parse a configuration from a YAML document.
    ///
    /// An empty document yields the default configuration.
    pub fn from_yaml_str(content: &str) -> FincheckResult<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Load a configuration file from disk.
    pub fn load(path: &Path) -> FincheckResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_yaml_str(&content)?;
        tracing::debug!(
            path = %path.display(),
            check_digit = %config.check_digit,
            "loaded validator config"
        );
        Ok(config)
    }
}
