//! # Error Hierarchy
//!
//! Structured error types for fincheck, built with `thiserror`.
//! No `Box<dyn Error>`, no `.unwrap()` outside tests.
//!
//! A FIGI that fails its positional checks is *not* an error: the validator
//! reports it through [`ValidationOutcome`](crate::figi::ValidationOutcome).
//! Errors are reserved for contract violations (a non-string argument, a
//! negative price) and operational failures (config files, I/O).

use rust_decimal::Decimal;
use thiserror::Error;

/// Top-level error type for fincheck.
#[derive(Error, Debug)]
pub enum FincheckError {
    /// Domain primitive validation failure.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Configuration is present but unusable.
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML deserialization error.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Validation errors for domain inputs.
///
/// Each variant carries the offending input so that callers can report it
/// without re-deriving context.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Identifier failed one or more FIGI checks.
    #[error("invalid FIGI: \"{value}\" (failed checks: {})", .failed.join(", "))]
    InvalidFigi {
        /// The rejected identifier.
        value: String,
        /// Names of the checks that failed, in evaluation order.
        failed: Vec<String>,
    },

    /// The argument handed to the validator was not a string at all.
    #[error("expected a string identifier, got {0}")]
    NotAString(String),

    /// A price series contained a negative price.
    #[error("negative price {price} at index {index}")]
    NegativePrice {
        /// Position of the price in the series.
        index: usize,
        /// The rejected price.
        price: Decimal,
    },
}

/// Convenience alias used throughout the crate.
pub type FincheckResult<T> = Result<T, FincheckError>;
