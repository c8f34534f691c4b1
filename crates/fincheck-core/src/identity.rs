//! # Identity Newtypes
//!
//! [`Figi`] is a FIGI string that has passed every check. Code that holds a
//! `Figi` never needs to re-validate it; code that holds a bare `&str` must
//! go through [`FigiValidator`](crate::figi::FigiValidator) first.
//!
//! Deserialization goes through the same validation as [`Figi::new`].

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::figi::{FigiValidator, FIGI_LEN};

/// A validated Financial Instrument Global Identifier.
///
/// # Validation
///
/// - Characters 1-2 are not a reserved provider prefix
/// - Character 3 is `G`
/// - Characters 4-11 are digits or consonants
/// - Character 12 is the Modulus 10 double-add-double check digit
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Figi(String);

impl Figi {
    /// Create a FIGI from a string using the default validator.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidFigi`] naming every failed check.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        Self::with_validator(value, &FigiValidator::default())
    }

    /// Create a FIGI using a specific validator configuration.
    pub fn with_validator(
        value: impl Into<String>,
        validator: &FigiValidator,
    ) -> Result<Self, ValidationError> {
        let s = value.into();
        let outcome = validator.validate(&s);
        match outcome.into_error() {
            Some(err) => Err(err),
            None => Ok(Self(s)),
        }
    }

    /// Access the FIGI string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    // A valid FIGI is all ASCII, so byte slicing below is on char boundaries.

    /// Characters 1-2: the certified provider prefix.
    pub fn provider(&self) -> &str {
        &self.0[..2]
    }

    /// Characters 4-11: the association payload.
    pub fn associations(&self) -> &str {
        &self.0[3..FIGI_LEN - 1]
    }

    /// Character 12 as a number.
    pub fn check_digit(&self) -> u8 {
        self.0.as_bytes()[FIGI_LEN - 1] - b'0'
    }
}

impl std::fmt::Display for Figi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Figi {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Figi {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Figi> for String {
    fn from(figi: Figi) -> Self {
        figi.0
    }
}

impl AsRef<str> for Figi {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
