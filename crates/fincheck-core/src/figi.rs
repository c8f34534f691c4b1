//! # FIGI Validation
//!
//! Validates Financial Instrument Global Identifiers against the syntax of
//! the OMG FIGI standard (section 6.1.2):
//!
//! | Positions | Check          | Rule                                               |
//! |-----------|----------------|----------------------------------------------------|
//! | 1-2       | `Provider`     | not one of the reserved prefixes                   |
//! | 3         | `Is Global`    | literal `G`                                        |
//! | 4-11      | `Associations` | digits or consonants only                          |
//! | 12        | `Encoding`     | Modulus 10 double-add-double check digit over 1-11 |
//!
//! Every check runs on every input so a caller can explain all the reasons
//! an identifier is rejected, not just the first one. Malformed input
//! (short, long, non-ASCII) yields failed checks, never a panic.

use serde::{Deserialize, Serialize};

use crate::config::{CheckDigitPolicy, ValidatorConfig};
use crate::error::ValidationError;

/// Number of characters in a FIGI.
pub const FIGI_LEN: usize = 12;

/// Provider prefixes reserved to avoid collision with ISIN country codes
/// ending in "G".
pub const RESERVED_PROVIDERS: [&str; 7] = ["BS", "BM", "GG", "GB", "GH", "KY", "VG"];

/// Character 3 of every FIGI.
pub const GLOBAL_MARKER: char = 'G';

/// Upper-case consonants permitted in a FIGI.
pub const CONSONANTS: &str = "BCDFGHJKLMNPQRSTVWXYZ";

/// Modulus 10 values of the permitted letters: 10 plus the letter's
/// zero-based position in the full alphabet.
const LETTER_VALUES: [(char, u32); 21] = [
    ('B', 11),
    ('C', 12),
    ('D', 13),
    ('F', 15),
    ('G', 16),
    ('H', 17),
    ('J', 19),
    ('K', 20),
    ('L', 21),
    ('M', 22),
    ('N', 23),
    ('P', 25),
    ('Q', 26),
    ('R', 27),
    ('S', 28),
    ('T', 29),
    ('V', 31),
    ('W', 32),
    ('X', 33),
    ('Y', 34),
    ('Z', 35),
];

// ---------------------------------------------------------------------------
// Checks and outcomes
// ---------------------------------------------------------------------------

/// A named positional check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Check {
    /// Characters 1-2: certified provider that minted the FIGI.
    Provider,
    /// Character 3: global identifier marker.
    IsGlobal,
    /// Characters 4-11: randomly assigned association payload.
    Associations,
    /// Character 12: check digit.
    Encoding,
}

impl Check {
    /// All checks in evaluation order.
    pub fn all() -> &'static [Check] {
        &[
            Self::Provider,
            Self::IsGlobal,
            Self::Associations,
            Self::Encoding,
        ]
    }

    /// Human-readable check name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Provider => "Provider",
            Self::IsGlobal => "Is Global",
            Self::Associations => "Associations",
            Self::Encoding => "Encoding",
        }
    }

    /// One-based character positions the check covers.
    pub fn positions(self) -> &'static str {
        match self {
            Self::Provider => "1-2",
            Self::IsGlobal => "3",
            Self::Associations => "4-11",
            Self::Encoding => "12",
        }
    }
}

impl std::fmt::Display for Check {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Result of one check against one identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    /// Which check produced this result.
    pub check: Check,
    /// Whether the identifier satisfied the check.
    pub passed: bool,
    /// Why the check passed or failed, in terms of character positions.
    pub reason: String,
}

impl CheckResult {
    fn pass(check: Check, reason: impl Into<String>) -> Self {
        Self {
            check,
            passed: true,
            reason: reason.into(),
        }
    }

    fn fail(check: Check, reason: impl Into<String>) -> Self {
        Self {
            check,
            passed: false,
            reason: reason.into(),
        }
    }
}

/// Aggregate outcome of validating one identifier.
///
/// `checks` always holds one entry per [`Check`], in [`Check::all`] order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationOutcome {
    /// The identifier exactly as supplied.
    pub identifier: String,
    /// True iff every check passed.
    pub is_valid: bool,
    /// Per-check breakdown.
    pub checks: Vec<CheckResult>,
}

impl ValidationOutcome {
    fn new(identifier: &str, checks: Vec<CheckResult>) -> Self {
        let is_valid = checks.iter().all(|c| c.passed);
        Self {
            identifier: identifier.to_string(),
            is_valid,
            checks,
        }
    }

    /// Result for a specific check.
    pub fn result(&self, check: Check) -> Option<&CheckResult> {
        self.checks.iter().find(|c| c.check == check)
    }

    /// Whether a specific check passed.
    pub fn passed(&self, check: Check) -> bool {
        self.result(check).is_some_and(|c| c.passed)
    }

    /// Characters 1-2 are not a reserved provider prefix.
    pub fn provider_ok(&self) -> bool {
        self.passed(Check::Provider)
    }

    /// Character 3 is the global marker.
    pub fn is_global_ok(&self) -> bool {
        self.passed(Check::IsGlobal)
    }

    /// Characters 4-11 are digits or consonants.
    pub fn associations_ok(&self) -> bool {
        self.passed(Check::Associations)
    }

    /// Character 12 matches the computed check digit.
    pub fn checksum_ok(&self) -> bool {
        self.passed(Check::Encoding)
    }

    /// Checks that failed, in evaluation order.
    pub fn failures(&self) -> impl Iterator<Item = &CheckResult> {
        self.checks.iter().filter(|c| !c.passed)
    }

    /// Convert a failed outcome into a [`ValidationError::InvalidFigi`].
    pub fn into_error(self) -> Option<ValidationError> {
        if self.is_valid {
            return None;
        }
        let failed = self
            .failures()
            .map(|c| c.check.name().to_string())
            .collect();
        Some(ValidationError::InvalidFigi {
            value: self.identifier,
            failed,
        })
    }
}

// ---------------------------------------------------------------------------
// Validator
// ---------------------------------------------------------------------------

/// Stateless FIGI validator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FigiValidator {
    config: ValidatorConfig,
}

impl FigiValidator {
    /// Create a validator with the given configuration.
    pub fn new(config: ValidatorConfig) -> Self {
        Self { config }
    }

    /// The configuration this validator was built with.
    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Run every check against `identifier`.
    pub fn validate(&self, identifier: &str) -> ValidationOutcome {
        let checks: Vec<CheckResult> = Check::all()
            .iter()
            .map(|check| {
                let result = self.run_check(*check, identifier);
                tracing::trace!(
                    identifier,
                    check = check.name(),
                    passed = result.passed,
                    reason = %result.reason,
                    "figi check"
                );
                result
            })
            .collect();

        let outcome = ValidationOutcome::new(identifier, checks);
        tracing::debug!(identifier, is_valid = outcome.is_valid, "validated figi");
        outcome
    }

    /// Validate a JSON value, rejecting anything that is not a string.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::NotAString`] for non-string values. A
    /// string that fails the FIGI checks is a normal outcome, not an error.
    pub fn validate_value(
        &self,
        value: &serde_json::Value,
    ) -> Result<ValidationOutcome, ValidationError> {
        match value {
            serde_json::Value::String(s) => Ok(self.validate(s)),
            other => Err(ValidationError::NotAString(json_kind(other).to_string())),
        }
    }

    /// Run a single check.
    pub fn run_check(&self, check: Check, identifier: &str) -> CheckResult {
        match check {
            Check::Provider => check_provider(identifier),
            Check::IsGlobal => check_is_global(identifier),
            Check::Associations => check_associations(identifier),
            Check::Encoding => check_encoding(identifier, self.config.check_digit),
        }
    }
}

/// Validate `identifier` with the default configuration.
pub fn validate(identifier: &str) -> ValidationOutcome {
    FigiValidator::default().validate(identifier)
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

// ---------------------------------------------------------------------------
// Individual checks
// ---------------------------------------------------------------------------

/// Characters 1-2 must not be a reserved provider prefix.
pub fn check_provider(identifier: &str) -> CheckResult {
    let prefix: String = identifier.chars().take(2).collect();
    if prefix.chars().count() < 2 {
        return CheckResult::fail(
            Check::Provider,
            format!("provider prefix (chars 1-2) is incomplete: \"{prefix}\""),
        );
    }
    if RESERVED_PROVIDERS.contains(&prefix.as_str()) {
        CheckResult::fail(
            Check::Provider,
            format!("provider prefix \"{prefix}\" is reserved to avoid collision with ISIN country codes"),
        )
    } else {
        CheckResult::pass(
            Check::Provider,
            format!("provider prefix \"{prefix}\" is not reserved"),
        )
    }
}

/// Character 3 must be `G`.
pub fn check_is_global(identifier: &str) -> CheckResult {
    match identifier.chars().nth(2) {
        Some(GLOBAL_MARKER) => CheckResult::pass(
            Check::IsGlobal,
            format!("char 3 is '{GLOBAL_MARKER}'"),
        ),
        Some(c) => CheckResult::fail(
            Check::IsGlobal,
            format!("char 3 is '{c}', expected '{GLOBAL_MARKER}'"),
        ),
        None => CheckResult::fail(Check::IsGlobal, "char 3 is missing"),
    }
}

/// Characters 4-11 must all be digits or consonants.
pub fn check_associations(identifier: &str) -> CheckResult {
    let field: Vec<(usize, char)> = identifier.chars().enumerate().skip(3).take(8).collect();
    if field.len() < 8 {
        return CheckResult::fail(
            Check::Associations,
            format!(
                "associations field (chars 4-11) has {} of 8 characters",
                field.len()
            ),
        );
    }
    match field.iter().find(|(_, c)| !is_association_char(*c)) {
        Some((i, c)) => CheckResult::fail(
            Check::Associations,
            format!("char {} '{c}' is not a digit or consonant", i + 1),
        ),
        None => CheckResult::pass(
            Check::Associations,
            "chars 4-11 are digits or consonants",
        ),
    }
}

/// Character 12 must equal the check digit computed over characters 1-11.
pub fn check_encoding(identifier: &str, policy: CheckDigitPolicy) -> CheckResult {
    let chars: Vec<char> = identifier.chars().collect();
    if chars.len() < FIGI_LEN {
        return CheckResult::fail(
            Check::Encoding,
            format!(
                "identifier has {} characters, check digit at char {FIGI_LEN} is missing",
                chars.len()
            ),
        );
    }
    if chars.len() > FIGI_LEN {
        return CheckResult::fail(
            Check::Encoding,
            format!(
                "identifier has {} characters, check digit must be char {FIGI_LEN} and last",
                chars.len()
            ),
        );
    }

    let expected = match digit_sum(&chars[..FIGI_LEN - 1]) {
        Ok(sum) => policy.apply(sum),
        Err((i, c)) => {
            return CheckResult::fail(
                Check::Encoding,
                format!("check digit undefined: char {} '{c}' has no Modulus 10 value", i + 1),
            );
        }
    };

    let actual = chars[FIGI_LEN - 1];
    match actual.to_digit(10) {
        Some(d) if d == u32::from(expected) => {
            CheckResult::pass(Check::Encoding, format!("check digit {d} matches"))
        }
        Some(d) => CheckResult::fail(
            Check::Encoding,
            format!("check digit {d} does not match computed {expected}"),
        ),
        None => CheckResult::fail(
            Check::Encoding,
            format!("char {FIGI_LEN} '{actual}' is not a decimal digit (computed {expected})"),
        ),
    }
}

/// Compute the check digit for the first 11 characters of `identifier`.
///
/// Returns `None` if fewer than 11 characters are present or one of them
/// has no Modulus 10 value. Characters beyond the 11th are ignored. Under
/// [`CheckDigitPolicy::Literal`] the result may be 10.
pub fn check_digit(identifier: &str, policy: CheckDigitPolicy) -> Option<u8> {
    let payload: Vec<char> = identifier.chars().take(FIGI_LEN - 1).collect();
    if payload.len() < FIGI_LEN - 1 {
        return None;
    }
    digit_sum(&payload).ok().map(|sum| policy.apply(sum))
}

/// Modulus 10 double-add-double digit sum.
///
/// Walks `payload` from the last character to the first with multipliers
/// 1, 2, 1, 2, ... and sums the decimal digits of every product. On an
/// unmappable character returns its zero-based index and the character.
fn digit_sum(payload: &[char]) -> Result<u32, (usize, char)> {
    let mut sum = 0;
    for (n, (i, c)) in payload.iter().copied().enumerate().rev().enumerate() {
        let value = char_value(c).ok_or((i, c))?;
        let multiplier = if n % 2 == 0 { 1 } else { 2 };
        // Summing the digits of each product is the same as summing the
        // concatenated digit stream.
        sum += sum_of_digits(value * multiplier);
    }
    Ok(sum)
}

fn sum_of_digits(mut n: u32) -> u32 {
    let mut sum = 0;
    while n > 0 {
        sum += n % 10;
        n /= 10;
    }
    sum
}

/// Modulus 10 value of a character: digits map to themselves, permitted
/// letters via [`LETTER_VALUES`].
fn char_value(c: char) -> Option<u32> {
    if c.is_ascii_digit() {
        return c.to_digit(10);
    }
    LETTER_VALUES
        .iter()
        .find(|(letter, _)| *letter == c)
        .map(|(_, value)| *value)
}

fn is_association_char(c: char) -> bool {
    c.is_ascii_digit() || CONSONANTS.contains(c)
}

#[cfg(test)]
mod tests {
    use super::*;

    // -- Known identifiers --

    #[test]
    fn valid_bloomberg_figi() {
        let outcome = validate("BBG000BLNQ16");
        assert!(outcome.is_valid, "{outcome:?}");
    }

    #[test]
    fn valid_non_bloomberg_provider() {
        assert!(validate("NRG92C84SB39").is_valid);
    }

    #[test]
    fn checksum_mismatch_only_fails_encoding() {
        let outcome = validate("NRG92C84SB38");
        assert!(!outcome.is_valid);
        assert!(outcome.provider_ok());
        assert!(outcome.is_global_ok());
        assert!(outcome.associations_ok());
        assert!(!outcome.checksum_ok());
        let reason = &outcome.result(Check::Encoding).unwrap().reason;
        assert!(reason.contains("does not match computed 9"), "{reason}");
    }

    #[test]
    fn vowel_fails_associations() {
        let outcome = validate("NRG92A84SB39");
        assert!(!outcome.is_valid);
        assert!(!outcome.associations_ok());
        let reason = &outcome.result(Check::Associations).unwrap().reason;
        assert!(reason.contains("char 6 'A'"), "{reason}");
        // 'A' has no Modulus 10 value either.
        assert!(!outcome.checksum_ok());
    }

    #[test]
    fn wrong_marker_fails_is_global() {
        let outcome = validate("NRC92C84SB39");
        assert!(!outcome.is_valid);
        assert!(!outcome.is_global_ok());
        assert!(outcome.provider_ok());
        assert!(outcome.associations_ok());
    }

    #[test]
    fn reserved_prefix_fails_provider() {
        let outcome = validate("GBG92C84SB39");
        assert!(!outcome.is_valid);
        assert!(!outcome.provider_ok());
        assert!(outcome.is_global_ok());
        assert!(outcome.associations_ok());
    }

    #[test]
    fn every_reserved_prefix_fails_provider() {
        for prefix in RESERVED_PROVIDERS {
            for rest in ["G000BLNQ16", "G92C84SB39", "XXXXXXXXXX", ""] {
                let id = format!("{prefix}{rest}");
                assert!(!validate(&id).provider_ok(), "{id} should fail Provider");
            }
        }
    }

    #[test]
    fn validation_is_idempotent() {
        for id in ["BBG000BLNQ16", "NRG92A84SB39", "", "BB"] {
            assert_eq!(validate(id), validate(id));
        }
    }

    // -- Outcome shape --

    #[test]
    fn outcome_lists_checks_in_order() {
        let outcome = validate("BBG000BLNQ16");
        let order: Vec<Check> = outcome.checks.iter().map(|c| c.check).collect();
        assert_eq!(order, Check::all());
    }

    #[test]
    fn failures_and_into_error() {
        let outcome = validate("GBG92C84SB39");
        let failed: Vec<&str> = outcome.failures().map(|c| c.check.name()).collect();
        assert_eq!(failed, vec!["Provider", "Encoding"]);
        match outcome.into_error() {
            Some(ValidationError::InvalidFigi { value, failed }) => {
                assert_eq!(value, "GBG92C84SB39");
                assert_eq!(failed, vec!["Provider".to_string(), "Encoding".to_string()]);
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn valid_outcome_has_no_error() {
        assert!(validate("BBG000BLNQ16").into_error().is_none());
    }

    #[test]
    fn check_names_match_report_labels() {
        let names: Vec<&str> = Check::all().iter().map(|c| c.name()).collect();
        assert_eq!(names, vec!["Provider", "Is Global", "Associations", "Encoding"]);
    }

    // -- Short and malformed input --

    #[test]
    fn empty_input_fails_every_check() {
        let outcome = validate("");
        assert!(!outcome.is_valid);
        assert_eq!(outcome.failures().count(), 4);
    }

    #[test]
    fn short_input_fails_unreachable_checks() {
        let outcome = validate("BBG000");
        assert!(outcome.provider_ok());
        assert!(outcome.is_global_ok());
        assert!(!outcome.associations_ok());
        assert!(!outcome.checksum_ok());
    }

    #[test]
    fn single_char_fails_provider() {
        assert!(!validate("B").provider_ok());
    }

    #[test]
    fn eleven_chars_fails_encoding_only_for_missing_digit() {
        let outcome = validate("BBG000BLNQ1");
        assert!(outcome.associations_ok());
        assert!(!outcome.checksum_ok());
        let reason = &outcome.result(Check::Encoding).unwrap().reason;
        assert!(reason.contains("missing"), "{reason}");
    }

    #[test]
    fn trailing_characters_fail_encoding() {
        let outcome = validate("BBG000BLNQ166");
        assert!(outcome.provider_ok());
        assert!(outcome.associations_ok());
        assert!(!outcome.checksum_ok());
    }

    #[test]
    fn lowercase_is_not_normalized() {
        let outcome = validate("bbg000blnq16");
        assert!(!outcome.is_valid);
        assert!(!outcome.is_global_ok());
        assert!(!outcome.associations_ok());
    }

    #[test]
    fn non_digit_check_character_fails() {
        let outcome = validate("BBG000BLNQ1B");
        assert!(!outcome.checksum_ok());
        let reason = &outcome.result(Check::Encoding).unwrap().reason;
        assert!(reason.contains("not a decimal digit"), "{reason}");
    }

    #[test]
    fn multibyte_input_does_not_panic() {
        let outcome = validate("ÉÉG000BLNQ16");
        assert!(outcome.provider_ok());
        assert!(!outcome.checksum_ok());
        assert!(!validate("日本").is_valid);
    }

    #[test]
    fn punctuation_fails_associations() {
        let outcome = validate("BBG000-LNQ16");
        assert!(!outcome.associations_ok());
        assert!(!outcome.checksum_ok());
    }

    // -- Check digit --

    #[test]
    fn check_digit_known_values() {
        assert_eq!(check_digit("BBG000BLNQ1", CheckDigitPolicy::Literal), Some(6));
        assert_eq!(check_digit("NRG92C84SB3", CheckDigitPolicy::Literal), Some(9));
        // Characters past the 11th are ignored.
        assert_eq!(check_digit("BBG000BLNQ16", CheckDigitPolicy::Literal), Some(6));
    }

    #[test]
    fn check_digit_undefined_for_unmappable_or_short() {
        assert_eq!(check_digit("NRG92A84SB3", CheckDigitPolicy::Literal), None);
        assert_eq!(check_digit("BBG000", CheckDigitPolicy::Literal), None);
    }

    #[test]
    fn literal_policy_rejects_ten() {
        assert_eq!(check_digit("BBG000BLNQ7", CheckDigitPolicy::Literal), Some(10));
        let outcome = validate("BBG000BLNQ70");
        assert!(!outcome.checksum_ok());
    }

    #[test]
    fn reduced_policy_accepts_zero() {
        let validator = FigiValidator::new(ValidatorConfig {
            check_digit: CheckDigitPolicy::Reduced,
        });
        assert!(validator.validate("BBG000BLNQ70").is_valid);
        assert!(validator.validate("BBG000BLNQ16").is_valid);
    }

    #[test]
    fn product_digits_are_summed_individually() {
        // Single letter 'Z' (35) at an even position from the right is
        // doubled to 70 and contributes 7, not 70.
        assert_eq!(digit_sum(&['Z', '0']), Ok(7));
        // 'Z' in the rightmost position keeps multiplier 1: 3 + 5.
        assert_eq!(digit_sum(&['0', 'Z']), Ok(8));
    }

    #[test]
    fn digit_sum_reports_offending_position() {
        assert_eq!(digit_sum(&['1', 'A', '2']), Err((1, 'A')));
    }

    #[test]
    fn letter_values_cover_consonants_only() {
        for c in CONSONANTS.chars() {
            assert!(char_value(c).is_some(), "{c} has no value");
        }
        for vowel in ['A', 'E', 'I', 'O', 'U'] {
            assert!(char_value(vowel).is_none());
        }
    }

    // -- JSON entry point --

    #[test]
    fn validate_value_accepts_strings() {
        let outcome = FigiValidator::default()
            .validate_value(&serde_json::json!("BBG000BLNQ16"))
            .unwrap();
        assert!(outcome.is_valid);
    }

    #[test]
    fn validate_value_rejects_non_strings() {
        let validator = FigiValidator::default();
        for (value, kind) in [
            (serde_json::json!(null), "null"),
            (serde_json::json!(12), "number"),
            (serde_json::json!(["BBG000BLNQ16"]), "array"),
        ] {
            assert_eq!(
                validator.validate_value(&value),
                Err(ValidationError::NotAString(kind.to_string()))
            );
        }
    }

    #[test]
    fn outcome_serializes_check_names_snake_case() {
        let json = serde_json::to_value(validate("NRC92C84SB39")).unwrap();
        assert_eq!(json["is_valid"], false);
        assert_eq!(json["checks"][1]["check"], "is_global");
        assert_eq!(json["checks"][1]["passed"], false);
    }
}
