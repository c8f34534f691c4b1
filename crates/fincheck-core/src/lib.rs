#![deny(missing_docs)]

//! # fincheck-core — Financial Identifier and Price-Series Checks
//!
//! Pure, synchronous checks over in-memory data. No I/O apart from loading
//! an optional YAML configuration file.
//!
//! ## Modules
//!
//! 1. **[`figi`]** — FIGI validation. Four positional checks (provider,
//!    global marker, associations, check digit) that always all run, so a
//!    [`ValidationOutcome`] explains every reason an identifier is rejected.
//!
//! 2. **[`identity`]** — the [`Figi`] newtype. A `Figi` exists only if its
//!    string passed every check.
//!
//! 3. **[`loss`]** — maximum peak-to-trough loss over a price series.
//!
//! 4. **[`config`]** — validator configuration (check digit policy).
//!
//! 5. **[`FincheckError`] hierarchy.** Structured errors with `thiserror`.
//!    A rejected identifier is an outcome, not an error.
//!
//! ```
//! use fincheck_core::validate;
//!
//! let outcome = validate("NRG92C84SB38");
//! assert!(!outcome.is_valid);
//! assert!(outcome.provider_ok() && outcome.is_global_ok() && outcome.associations_ok());
//! assert!(!outcome.checksum_ok());
//! ```

pub mod config;
pub mod error;
pub mod figi;
pub mod identity;
pub mod loss;

// Re-export primary types at crate root for ergonomic imports.
pub use config::{CheckDigitPolicy, ValidatorConfig};
pub use error::{FincheckError, FincheckResult, ValidationError};
pub use figi::{
    check_digit, validate, Check, CheckResult, FigiValidator, ValidationOutcome, FIGI_LEN,
    RESERVED_PROVIDERS,
};
pub use identity::Figi;
pub use loss::{max_loss, max_loss_detail, MaxLoss};
