//! Pure IAM policy validation (no IO).
//!
//! Input: a policy document parsed from JSON.
//! Output: findings in a stable order plus a pass/fail summary.

#![forbid(unsafe_code)]

pub mod catalog;
pub mod error;
pub mod fingerprint;
pub mod model;
pub mod parse;
pub mod policy;
pub mod report;
pub mod rules;

mod engine;

#[cfg(test)]
mod properties;
#[cfg(test)]
mod test_support;

pub use engine::{
    validate, validate_str, validate_str_with, validate_value, validate_value_with, validate_with,
};
pub use error::PolicyError;
pub use parse::parse_policy;
pub use report::ValidationReport;
