use thiserror::Error;

/// The one way policy input can be rejected outright.
///
/// Everything short of this (missing keys, wrong types, bad JSON text) is reported as a
/// structural finding instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolicyError {
    /// The top-level JSON value is not an object, so there is nothing to analyze.
    #[error("policy document must be a JSON object, found {found}")]
    NotAnObject { found: &'static str },
}
