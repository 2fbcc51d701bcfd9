//! Stable DTOs and IDs used across the iamguard workspace.
//!
//! This crate is intentionally boring:
//! - data types for findings and the emitted report
//! - stable string IDs and codes
//! - explain registry for remediation guidance

#![forbid(unsafe_code)]

pub mod explain;
pub mod ids;
pub mod receipt;

pub use explain::{ExamplePair, Explanation, lookup_explanation};
pub use receipt::{
    Finding, IamguardData, IamguardReport, ReportEnvelope, SCHEMA_REPORT_V1, Severity,
    SeverityCounts, StatementRef, ToolMeta,
};
