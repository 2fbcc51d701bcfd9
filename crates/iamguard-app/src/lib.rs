//! Use case orchestration for iamguard.
//!
//! This crate provides the application layer: use cases that coordinate the settings, domain,
//! and render layers. It is intentionally thin and delegates heavy lifting to those layers.
//!
//! The CLI crate depends on this; it only handles argument parsing and I/O.

#![forbid(unsafe_code)]

mod check;
mod explain;
mod extract;
mod render;
mod report;
mod rules;

pub use check::{CheckInput, CheckOutput, run_check, verdict_exit_code};
pub use explain::{ExplainOutput, format_explanation, format_not_found, run_explain};
pub use extract::{extract_policy_from_text, unwrap_saved_policy};
pub use render::{OutputFormat, render_report};
pub use report::{serialize_report, to_renderable};
pub use rules::format_rule_list;
