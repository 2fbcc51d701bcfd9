//! The `check` use case: validate one policy and produce a report.

use crate::extract::unwrap_saved_policy;
use anyhow::Context;
use iamguard_settings::{IamguardConfigV1, Overrides, ResolvedConfig};
use iamguard_types::{
    IamguardData, IamguardReport, ReportEnvelope, SCHEMA_REPORT_V1, SeverityCounts, ToolMeta,
};
use log::{debug, info, warn};
use serde_json::Value;
use time::OffsetDateTime;

/// Input for the check use case.
#[derive(Clone, Debug)]
pub struct CheckInput<'a> {
    /// Raw policy text: a policy document or a saved `{"metadata", "policy"}` wrapper.
    pub policy_text: &'a str,
    /// Where the text came from, recorded in the report.
    pub source: Option<&'a str>,
    /// Config file contents (empty string if not found).
    pub config_text: &'a str,
    /// CLI overrides.
    pub overrides: Overrides,
}

/// Output from the check use case.
#[derive(Clone, Debug)]
pub struct CheckOutput {
    pub report: IamguardReport,
    /// The resolved configuration used.
    pub resolved_config: ResolvedConfig,
}

/// Run the check use case: resolve config, validate the policy, wrap the result in an envelope.
///
/// Errors only for bad configuration or a top-level JSON value that is not an object.
pub fn run_check(input: CheckInput<'_>) -> anyhow::Result<CheckOutput> {
    let started_at = OffsetDateTime::now_utc();

    // Parse config (empty is allowed, defaults apply).
    let cfg = if input.config_text.trim().is_empty() {
        IamguardConfigV1::default()
    } else {
        iamguard_settings::parse_config_toml(input.config_text).context("parse config")?
    };

    let resolved =
        iamguard_settings::resolve_config(cfg, input.overrides.clone()).context("resolve config")?;
    if let Some(profile) = &resolved.unknown_profile {
        warn!("unknown profile '{profile}', using 'default'");
    }
    debug!("validating with profile '{}'", resolved.effective.profile);

    let validation = match serde_json::from_str::<Value>(input.policy_text) {
        Ok(value) => {
            let policy = match unwrap_saved_policy(&value) {
                Some(inner) => {
                    debug!("unwrapped saved policy file");
                    inner
                }
                None => &value,
            };
            iamguard_domain::validate_value_with(policy, &resolved.effective)
        }
        // Reported as a structural finding rather than an error.
        Err(_) => iamguard_domain::validate_str_with(input.policy_text, &resolved.effective),
    }
    .context("validate policy")?;

    let finished_at = OffsetDateTime::now_utc();
    let counts: SeverityCounts = validation.counts();
    info!(
        "{}: {} ({} high, {} medium, {} low, {} info)",
        input.source.unwrap_or("policy"),
        if validation.passed { "pass" } else { "fail" },
        counts.high,
        counts.medium,
        counts.low,
        counts.info
    );

    let data = IamguardData {
        profile: resolved.effective.profile.clone(),
        statement_count: saturating_u32(validation.statement_count),
        findings_total: saturating_u32(validation.findings.len()),
        counts,
    };

    let report = ReportEnvelope {
        schema: SCHEMA_REPORT_V1.to_string(),
        tool: ToolMeta {
            name: "iamguard".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        started_at,
        finished_at,
        source: input.source.map(str::to_string),
        passed: validation.passed,
        findings: validation.findings,
        data,
    };

    Ok(CheckOutput {
        report,
        resolved_config: resolved,
    })
}

/// Report counters are `u32`; anything larger is pinned to `u32::MAX`.
fn saturating_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

/// Map the verdict to an exit code: 0 = pass, 2 = fail.
pub fn verdict_exit_code(passed: bool) -> i32 {
    if passed { 0 } else { 2 }
}
