use crate::error::PolicyError;
use crate::model::PolicyDocument;
use crate::parse::parse_policy;
use crate::policy::EffectiveConfig;
use crate::report::ValidationReport;
use crate::rules::{self, utils::Draft};
use iamguard_types::{Severity, ids};
use serde_json::{Value, json};
use std::sync::LazyLock;

static DEFAULT_CONFIG: LazyLock<EffectiveConfig> = LazyLock::new(EffectiveConfig::default);

/// Validate `doc` against the built-in rule configuration.
pub fn validate(doc: &PolicyDocument) -> ValidationReport {
    validate_with(doc, &DEFAULT_CONFIG)
}

pub fn validate_with(doc: &PolicyDocument, cfg: &EffectiveConfig) -> ValidationReport {
    let mut findings = Vec::new();
    rules::run_all(doc, cfg, &mut findings);
    ValidationReport::from_findings(findings, doc.statements.len())
}

pub fn validate_value(value: &Value) -> Result<ValidationReport, PolicyError> {
    validate_value_with(value, &DEFAULT_CONFIG)
}

pub fn validate_value_with(
    value: &Value,
    cfg: &EffectiveConfig,
) -> Result<ValidationReport, PolicyError> {
    let doc = parse_policy(value)?;
    Ok(validate_with(&doc, cfg))
}

/// Validate raw policy text.
///
/// Text that is not JSON at all yields a report holding a single `invalid_json` finding.
pub fn validate_str(text: &str) -> Result<ValidationReport, PolicyError> {
    validate_str_with(text, &DEFAULT_CONFIG)
}

pub fn validate_str_with(
    text: &str,
    cfg: &EffectiveConfig,
) -> Result<ValidationReport, PolicyError> {
    match serde_json::from_str::<Value>(text) {
        Ok(value) => validate_value_with(&value, cfg),
        Err(err) => {
            let finding = Draft {
                severity: Severity::High,
                rule_id: ids::RULE_POLICY_STRUCTURE,
                code: ids::CODE_INVALID_JSON,
                message: format!("policy is not valid JSON: {err}"),
                recommendation: "Fix the JSON syntax; nothing else could be checked.".to_string(),
                data: json!({ "line": err.line(), "column": err.column() }),
            }
            .at_document(&[]);
            Ok(ValidationReport::from_findings(vec![finding], 0))
        }
    }
}
