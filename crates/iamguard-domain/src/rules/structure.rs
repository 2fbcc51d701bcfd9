use super::utils::Draft;
use super::{Rule, RuleContext};
use crate::model::{DocumentDefect, PolicyDocument, Statement, StatementDefect};
use iamguard_types::{Finding, Severity, ids};
use serde_json::{Value, json};
use std::collections::BTreeMap;

pub struct Structure;

impl Rule for Structure {
    fn id(&self) -> &'static str {
        ids::RULE_POLICY_STRUCTURE
    }

    fn check_document(&self, doc: &PolicyDocument, ctx: &RuleContext<'_>, out: &mut Vec<Finding>) {
        for defect in &doc.defects {
            let (draft, salient) = document_draft(defect);
            if !ctx.policy.allow.is_match(draft.code) {
                out.push(draft.at_document(&[salient.as_str()]));
            }
        }

        if !ctx.policy.allow.is_match(ids::CODE_DUPLICATE_SID) {
            duplicate_sids(doc, out);
        }
    }

    fn check_statement(&self, stmt: &Statement, ctx: &RuleContext<'_>, out: &mut Vec<Finding>) {
        for defect in &stmt.defects {
            let (draft, salient) = statement_draft(defect);
            if !ctx.policy.allow.is_match(draft.code) {
                out.push(draft.at_statement(stmt, &[salient.as_str()]));
            }
        }
    }
}

fn draft(
    severity: Severity,
    code: &'static str,
    message: String,
    recommendation: &str,
    data: Value,
) -> Draft {
    Draft {
        severity,
        rule_id: ids::RULE_POLICY_STRUCTURE,
        code,
        message,
        recommendation: recommendation.to_string(),
        data,
    }
}

fn did_you_mean(suggestion: Option<&'static str>) -> String {
    match suggestion {
        Some(s) => format!(" (did you mean \"{s}\"?)"),
        None => String::new(),
    }
}

fn document_draft(defect: &DocumentDefect) -> (Draft, String) {
    match defect {
        DocumentDefect::MissingVersion => (
            draft(
                Severity::Medium,
                ids::CODE_MISSING_VERSION,
                "policy has no Version; IAM then falls back to 2008-10-17, which disables policy variables".to_string(),
                "Add \"Version\": \"2012-10-17\" at the top of the document.",
                Value::Null,
            ),
            String::new(),
        ),
        DocumentDefect::UnsupportedVersion(found) => (
            draft(
                Severity::Medium,
                ids::CODE_UNSUPPORTED_VERSION,
                format!("policy Version is {found}, expected \"{}\"", ids::POLICY_VERSION_2012),
                "Set \"Version\": \"2012-10-17\".",
                json!({ "found": found }),
            ),
            found.clone(),
        ),
        DocumentDefect::MissingStatement => (
            draft(
                Severity::High,
                ids::CODE_MISSING_STATEMENT,
                "policy has no Statement element".to_string(),
                "Add a \"Statement\" array describing the permissions to grant.",
                Value::Null,
            ),
            String::new(),
        ),
        DocumentDefect::InvalidStatementContainer { found } => (
            draft(
                Severity::High,
                ids::CODE_INVALID_STATEMENT_CONTAINER,
                format!("Statement must be an object or an array of objects, found {found}"),
                "Wrap the statements in a JSON array.",
                json!({ "found": found }),
            ),
            found.to_string(),
        ),
        DocumentDefect::NoStatements => (
            draft(
                Severity::Low,
                ids::CODE_NO_STATEMENTS,
                "policy contains no statements and grants nothing".to_string(),
                "Add the statements this policy is meant to carry, or delete the policy.",
                Value::Null,
            ),
            String::new(),
        ),
        DocumentDefect::UnknownKey { key, suggestion } => (
            draft(
                Severity::Low,
                ids::CODE_UNKNOWN_KEY,
                format!("unknown top-level key \"{key}\"{}", did_you_mean(*suggestion)),
                "Remove the key or fix its spelling; IAM policy keys are case-sensitive.",
                json!({ "key": key, "suggestion": suggestion }),
            ),
            key.clone(),
        ),
    }
}

fn statement_draft(defect: &StatementDefect) -> (Draft, String) {
    match defect {
        StatementDefect::NotAnObject { found } => (
            draft(
                Severity::High,
                ids::CODE_STATEMENT_NOT_OBJECT,
                format!("statement must be a JSON object, found {found}"),
                "Replace the entry with a statement object.",
                json!({ "found": found }),
            ),
            found.to_string(),
        ),
        StatementDefect::MissingEffect => (
            draft(
                Severity::High,
                ids::CODE_MISSING_EFFECT,
                "statement has no Effect".to_string(),
                "Add \"Effect\": \"Allow\" or \"Effect\": \"Deny\".",
                Value::Null,
            ),
            String::new(),
        ),
        StatementDefect::InvalidEffect(found) => (
            draft(
                Severity::High,
                ids::CODE_INVALID_EFFECT,
                format!("Effect must be \"Allow\" or \"Deny\", found {found}"),
                "Use exactly \"Allow\" or \"Deny\"; the value is case-sensitive.",
                json!({ "found": found }),
            ),
            found.clone(),
        ),
        StatementDefect::MissingAction => (
            draft(
                Severity::High,
                ids::CODE_MISSING_ACTION,
                "statement has no Action or NotAction entries".to_string(),
                "List the actions the statement applies to under \"Action\".",
                Value::Null,
            ),
            String::new(),
        ),
        StatementDefect::MissingResource => (
            draft(
                Severity::High,
                ids::CODE_MISSING_RESOURCE,
                "statement has no Resource or NotResource entries".to_string(),
                "List the resource ARNs the statement applies to under \"Resource\".",
                Value::Null,
            ),
            String::new(),
        ),
        StatementDefect::ConflictingKeys { first, second } => (
            draft(
                Severity::High,
                ids::CODE_CONFLICTING_KEYS,
                format!("statement sets both {first} and {second}"),
                "Keep only one of the two keys.",
                json!({ "keys": [first, second] }),
            ),
            format!("{first}+{second}"),
        ),
        StatementDefect::InvalidFieldType {
            key,
            expected,
            found,
        } => (
            draft(
                Severity::High,
                ids::CODE_INVALID_FIELD_TYPE,
                format!("{key} must be {expected}, found {found}"),
                "Fix the value type; entries that do not fit were ignored.",
                json!({ "key": key, "expected": expected, "found": found }),
            ),
            key.to_string(),
        ),
        StatementDefect::UnknownKey { key, suggestion } => (
            draft(
                Severity::Low,
                ids::CODE_UNKNOWN_KEY,
                format!("unknown statement key \"{key}\"{}", did_you_mean(*suggestion)),
                "Remove the key or fix its spelling; IAM policy keys are case-sensitive.",
                json!({ "key": key, "suggestion": suggestion }),
            ),
            key.clone(),
        ),
    }
}

/// One finding per Sid used more than once, listing every position it appears at.
fn duplicate_sids(doc: &PolicyDocument, out: &mut Vec<Finding>) {
    let mut positions: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
    for stmt in &doc.statements {
        if let Some(sid) = stmt.sid.as_deref() {
            positions.entry(sid).or_default().push(stmt.index);
        }
    }

    let mut duplicates: Vec<(&str, Vec<usize>)> = positions
        .into_iter()
        .filter(|(_, idx)| idx.len() > 1)
        .collect();
    duplicates.sort_by_key(|(_, idx)| idx[0]);

    for (sid, indices) in duplicates {
        let listed = indices
            .iter()
            .map(usize::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        out.push(
            draft(
                Severity::Low,
                ids::CODE_DUPLICATE_SID,
                format!("Sid \"{sid}\" is used by statements {listed}"),
                "Give every statement a unique Sid so findings and audit logs point at one place.",
                json!({ "sid": sid, "statements": indices }),
            )
            .at_document(&[sid, listed.as_str()]),
        );
    }
}
