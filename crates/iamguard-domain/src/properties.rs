//! Property-based tests for the validator.
//!
//! These tests use proptest to verify invariants around:
//! - determinism of the findings list
//! - monotonicity of the worst severity as statements are added
//! - finding order and the pass/fail summary

use crate::{validate_value, ValidationReport};
use iamguard_types::{Severity, ids};
use proptest::prelude::*;
use serde_json::{Value, json};

// ============================================================================
// Strategies
// ============================================================================

fn arb_action() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("*".to_string()),
        Just("s3:*".to_string()),
        Just("s3:Get*".to_string()),
        Just("s3:GetObject".to_string()),
        Just("iam:PassRole".to_string()),
        Just("iam:ListUsers".to_string()),
        Just("dynamodb:GetItem".to_string()),
        Just("ec2:DescribeInstances".to_string()),
        prop::string::string_regex("[a-z]{2,8}:[A-Z][a-zA-Z]{2,12}").unwrap(),
    ]
}

fn arb_resource() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("*".to_string()),
        Just("arn:aws:s3:::*".to_string()),
        Just("arn:aws:s3:::reports/*".to_string()),
        Just("arn:aws:s3:::reports/2024.csv".to_string()),
        Just("arn:aws:dynamodb:us-east-1:123456789012:table/Orders".to_string()),
        Just("arn:aws:dynamodb:*:123456789012:table/*".to_string()),
    ]
}

fn arb_effect() -> impl Strategy<Value = Option<&'static str>> {
    prop_oneof![
        4 => Just(Some("Allow")),
        2 => Just(Some("Deny")),
        1 => Just(Some("allow")),
        1 => Just(None),
    ]
}

fn arb_statement() -> impl Strategy<Value = Value> {
    (
        arb_effect(),
        prop::collection::vec(arb_action(), 1..4),
        prop::collection::vec(arb_resource(), 1..3),
        prop::option::of(prop_oneof![Just("A"), Just("B"), Just("C")]),
        any::<bool>(),
    )
        .prop_map(|(effect, actions, resources, sid, conditioned)| {
            let mut stmt = json!({ "Action": actions, "Resource": resources });
            if let Some(effect) = effect {
                stmt["Effect"] = json!(effect);
            }
            if let Some(sid) = sid {
                stmt["Sid"] = json!(sid);
            }
            if conditioned {
                stmt["Condition"] = json!({"Bool": {"aws:SecureTransport": "true"}});
            }
            stmt
        })
}

fn arb_statements() -> impl Strategy<Value = Vec<Value>> {
    prop::collection::vec(arb_statement(), 0..6)
}

fn document(statements: &[Value]) -> Value {
    json!({ "Version": "2012-10-17", "Statement": statements })
}

fn run(statements: &[Value]) -> ValidationReport {
    validate_value(&document(statements)).expect("policy is an object")
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    /// Validating the same input twice gives identical findings.
    #[test]
    fn validation_is_deterministic(statements in arb_statements()) {
        let first = serde_json::to_string(&run(&statements)).unwrap();
        let second = serde_json::to_string(&run(&statements)).unwrap();
        prop_assert_eq!(first, second);
    }

    /// Appending a statement never lowers the worst severity.
    ///
    /// Starts from at least one statement: an empty list carries its own advisory finding.
    #[test]
    fn worst_severity_is_monotonic(
        statements in prop::collection::vec(arb_statement(), 1..6),
        extra in arb_statement(),
    ) {
        let before = run(&statements).max_severity();
        let mut more = statements.clone();
        more.push(extra);
        let after = run(&more).max_severity();
        prop_assert!(after >= before, "{:?} dropped to {:?}", before, after);
    }

    /// `passed` is exactly "no High or Medium finding".
    #[test]
    fn passed_matches_blocking_findings(statements in arb_statements()) {
        let report = run(&statements);
        let blocking = report.findings.iter().any(|f| f.severity.is_blocking());
        prop_assert_eq!(report.passed, !blocking);
        prop_assert_eq!(report.passed, report.max_severity().is_none_or(|s| s <= Severity::Low));
    }

    /// Document-level findings lead, then statement findings by position.
    #[test]
    fn findings_are_grouped_by_position(statements in arb_statements()) {
        let report = run(&statements);
        let keys: Vec<i64> = report
            .findings
            .iter()
            .map(|f| f.statement_index().map_or(-1, |i| i as i64))
            .collect();
        prop_assert!(keys.is_sorted(), "out of order: {:?}", keys);
        prop_assert_eq!(report.statement_count, statements.len());
    }

    /// An unconditional grant of everything always fails.
    #[test]
    fn allow_everything_always_fails(statements in arb_statements(), at in 0usize..6) {
        let mut statements = statements;
        let at = at.min(statements.len());
        statements.insert(at, json!({"Effect": "Allow", "Action": "*", "Resource": "*"}));
        let report = run(&statements);
        prop_assert!(!report.passed);
        prop_assert!(report
            .findings
            .iter()
            .any(|f| f.severity == Severity::High && f.statement_index() == Some(at)));
    }
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn zero_statements_pass_with_one_structural_finding() {
    let report = run(&[]);
    assert!(report.passed);
    assert_eq!(report.statement_count, 0);
    assert_eq!(report.findings.len(), 1);
    assert_eq!(report.findings[0].rule_id, ids::RULE_POLICY_STRUCTURE);
    assert_eq!(report.findings[0].code, ids::CODE_NO_STATEMENTS);
}

#[test]
fn scoped_read_passes() {
    let report = validate_value(&json!({
        "Version": "2012-10-17",
        "Statement": [{"Effect": "Allow", "Action": "s3:GetObject", "Resource": "arn:aws:s3:::my-bucket/*"}]
    }))
    .expect("object");

    assert!(report.passed);
    assert!(report.max_severity() <= Some(Severity::Low));
}

#[test]
fn allow_all_fails_on_action_and_resource() {
    let report = validate_value(&json!({
        "Version": "2012-10-17",
        "Statement": [{"Effect": "Allow", "Action": "*", "Resource": "*"}]
    }))
    .expect("object");

    assert!(!report.passed);
    let high: Vec<&str> = report
        .findings
        .iter()
        .filter(|f| f.severity == Severity::High)
        .map(|f| f.rule_id.as_str())
        .collect();
    assert!(high.contains(&ids::RULE_ACTIONS_WILDCARD));
    assert!(high.contains(&ids::RULE_RESOURCES_WILDCARD));
}

#[test]
fn scopable_action_on_star_is_medium_unscoped() {
    let report = validate_value(&json!({
        "Version": "2012-10-17",
        "Statement": [{"Effect": "Allow", "Action": "dynamodb:GetItem", "Resource": "*"}]
    }))
    .expect("object");

    assert!(report.findings.iter().any(|f| {
        f.rule_id == ids::RULE_RESOURCES_UNSCOPED && f.severity == Severity::Medium
    }));
    assert!(!report.passed);
}

#[test]
fn shared_sid_is_one_low_finding() {
    let report = validate_value(&json!({
        "Version": "2012-10-17",
        "Statement": [
            {"Sid": "A", "Effect": "Allow", "Action": "s3:ListBucket", "Resource": "arn:aws:s3:::b"},
            {"Sid": "A", "Effect": "Allow", "Action": "s3:ListBucket", "Resource": "arn:aws:s3:::c"}
        ]
    }))
    .expect("object");

    let dupes: Vec<_> = report
        .findings
        .iter()
        .filter(|f| f.code == ids::CODE_DUPLICATE_SID)
        .collect();
    assert_eq!(dupes.len(), 1);
    assert_eq!(dupes[0].severity, Severity::Low);
    assert_eq!(dupes[0].data["statements"], json!([0, 1]));
    assert!(report.passed);
}
