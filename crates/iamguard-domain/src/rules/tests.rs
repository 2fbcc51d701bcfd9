use crate::model::Effect;
use crate::parse_policy;
use crate::policy::{EffectiveConfig, PatternSet};
use crate::test_support::{
    allow_statement, config_with_allow, deny_statement, empty_condition, findings_for, policy,
    statement, with_condition, with_sid,
};
use iamguard_types::{Severity, ids};
use serde_json::json;

fn default_cfg() -> EffectiveConfig {
    EffectiveConfig::default()
}

#[test]
fn wildcard_action_worst_case_wins() {
    let doc = policy(vec![allow_statement(
        0,
        &["s3:GetObject", "s3:*", "*", "ec2:Describe*"],
        &["arn:aws:s3:::b/k"],
    )]);
    let out = findings_for(ids::RULE_ACTIONS_WILDCARD, &doc, &default_cfg());

    assert_eq!(out.len(), 1);
    assert_eq!(out[0].severity, Severity::High);
    assert_eq!(out[0].code, ids::CODE_BARE_WILDCARD_ACTION);
    assert_eq!(out[0].data["actions"], json!(["*", "ec2:Describe*", "s3:*"]));
}

#[test]
fn wildcard_action_service_and_partial() {
    let doc = policy(vec![
        allow_statement(0, &["s3:*"], &["arn:aws:s3:::b/k"]),
        allow_statement(1, &["s3:Get*"], &["arn:aws:s3:::b/k"]),
    ]);
    let out = findings_for(ids::RULE_ACTIONS_WILDCARD, &doc, &default_cfg());

    assert_eq!(out.len(), 2);
    assert_eq!(out[0].severity, Severity::Medium);
    assert_eq!(out[0].code, ids::CODE_SERVICE_WILDCARD_ACTION);
    assert_eq!(out[1].severity, Severity::Low);
    assert_eq!(out[1].code, ids::CODE_PARTIAL_WILDCARD_ACTION);
    assert_eq!(out[1].statement_index(), Some(1));
}

#[test]
fn wildcard_action_ignores_deny_and_allowlisted() {
    let doc = policy(vec![
        deny_statement(0, &["*"], &["arn:aws:s3:::b/k"]),
        allow_statement(1, &["logs:*"], &["arn:aws:logs:us-east-1:1:log-group:app:*"]),
    ]);
    let cfg = config_with_allow(ids::RULE_ACTIONS_WILDCARD, &["logs:*"]);
    assert!(findings_for(ids::RULE_ACTIONS_WILDCARD, &doc, &cfg).is_empty());
}

#[test]
fn wildcard_resource_bare_star_is_high() {
    let doc = policy(vec![allow_statement(
        0,
        &["s3:GetObject"],
        &["*", "arn:aws:s3:::b/*"],
    )]);
    let out = findings_for(ids::RULE_RESOURCES_WILDCARD, &doc, &default_cfg());

    assert_eq!(out.len(), 1);
    assert_eq!(out[0].severity, Severity::High);
    assert_eq!(out[0].code, ids::CODE_WILDCARD_RESOURCE);
    assert_eq!(out[0].data["resources"], json!(["*", "arn:aws:s3:::b/*"]));
}

#[test]
fn wildcard_resource_flags_account_wide_actions_too() {
    let doc = policy(vec![
        allow_statement(0, &["iam:ListUsers"], &["*"]),
        allow_statement(1, &["s3:ListAllMyBuckets", "ec2:DescribeInstances"], &["*"]),
        allow_statement(2, &["cloudwatch:PutMetricData"], &["*"]),
    ]);
    let cfg = default_cfg();

    let out = findings_for(ids::RULE_RESOURCES_WILDCARD, &doc, &cfg);
    assert_eq!(out.len(), 3);
    for (index, finding) in out.iter().enumerate() {
        assert_eq!(finding.severity, Severity::High);
        assert_eq!(finding.code, ids::CODE_WILDCARD_RESOURCE);
        assert_eq!(finding.statement_index(), Some(index));
    }
    // Account-wide actions are still exempt from the scoping rule.
    assert!(findings_for(ids::RULE_RESOURCES_UNSCOPED, &doc, &cfg).is_empty());
}

#[test]
fn wildcard_resource_mixed_exempt_and_scoped_actions_is_high() {
    let doc = policy(vec![allow_statement(
        0,
        &["s3:ListAllMyBuckets", "s3:GetObject"],
        &["*"],
    )]);
    let out = findings_for(ids::RULE_RESOURCES_WILDCARD, &doc, &default_cfg());
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].severity, Severity::High);
}

#[test]
fn wildcard_resource_partial_scoping_is_rewarded() {
    let doc = policy(vec![
        allow_statement(0, &["s3:GetObject"], &["arn:aws:s3:::reports/*"]),
        allow_statement(1, &["dynamodb:GetItem"], &["arn:aws:dynamodb:us-east-1:1:table/*"]),
    ]);
    let out = findings_for(ids::RULE_RESOURCES_WILDCARD, &doc, &default_cfg());

    assert_eq!(out.len(), 2);
    assert_eq!(out[0].severity, Severity::Low);
    assert_eq!(out[0].code, ids::CODE_TRAILING_WILDCARD_ARN);
    assert_eq!(out[1].severity, Severity::Medium);
    assert_eq!(out[1].code, ids::CODE_WILDCARD_ARN);
}

#[test]
fn unscoped_resource_lists_only_scopable_actions() {
    let doc = policy(vec![allow_statement(
        0,
        &["dynamodb:GetItem", "dynamodb:ListTables", "madeup:Thing"],
        &["*"],
    )]);
    let out = findings_for(ids::RULE_RESOURCES_UNSCOPED, &doc, &default_cfg());

    assert_eq!(out.len(), 1);
    assert_eq!(out[0].severity, Severity::Medium);
    assert_eq!(out[0].code, ids::CODE_UNSCOPED_RESOURCE);
    assert_eq!(out[0].data["actions"], json!(["dynamodb:GetItem", "madeup:Thing"]));
}

#[test]
fn unscoped_resource_honours_extended_exemptions() {
    let doc = policy(vec![allow_statement(0, &["ses:SendEmail"], &["*"])]);
    let mut cfg = default_cfg();
    assert_eq!(findings_for(ids::RULE_RESOURCES_UNSCOPED, &doc, &cfg).len(), 1);

    cfg.scope.exempt = cfg.scope.exempt.extended(["ses:SendEmail"]).expect("valid");
    assert!(findings_for(ids::RULE_RESOURCES_UNSCOPED, &doc, &cfg).is_empty());
    assert_eq!(findings_for(ids::RULE_RESOURCES_WILDCARD, &doc, &cfg).len(), 1);
}

#[test]
fn structure_reports_statement_defects_at_their_position() {
    let doc = parse_policy(&json!({
        "Version": "2012-10-17",
        "Statement": [
            {"Effect": "Allow", "Action": "s3:GetObject", "Resource": "arn:aws:s3:::b/k"},
            {"Effect": "Permit", "Action": "s3:GetObject", "Resource": "arn:aws:s3:::b/k", "condition": {}}
        ]
    }))
    .expect("object");
    let out = findings_for(ids::RULE_POLICY_STRUCTURE, &doc, &default_cfg());

    assert_eq!(out.len(), 2);
    assert_eq!(out[0].code, ids::CODE_INVALID_EFFECT);
    assert_eq!(out[0].severity, Severity::High);
    assert_eq!(out[0].statement_index(), Some(1));
    assert_eq!(out[1].code, ids::CODE_UNKNOWN_KEY);
    assert_eq!(out[1].severity, Severity::Low);
    assert!(out[1].message.contains("did you mean \"Condition\""));
}

#[test]
fn structure_missing_statement_is_high() {
    let doc = parse_policy(&json!({"Version": "2012-10-17"})).expect("object");
    let out = findings_for(ids::RULE_POLICY_STRUCTURE, &doc, &default_cfg());
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].code, ids::CODE_MISSING_STATEMENT);
    assert_eq!(out[0].severity, Severity::High);
    assert!(out[0].statement.is_none());
}

#[test]
fn structure_allowlist_matches_codes() {
    let doc = parse_policy(&json!({
        "Statement": [{"Effect": "Allow", "Action": "s3:GetObject", "Resource": "arn:aws:s3:::b/k"}]
    }))
    .expect("object");
    let cfg = config_with_allow(ids::RULE_POLICY_STRUCTURE, &["missing_version"]);
    assert!(findings_for(ids::RULE_POLICY_STRUCTURE, &doc, &cfg).is_empty());
}

#[test]
fn duplicate_sids_yield_one_finding_per_sid() {
    let doc = policy(vec![
        with_sid(allow_statement(0, &["s3:GetObject"], &["arn:aws:s3:::b/k"]), "B"),
        with_sid(allow_statement(1, &["s3:GetObject"], &["arn:aws:s3:::b/k"]), "A"),
        with_sid(allow_statement(2, &["s3:GetObject"], &["arn:aws:s3:::b/k"]), "B"),
        with_sid(allow_statement(3, &["s3:GetObject"], &["arn:aws:s3:::b/k"]), "A"),
        with_sid(allow_statement(4, &["s3:GetObject"], &["arn:aws:s3:::b/k"]), "B"),
    ]);
    let out: Vec<_> = findings_for(ids::RULE_POLICY_STRUCTURE, &doc, &default_cfg())
        .into_iter()
        .filter(|f| f.code == ids::CODE_DUPLICATE_SID)
        .collect();

    assert_eq!(out.len(), 2);
    assert_eq!(out[0].data["sid"], "B");
    assert_eq!(out[0].data["statements"], json!([0, 2, 4]));
    assert_eq!(out[1].data["sid"], "A");
    assert_eq!(out[1].data["statements"], json!([1, 3]));
    assert!(out.iter().all(|f| f.severity == Severity::Low));
}

#[test]
fn condition_absent_is_info_and_respects_conditions() {
    let doc = policy(vec![
        allow_statement(0, &["s3:GetObject"], &["arn:aws:s3:::b/*"]),
        with_condition(
            allow_statement(1, &["s3:GetObject"], &["arn:aws:s3:::b/*"]),
            json!({"Bool": {"aws:MultiFactorAuthPresent": "true"}}),
        ),
        empty_condition(allow_statement(2, &["s3:PutObject"], &["arn:aws:s3:::b/*"])),
        allow_statement(3, &["s3:ListBucket"], &["arn:aws:s3:::b"]),
    ]);
    let out = findings_for(ids::RULE_CONDITIONS_ABSENT, &doc, &default_cfg());

    let positions: Vec<_> = out.iter().map(|f| f.statement_index()).collect();
    assert_eq!(positions, vec![Some(0), Some(2)]);
    assert!(out.iter().all(|f| f.severity == Severity::Info));
}

#[test]
fn condition_absent_flags_service_wildcards() {
    let doc = policy(vec![allow_statement(0, &["sqs:*"], &["arn:aws:sqs:us-east-1:1:jobs"])]);
    let out = findings_for(ids::RULE_CONDITIONS_ABSENT, &doc, &default_cfg());
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].data["actions"], json!(["sqs:*"]));
}

#[test]
fn deny_broad_requires_both_wildcards() {
    let doc = policy(vec![
        with_sid(deny_statement(0, &["*"], &["*"]), "Guardrail"),
        deny_statement(1, &["*"], &["arn:aws:s3:::b/*"]),
        deny_statement(2, &["*:*"], &["*"]),
        allow_statement(3, &["s3:GetObject"], &["arn:aws:s3:::b/k"]),
    ]);
    let out = findings_for(ids::RULE_DENY_BROAD, &doc, &default_cfg());

    let positions: Vec<_> = out.iter().map(|f| f.statement_index()).collect();
    assert_eq!(positions, vec![Some(0), Some(2)]);
    assert!(out.iter().all(|f| f.severity == Severity::Low));

    let cfg = config_with_allow(ids::RULE_DENY_BROAD, &["Guard*"]);
    assert_eq!(findings_for(ids::RULE_DENY_BROAD, &doc, &cfg).len(), 1);
}

#[test]
fn negated_keys_need_manual_review() {
    let doc = parse_policy(&json!({
        "Version": "2012-10-17",
        "Statement": [
            {"Effect": "Allow", "NotAction": "iam:*", "Resource": "*"},
            {"Effect": "Deny", "Action": "s3:*", "NotResource": ["arn:aws:s3:::public/*"]}
        ]
    }))
    .expect("object");
    let out = findings_for(ids::RULE_STATEMENTS_NEGATED, &doc, &default_cfg());

    assert_eq!(out.len(), 2);
    assert_eq!(out[0].code, ids::CODE_NOT_ACTION);
    assert_eq!(out[0].severity, Severity::Medium);
    assert_eq!(out[0].data["excluded"], json!(["iam:*"]));
    assert_eq!(out[1].code, ids::CODE_NOT_RESOURCE);
    assert_eq!(out[1].data["effect"], "Deny");
}

#[test]
fn negated_statements_do_not_crash_other_rules() {
    let doc = parse_policy(&json!({
        "Version": "2012-10-17",
        "Statement": {"Effect": "Allow", "NotAction": "iam:*", "NotResource": "arn:aws:s3:::x"}
    }))
    .expect("object");
    let report = crate::validate(&doc);
    assert!(!report.passed);
    assert_eq!(report.statement_count, 1);
}

#[test]
fn sensitive_actions_are_low_and_skip_wildcards() {
    let doc = policy(vec![
        allow_statement(0, &["iam:PassRole", "kms:Decrypt", "s3:GetObject"], &["arn:aws:iam::1:role/app"]),
        allow_statement(1, &["iam:*"], &["arn:aws:iam::1:role/app"]),
        statement(2, Effect::Deny, &["iam:CreateUser"], &["*"]),
    ]);
    let out = findings_for(ids::RULE_ACTIONS_SENSITIVE, &doc, &default_cfg());

    assert_eq!(out.len(), 1);
    assert_eq!(out[0].severity, Severity::Low);
    assert_eq!(out[0].data["actions"], json!(["iam:PassRole", "kms:Decrypt"]));
}

#[test]
fn sensitive_actions_can_be_extended() {
    let doc = policy(vec![allow_statement(
        0,
        &["ssm:GetParameters"],
        &["arn:aws:ssm:us-east-1:1:parameter/app/*"],
    )]);
    let mut cfg = default_cfg();
    assert!(findings_for(ids::RULE_ACTIONS_SENSITIVE, &doc, &cfg).is_empty());

    cfg.sensitive = PatternSet::new(["ssm:GetParameter*"]).expect("valid");
    assert_eq!(findings_for(ids::RULE_ACTIONS_SENSITIVE, &doc, &cfg).len(), 1);
}
