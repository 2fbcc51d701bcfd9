//! Built-in rule data.
//!
//! These tables are the tunable knobs of the rule set. iamguard.toml extends them; the rule
//! logic never hard-codes service names.

use crate::policy::{EffectiveConfig, PatternSet, ResourceScope, RulePolicy};
use iamguard_types::explain::all_rule_ids;
use std::collections::BTreeMap;

/// Service prefix -> whether its actions take resource-level ARNs.
///
/// Services absent from this table are treated as `true`.
pub const SCOPE_REQUIREMENTS: &[(&str, bool)] = &[
    ("s3", true),
    ("dynamodb", true),
    ("lambda", true),
    ("sqs", true),
    ("sns", true),
    ("kms", true),
    ("secretsmanager", true),
    ("ssm", true),
    ("logs", true),
    ("kinesis", true),
    ("states", true),
    ("ecr", true),
    ("ec2", true),
    ("iam", true),
    ("rds", true),
    // No resource-level permissions at all: "*" is the only valid Resource.
    ("cloudwatch", false),
    ("xray", false),
    ("ce", false),
    ("pricing", false),
    ("health", false),
    ("support", false),
    ("trustedadvisor", false),
];

/// Actions that are inherently account- or region-wide.
pub const SCOPE_EXEMPT_ACTIONS: &[&str] = &[
    "iam:ListUsers",
    "iam:ListRoles",
    "iam:ListGroups",
    "iam:ListPolicies",
    "iam:GetAccountSummary",
    "iam:GetAccountPasswordPolicy",
    "s3:ListAllMyBuckets",
    "s3:GetAccountPublicAccessBlock",
    "dynamodb:ListTables",
    "lambda:ListFunctions",
    "lambda:GetAccountSettings",
    "sqs:ListQueues",
    "sns:ListTopics",
    "kms:ListKeys",
    "kms:ListAliases",
    "kms:CreateKey",
    "secretsmanager:ListSecrets",
    "secretsmanager:GetRandomPassword",
    "ssm:DescribeParameters",
    "logs:DescribeLogGroups",
    "ecr:GetAuthorizationToken",
    "ec2:Describe*",
    "sts:GetCallerIdentity",
];

/// Actions able to escalate privileges or read secrets.
pub const SENSITIVE_ACTIONS: &[&str] = &[
    "iam:CreateUser",
    "iam:CreateRole",
    "iam:CreateAccessKey",
    "iam:PutRolePolicy",
    "iam:PutUserPolicy",
    "iam:AttachRolePolicy",
    "iam:AttachUserPolicy",
    "iam:PassRole",
    "s3:PutBucketPolicy",
    "ec2:RunInstances",
    "lambda:CreateFunction",
    "lambda:UpdateFunctionCode",
    "kms:Decrypt",
    "secretsmanager:GetSecretValue",
    "sts:AssumeRole",
];

/// Grants broad enough that a Condition block is worth suggesting.
pub const CONDITION_ADVISED_ACTIONS: &[&str] = &[
    "s3:*Object",
    "dynamodb:*Item",
    "dynamodb:Scan",
    "dynamodb:Query",
    "secretsmanager:GetSecretValue",
    "ssm:GetParameter*",
    "kms:Decrypt",
    "iam:PassRole",
    "sts:AssumeRole",
];

/// The configuration `validate` uses when the caller supplies none.
pub fn builtin_config() -> EffectiveConfig {
    EffectiveConfig {
        profile: "default".to_string(),
        rules: all_rule_ids()
            .iter()
            .map(|id| (id.to_string(), RulePolicy::enabled()))
            .collect(),
        scope: builtin_scope(),
        sensitive: builtin_patterns(SENSITIVE_ACTIONS),
        condition_advised: builtin_patterns(CONDITION_ADVISED_ACTIONS),
    }
}

pub fn builtin_scope() -> ResourceScope {
    ResourceScope {
        require: SCOPE_REQUIREMENTS
            .iter()
            .map(|(service, required)| (service.to_string(), *required))
            .collect::<BTreeMap<_, _>>(),
        exempt: builtin_patterns(SCOPE_EXEMPT_ACTIONS),
    }
}

fn builtin_patterns(patterns: &[&str]) -> PatternSet {
    PatternSet::new(patterns.iter().copied())
        .expect("built-in action patterns must be valid globs")
}
