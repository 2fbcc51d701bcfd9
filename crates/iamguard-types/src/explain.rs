//! Explain registry for rules and codes.
//!
//! Maps rule IDs and codes to human-readable explanations with remediation guidance.

use crate::ids;

/// Explanation entry for a rule or code.
#[derive(Debug, Clone)]
pub struct Explanation {
    /// Short description of the rule/code.
    pub title: &'static str,
    /// What the rule does and why it exists.
    pub description: &'static str,
    /// How to fix violations.
    pub remediation: &'static str,
    /// Before/after policy examples.
    pub examples: ExamplePair,
}

/// Before and after policy examples.
#[derive(Debug, Clone)]
pub struct ExamplePair {
    /// Policy JSON that would trigger a finding.
    pub before: &'static str,
    /// Policy JSON that passes the rule.
    pub after: &'static str,
}

/// Look up an explanation by rule_id or code.
///
/// Returns `None` if the identifier is not recognized.
pub fn lookup_explanation(identifier: &str) -> Option<Explanation> {
    match identifier {
        // Rule IDs
        ids::RULE_ACTIONS_WILDCARD => Some(explain_actions_wildcard()),
        ids::RULE_RESOURCES_WILDCARD => Some(explain_resources_wildcard()),
        ids::RULE_RESOURCES_UNSCOPED => Some(explain_resources_unscoped()),
        ids::RULE_POLICY_STRUCTURE => Some(explain_policy_structure()),
        ids::RULE_CONDITIONS_ABSENT => Some(explain_conditions_absent()),
        ids::RULE_DENY_BROAD => Some(explain_deny_broad()),
        ids::RULE_STATEMENTS_NEGATED => Some(explain_statements_negated()),
        ids::RULE_ACTIONS_SENSITIVE => Some(explain_actions_sensitive()),

        // Codes
        ids::CODE_BARE_WILDCARD_ACTION => Some(retitle(explain_actions_wildcard(), "Bare Wildcard Action")),
        ids::CODE_SERVICE_WILDCARD_ACTION => Some(retitle(explain_actions_wildcard(), "Service Wildcard Action")),
        ids::CODE_PARTIAL_WILDCARD_ACTION => Some(retitle(explain_actions_wildcard(), "Partial Wildcard Action")),
        ids::CODE_WILDCARD_RESOURCE => Some(retitle(explain_resources_wildcard(), "Wildcard Resource")),
        ids::CODE_WILDCARD_ARN => Some(retitle(explain_resources_wildcard(), "Wildcard ARN Segment")),
        ids::CODE_TRAILING_WILDCARD_ARN => Some(retitle(explain_resources_wildcard(), "Trailing ARN Wildcard")),
        ids::CODE_UNSCOPED_RESOURCE => Some(retitle(explain_resources_unscoped(), "Unscoped Resource")),
        ids::CODE_INVALID_JSON
        | ids::CODE_MISSING_STATEMENT
        | ids::CODE_INVALID_STATEMENT_CONTAINER
        | ids::CODE_NO_STATEMENTS
        | ids::CODE_STATEMENT_NOT_OBJECT
        | ids::CODE_MISSING_EFFECT
        | ids::CODE_INVALID_EFFECT
        | ids::CODE_MISSING_ACTION
        | ids::CODE_MISSING_RESOURCE
        | ids::CODE_CONFLICTING_KEYS
        | ids::CODE_INVALID_FIELD_TYPE
        | ids::CODE_UNKNOWN_KEY => Some(explain_policy_structure()),
        ids::CODE_MISSING_VERSION | ids::CODE_UNSUPPORTED_VERSION => Some(explain_version()),
        ids::CODE_DUPLICATE_SID => Some(explain_duplicate_sid()),
        ids::CODE_CONDITION_ADVISED => Some(retitle(explain_conditions_absent(), "Condition Advised")),
        ids::CODE_BROAD_DENY => Some(retitle(explain_deny_broad(), "Broad Deny")),
        ids::CODE_NOT_ACTION => Some(retitle(explain_statements_negated(), "NotAction Present")),
        ids::CODE_NOT_RESOURCE => Some(retitle(explain_statements_negated(), "NotResource Present")),
        ids::CODE_SENSITIVE_ACTION => Some(retitle(explain_actions_sensitive(), "Sensitive Action")),

        _ => None,
    }
}

/// List all known rule IDs, in evaluation order.
pub fn all_rule_ids() -> &'static [&'static str] {
    &[
        ids::RULE_ACTIONS_WILDCARD,
        ids::RULE_RESOURCES_WILDCARD,
        ids::RULE_RESOURCES_UNSCOPED,
        ids::RULE_POLICY_STRUCTURE,
        ids::RULE_CONDITIONS_ABSENT,
        ids::RULE_DENY_BROAD,
        ids::RULE_STATEMENTS_NEGATED,
        ids::RULE_ACTIONS_SENSITIVE,
    ]
}

/// List all known codes.
pub fn all_codes() -> &'static [&'static str] {
    &[
        ids::CODE_BARE_WILDCARD_ACTION,
        ids::CODE_SERVICE_WILDCARD_ACTION,
        ids::CODE_PARTIAL_WILDCARD_ACTION,
        ids::CODE_WILDCARD_RESOURCE,
        ids::CODE_WILDCARD_ARN,
        ids::CODE_TRAILING_WILDCARD_ARN,
        ids::CODE_UNSCOPED_RESOURCE,
        ids::CODE_INVALID_JSON,
        ids::CODE_MISSING_VERSION,
        ids::CODE_UNSUPPORTED_VERSION,
        ids::CODE_MISSING_STATEMENT,
        ids::CODE_INVALID_STATEMENT_CONTAINER,
        ids::CODE_NO_STATEMENTS,
        ids::CODE_DUPLICATE_SID,
        ids::CODE_STATEMENT_NOT_OBJECT,
        ids::CODE_MISSING_EFFECT,
        ids::CODE_INVALID_EFFECT,
        ids::CODE_MISSING_ACTION,
        ids::CODE_MISSING_RESOURCE,
        ids::CODE_CONFLICTING_KEYS,
        ids::CODE_INVALID_FIELD_TYPE,
        ids::CODE_UNKNOWN_KEY,
        ids::CODE_CONDITION_ADVISED,
        ids::CODE_BROAD_DENY,
        ids::CODE_NOT_ACTION,
        ids::CODE_NOT_RESOURCE,
        ids::CODE_SENSITIVE_ACTION,
    ]
}

fn retitle(mut exp: Explanation, title: &'static str) -> Explanation {
    exp.title = title;
    exp
}

// --- Rule-level explanations ---

fn explain_actions_wildcard() -> Explanation {
    Explanation {
        title: "Wildcard Actions",
        description: "\
Detects Allow statements that grant actions through wildcards.

- `*` (or `*:*`) grants every action in every service: high severity
- `service:*` grants every action of one service: medium severity
- `service:Prefix*` grants a family of actions: low severity

Least privilege requires enumerating the actions a workload actually calls.
Wildcards also silently pick up actions AWS adds to a service later.
A statement is reported once, at the worst wildcard it contains.",
        remediation: "\
Replace wildcards with the specific actions the workload needs. CloudTrail
history or IAM Access Analyzer policy generation can tell you which actions
are actually used.",
        examples: ExamplePair {
            before: r#"{
  "Effect": "Allow",
  "Action": "s3:*",
  "Resource": "arn:aws:s3:::reports/*"
}"#,
            after: r#"{
  "Effect": "Allow",
  "Action": ["s3:GetObject", "s3:PutObject"],
  "Resource": "arn:aws:s3:::reports/*"
}"#,
        },
    }
}

fn explain_resources_wildcard() -> Explanation {
    Explanation {
        title: "Wildcard Resources",
        description: "\
Detects Allow statements whose resources are not pinned to specific ARNs.

- `\"*\"` applies the statement to every resource in the account: high severity
- a wildcard in the service, region, account, or resource-name part of an ARN
  (`arn:aws:dynamodb:*:*:table/*`): medium severity
- a wildcard below a named resource (`arn:aws:s3:::bucket/*`): low severity,
  since the grant is already scoped to one resource

`\"*\"` is reported whatever the actions are, including account-wide ones such as
`iam:ListUsers`.",
        remediation: "\
List the exact ARNs the statement applies to. When a pattern is unavoidable,
keep the wildcard as far to the right of the ARN as possible.",
        examples: ExamplePair {
            before: r#"{
  "Effect": "Allow",
  "Action": "dynamodb:GetItem",
  "Resource": "*"
}"#,
            after: r#"{
  "Effect": "Allow",
  "Action": "dynamodb:GetItem",
  "Resource": "arn:aws:dynamodb:us-east-1:123456789012:table/Orders"
}"#,
        },
    }
}

fn explain_resources_unscoped() -> Explanation {
    Explanation {
        title: "Resource-Scoped Action Granted on All Resources",
        description: "\
Detects actions that support resource-level permissions (S3 objects, DynamoDB
tables, Lambda functions, ...) granted with `\"Resource\": \"*\"`.

Which service prefixes require scoping, and which actions are inherently
account- or region-wide, is data: it can be extended in iamguard.toml under
`[scope]`. A service prefix that is not in the table is treated as requiring
scoped resources.",
        remediation: "\
Move resource-level actions into a statement with explicit ARNs. Actions that
are inherently account-wide (List*, Describe*) belong in a separate statement.",
        examples: ExamplePair {
            before: r#"{
  "Effect": "Allow",
  "Action": ["lambda:ListFunctions", "lambda:InvokeFunction"],
  "Resource": "*"
}"#,
            after: r#"[
  {
    "Effect": "Allow",
    "Action": "lambda:ListFunctions",
    "Resource": "*"
  },
  {
    "Effect": "Allow",
    "Action": "lambda:InvokeFunction",
    "Resource": "arn:aws:lambda:us-east-1:123456789012:function:resize"
  }
]"#,
        },
    }
}

fn explain_policy_structure() -> Explanation {
    Explanation {
        title: "Policy Structure",
        description: "\
Validates the shape of the policy document against the IAM policy grammar:

- the document is valid JSON with a `Statement` object or array
- every statement is an object with `Effect` set to `Allow` or `Deny`
- every statement has a non-empty `Action` (or `NotAction`) and `Resource`
  (or `NotResource`), given as a string or a list of strings
- `Action` and `NotAction` (or `Resource` and `NotResource`) are not combined
- keys use AWS's exact spelling and casing

Malformed structure is high severity. Unknown keys, an empty statement list,
and duplicate Sids are advisory.",
        remediation: "\
Fix the reported key or value. IAM rejects documents that do not follow the
grammar, so a structurally broken policy cannot be attached at all.",
        examples: ExamplePair {
            before: r#"{
  "Version": "2012-10-17",
  "Statement": [{ "effect": "allow", "action": "s3:GetObject" }]
}"#,
            after: r#"{
  "Version": "2012-10-17",
  "Statement": [{
    "Effect": "Allow",
    "Action": "s3:GetObject",
    "Resource": "arn:aws:s3:::reports/*"
  }]
}"#,
        },
    }
}

fn explain_version() -> Explanation {
    Explanation {
        title: "Policy Language Version",
        description: "\
The document must declare `\"Version\": \"2012-10-17\"`.

Without a Version, IAM falls back to the 2008-10-17 language, which does not
support policy variables such as `${aws:username}`; those are then matched as
literal strings.",
        remediation: "Add `\"Version\": \"2012-10-17\"` at the top level of the document.",
        examples: ExamplePair {
            before: r#"{
  "Statement": [ ... ]
}"#,
            after: r#"{
  "Version": "2012-10-17",
  "Statement": [ ... ]
}"#,
        },
    }
}

fn explain_duplicate_sid() -> Explanation {
    Explanation {
        title: "Duplicate Sid",
        description: "\
Two or more statements share the same `Sid`. Some policy types accept this,
but Sids are meant to identify statements uniquely and tooling that refers to
statements by Sid becomes ambiguous.",
        remediation: "Give every statement a distinct Sid, or drop the Sid from one of them.",
        examples: ExamplePair {
            before: r#"[
  { "Sid": "Read", "Effect": "Allow", "Action": "s3:GetObject", "Resource": "arn:aws:s3:::a/*" },
  { "Sid": "Read", "Effect": "Allow", "Action": "s3:GetObject", "Resource": "arn:aws:s3:::b/*" }
]"#,
            after: r#"[
  { "Sid": "ReadA", "Effect": "Allow", "Action": "s3:GetObject", "Resource": "arn:aws:s3:::a/*" },
  { "Sid": "ReadB", "Effect": "Allow", "Action": "s3:GetObject", "Resource": "arn:aws:s3:::b/*" }
]"#,
        },
    }
}

fn explain_conditions_absent() -> Explanation {
    Explanation {
        title: "Condition Advised",
        description: "\
Suggests a `Condition` block for Allow statements that grant broad data or
credential access (S3 object operations, service wildcards, secret reads,
role passing) without one.

This is advisory and never fails a policy.",
        remediation: "\
Narrow the grant with conditions such as `aws:SourceIp`, `aws:SourceVpce`,
`aws:MultiFactorAuthPresent`, `aws:PrincipalTag/...`, or `iam:PassedToService`.",
        examples: ExamplePair {
            before: r#"{
  "Effect": "Allow",
  "Action": "s3:GetObject",
  "Resource": "arn:aws:s3:::reports/*"
}"#,
            after: r#"{
  "Effect": "Allow",
  "Action": "s3:GetObject",
  "Resource": "arn:aws:s3:::reports/*",
  "Condition": { "StringEquals": { "aws:SourceVpce": "vpce-1a2b3c4d" } }
}"#,
        },
    }
}

fn explain_deny_broad() -> Explanation {
    Explanation {
        title: "Broad Deny",
        description: "\
A Deny statement with `\"Action\": \"*\"` and `\"Resource\": \"*\"` blocks every
request it applies to. This is legal and sometimes intentional (guardrails
with a Condition), so the finding is advisory: verify the intent.",
        remediation: "\
Confirm the statement is meant to be a blanket guardrail. If not, narrow the
actions or resources, or add a Condition that limits when the deny applies.",
        examples: ExamplePair {
            before: r#"{
  "Effect": "Deny",
  "Action": "*",
  "Resource": "*"
}"#,
            after: r#"{
  "Effect": "Deny",
  "Action": "*",
  "Resource": "*",
  "Condition": { "Bool": { "aws:MultiFactorAuthPresent": "false" } }
}"#,
        },
    }
}

fn explain_statements_negated() -> Explanation {
    Explanation {
        title: "Negated Grant",
        description: "\
`NotAction` and `NotResource` invert the match: the statement applies to
everything *except* the listed entries. Combined with Allow this routinely
grants far more than intended, including actions added to AWS in the future;
combined with Deny it can leave unexpected gaps.

Their effect depends on the rest of the account's policies, so statements
using them are reported for manual review.",
        remediation: "\
Prefer positive `Action`/`Resource` lists. If the negation is intentional,
pair it with a Condition and document why.",
        examples: ExamplePair {
            before: r#"{
  "Effect": "Allow",
  "NotAction": "iam:*",
  "Resource": "*"
}"#,
            after: r#"{
  "Effect": "Allow",
  "Action": ["s3:GetObject", "sqs:SendMessage"],
  "Resource": ["arn:aws:s3:::reports/*", "arn:aws:sqs:us-east-1:123456789012:jobs"]
}"#,
        },
    }
}

fn explain_actions_sensitive() -> Explanation {
    Explanation {
        title: "Sensitive Action",
        description: "\
Reports Allow statements that grant actions able to escalate privileges or
read secrets: creating identities, attaching or writing policies, passing
roles, decrypting with KMS, reading Secrets Manager values, and similar.

The finding is advisory; these actions are often needed, but each one deserves
a second look.",
        remediation: "\
Confirm the action is required. Scope it to specific resources and add
conditions (for example `iam:PassedToService` for `iam:PassRole`).",
        examples: ExamplePair {
            before: r#"{
  "Effect": "Allow",
  "Action": "iam:PassRole",
  "Resource": "*"
}"#,
            after: r#"{
  "Effect": "Allow",
  "Action": "iam:PassRole",
  "Resource": "arn:aws:iam::123456789012:role/lambda-exec",
  "Condition": { "StringEquals": { "iam:PassedToService": "lambda.amazonaws.com" } }
}"#,
        },
    }
}
