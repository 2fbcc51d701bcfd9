//! Stable identifiers for rules and finding codes.
//!
//! `rule_id` is a dotted namespace. `code` is a short snake_case discriminator.

// Rules (evaluation order)
pub const RULE_ACTIONS_WILDCARD: &str = "actions.wildcard";
pub const RULE_RESOURCES_WILDCARD: &str = "resources.wildcard";
pub const RULE_RESOURCES_UNSCOPED: &str = "resources.unscoped";
pub const RULE_POLICY_STRUCTURE: &str = "policy.structure";
pub const RULE_CONDITIONS_ABSENT: &str = "conditions.absent";
pub const RULE_DENY_BROAD: &str = "deny.broad";
pub const RULE_STATEMENTS_NEGATED: &str = "statements.negated";
pub const RULE_ACTIONS_SENSITIVE: &str = "actions.sensitive";

// Codes: actions.wildcard
pub const CODE_BARE_WILDCARD_ACTION: &str = "bare_wildcard_action";
pub const CODE_SERVICE_WILDCARD_ACTION: &str = "service_wildcard_action";
pub const CODE_PARTIAL_WILDCARD_ACTION: &str = "partial_wildcard_action";

// Codes: resources.wildcard
pub const CODE_WILDCARD_RESOURCE: &str = "wildcard_resource";
pub const CODE_WILDCARD_ARN: &str = "wildcard_arn";
pub const CODE_TRAILING_WILDCARD_ARN: &str = "trailing_wildcard_arn";

// Codes: resources.unscoped
pub const CODE_UNSCOPED_RESOURCE: &str = "unscoped_resource";

// Codes: policy.structure (document level)
pub const CODE_INVALID_JSON: &str = "invalid_json";
pub const CODE_MISSING_VERSION: &str = "missing_version";
pub const CODE_UNSUPPORTED_VERSION: &str = "unsupported_version";
pub const CODE_MISSING_STATEMENT: &str = "missing_statement";
pub const CODE_INVALID_STATEMENT_CONTAINER: &str = "invalid_statement_container";
pub const CODE_NO_STATEMENTS: &str = "no_statements";
pub const CODE_DUPLICATE_SID: &str = "duplicate_sid";

// Codes: policy.structure (statement level)
pub const CODE_STATEMENT_NOT_OBJECT: &str = "statement_not_object";
pub const CODE_MISSING_EFFECT: &str = "missing_effect";
pub const CODE_INVALID_EFFECT: &str = "invalid_effect";
pub const CODE_MISSING_ACTION: &str = "missing_action";
pub const CODE_MISSING_RESOURCE: &str = "missing_resource";
pub const CODE_CONFLICTING_KEYS: &str = "conflicting_keys";
pub const CODE_INVALID_FIELD_TYPE: &str = "invalid_field_type";
pub const CODE_UNKNOWN_KEY: &str = "unknown_key";

// Codes: conditions.absent
pub const CODE_CONDITION_ADVISED: &str = "condition_advised";

// Codes: deny.broad
pub const CODE_BROAD_DENY: &str = "broad_deny";

// Codes: statements.negated
pub const CODE_NOT_ACTION: &str = "not_action";
pub const CODE_NOT_RESOURCE: &str = "not_resource";

// Codes: actions.sensitive
pub const CODE_SENSITIVE_ACTION: &str = "sensitive_action";

/// The only policy language version that enables the full grammar (policy variables, etc).
pub const POLICY_VERSION_2012: &str = "2012-10-17";
