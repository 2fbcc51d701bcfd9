use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// `iamguard.toml` schema v1.
///
/// This is a *user-facing* config model: it is intentionally permissive so forward-compat is easy.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct IamguardConfigV1 {
    /// Optional schema string for tooling (`iamguard.config.v1`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// `default`, `strict` or `quiet`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,

    /// Map of rule_id -> config.
    #[serde(default)]
    pub rules: BTreeMap<String, RuleConfig>,

    #[serde(default)]
    pub scope: ScopeConfig,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RuleConfig {
    /// Override preset enable/disable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    /// Glob patterns the rule ignores (actions, resources, Sids or codes depending on the rule).
    #[serde(default)]
    pub allow: Vec<String>,
}

/// Extensions to the built-in scoping and sensitivity tables.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ScopeConfig {
    /// Service prefix -> whether its actions need resource-level scoping.
    #[serde(default)]
    pub require: BTreeMap<String, bool>,

    /// Extra actions that are inherently account- or region-wide.
    #[serde(default)]
    pub exempt: Vec<String>,

    /// Extra actions reported by `actions.sensitive`.
    #[serde(default)]
    pub sensitive: Vec<String>,
}
