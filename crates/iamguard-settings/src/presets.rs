use iamguard_domain::catalog::builtin_config;
use iamguard_domain::policy::{EffectiveConfig, PatternSet, RulePolicy};
use iamguard_types::ids;

/// Profile names accepted in `iamguard.toml` and `--profile`.
pub const PROFILES: &[&str] = &["default", "strict", "quiet"];

/// Preset profiles are opinionated defaults.
///
/// Keep these small and readable. Anything complex should go into repo config.
pub fn preset(profile: &str) -> EffectiveConfig {
    match profile {
        "strict" => strict_profile(),
        "quiet" => quiet_profile(),
        _ => builtin_config(),
    }
}

/// Every rule on, and no action is taken as account-wide: each "*" grant gets questioned.
fn strict_profile() -> EffectiveConfig {
    let mut cfg = builtin_config();
    cfg.profile = "strict".to_string();
    cfg.scope.exempt = PatternSet::default();
    cfg
}

/// Advisory-only rules off. Blocking rules are unchanged.
fn quiet_profile() -> EffectiveConfig {
    let mut cfg = builtin_config();
    cfg.profile = "quiet".to_string();
    for id in [ids::RULE_CONDITIONS_ABSENT, ids::RULE_ACTIONS_SENSITIVE] {
        cfg.rules.insert(id.to_string(), RulePolicy::disabled());
    }
    cfg
}
