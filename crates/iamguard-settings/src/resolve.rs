use crate::{model::IamguardConfigV1, presets};
use anyhow::Context;
use iamguard_domain::policy::{EffectiveConfig, PatternSet, RulePolicy};
use iamguard_types::explain::all_rule_ids;
use iamguard_types::ids;

/// Rules that can emit High or Medium findings. Configuration may narrow them but never
/// switch them off, so it cannot turn a failing policy into a passing one.
pub const BLOCKING_RULES: &[&str] = &[
    ids::RULE_ACTIONS_WILDCARD,
    ids::RULE_RESOURCES_WILDCARD,
    ids::RULE_RESOURCES_UNSCOPED,
    ids::RULE_POLICY_STRUCTURE,
    ids::RULE_STATEMENTS_NEGATED,
];

#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub profile: Option<String>,
}

#[derive(Clone, Debug)]
pub struct ResolvedConfig {
    pub effective: EffectiveConfig,
    /// Set when the requested profile was not recognised and `default` was used instead.
    pub unknown_profile: Option<String>,
}

pub fn resolve_config(
    cfg: IamguardConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    let profile = overrides
        .profile
        .clone()
        .or(cfg.profile.clone())
        .unwrap_or_else(|| "default".to_string());

    let unknown_profile = (!presets::PROFILES.contains(&profile.as_str())).then(|| profile.clone());
    let mut effective = presets::preset(&profile);

    // per-rule overrides
    for (rule_id, rc) in &cfg.rules {
        if !all_rule_ids().contains(&rule_id.as_str()) {
            anyhow::bail!(
                "unknown rule id in [rules]: {rule_id} (expected one of: {})",
                all_rule_ids().join(", ")
            );
        }

        let entry = effective
            .rules
            .entry(rule_id.clone())
            .or_insert_with(RulePolicy::disabled);

        let blocking = BLOCKING_RULES.contains(&rule_id.as_str());
        if let Some(enabled) = rc.enabled {
            if !enabled && blocking {
                anyhow::bail!("{rule_id} reports blocking findings and cannot be disabled");
            }
            entry.enabled = enabled;
        }
        if blocking && let Some(pattern) = rc.allow.iter().find(|p| matches_everything(p)) {
            anyhow::bail!("allow pattern \"{pattern}\" for {rule_id} would silence every finding");
        }
        if !rc.allow.is_empty() {
            entry.allow = PatternSet::new(rc.allow.iter().cloned())
                .with_context(|| format!("invalid allow glob for {rule_id}"))?;
        }
    }

    // scope tables extend the preset
    for (service, required) in &cfg.scope.require {
        effective
            .scope
            .require
            .insert(service.to_ascii_lowercase(), *required);
    }
    if let Some(pattern) = cfg.scope.exempt.iter().find(|p| matches_everything(p)) {
        anyhow::bail!("scope.exempt pattern \"{pattern}\" would exempt every action");
    }
    if !cfg.scope.exempt.is_empty() {
        effective.scope.exempt = effective
            .scope
            .exempt
            .extended(cfg.scope.exempt.iter().cloned())
            .context("invalid glob in scope.exempt")?;
    }
    if !cfg.scope.sensitive.is_empty() {
        effective.sensitive = effective
            .sensitive
            .extended(cfg.scope.sensitive.iter().cloned())
            .context("invalid glob in scope.sensitive")?;
    }

    Ok(ResolvedConfig {
        effective,
        unknown_profile,
    })
}

/// `*`, `**`, `*:*` and the like match any action, resource or code.
fn matches_everything(pattern: &str) -> bool {
    pattern.contains('*') && pattern.chars().all(|c| matches!(c, '*' | ':'))
}
