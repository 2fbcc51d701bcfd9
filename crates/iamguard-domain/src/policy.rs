use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use std::collections::BTreeMap;

/// A list of IAM-style glob patterns compiled for matching.
///
/// Matching is case-insensitive, as IAM action names are.
#[derive(Clone, Debug, Default)]
pub struct PatternSet {
    patterns: Vec<String>,
    set: Option<GlobSet>,
}

impl PatternSet {
    pub fn new<I, S>(patterns: I) -> Result<Self, globset::Error>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let patterns: Vec<String> = patterns.into_iter().map(Into::into).collect();
        if patterns.is_empty() {
            return Ok(Self::default());
        }

        let mut builder = GlobSetBuilder::new();
        for pattern in &patterns {
            builder.add(GlobBuilder::new(pattern).case_insensitive(true).build()?);
        }
        Ok(Self {
            set: Some(builder.build()?),
            patterns,
        })
    }

    /// Returns a new set holding both lists of patterns.
    pub fn extended<I, S>(&self, more: I) -> Result<Self, globset::Error>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut all = self.patterns.clone();
        all.extend(more.into_iter().map(Into::into));
        Self::new(all)
    }

    pub fn is_match(&self, value: &str) -> bool {
        self.set.as_ref().is_some_and(|set| set.is_match(value))
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

#[derive(Clone, Debug, Default)]
pub struct RulePolicy {
    pub enabled: bool,
    /// Rule-specific ignore list: actions, resources, codes or Sids depending on the rule.
    pub allow: PatternSet,
}

impl RulePolicy {
    pub fn enabled() -> Self {
        Self {
            enabled: true,
            allow: PatternSet::default(),
        }
    }

    pub fn disabled() -> Self {
        Self::default()
    }
}

/// Which actions need resource-level scoping.
#[derive(Clone, Debug, Default)]
pub struct ResourceScope {
    /// Lower-cased service prefix -> whether its actions support (and so need) scoped resources.
    pub require: BTreeMap<String, bool>,
    /// Actions that are inherently account- or region-wide.
    pub exempt: PatternSet,
}

impl ResourceScope {
    /// Unknown service prefixes are treated as requiring scoped resources.
    pub fn requires_scope(&self, action: &str) -> bool {
        if self.exempt.is_match(action) {
            return false;
        }
        let service = action
            .split_once(':')
            .map(|(service, _)| service)
            .unwrap_or(action)
            .to_ascii_lowercase();
        self.require.get(&service).copied().unwrap_or(true)
    }
}

#[derive(Clone, Debug)]
pub struct EffectiveConfig {
    pub profile: String,
    /// Map of rule_id -> policy. Rules missing from the map do not run.
    pub rules: BTreeMap<String, RulePolicy>,
    pub scope: ResourceScope,
    /// Actions worth a second look even when scoped.
    pub sensitive: PatternSet,
    /// Actions broad enough that a Condition block is advised.
    pub condition_advised: PatternSet,
}

impl EffectiveConfig {
    pub fn rule_policy(&self, rule_id: &str) -> Option<&RulePolicy> {
        self.rules.get(rule_id).filter(|p| p.enabled)
    }
}

impl Default for EffectiveConfig {
    fn default() -> Self {
        crate::catalog::builtin_config()
    }
}
