use crate::engine::validate_with;
use crate::model::{Effect, PolicyDocument, Statement, StringSet};
use crate::policy::{EffectiveConfig, PatternSet, RulePolicy};
use iamguard_types::Finding;
use iamguard_types::ids::POLICY_VERSION_2012;
use serde_json::{Map, Value};

pub fn set(values: &[&str]) -> StringSet {
    values.iter().map(|v| v.to_string()).collect()
}

pub fn statement(index: usize, effect: Effect, actions: &[&str], resources: &[&str]) -> Statement {
    Statement {
        index,
        effect: Some(effect),
        actions: set(actions),
        resources: set(resources),
        ..Statement::default()
    }
}

pub fn allow_statement(index: usize, actions: &[&str], resources: &[&str]) -> Statement {
    statement(index, Effect::Allow, actions, resources)
}

pub fn deny_statement(index: usize, actions: &[&str], resources: &[&str]) -> Statement {
    statement(index, Effect::Deny, actions, resources)
}

pub fn with_sid(mut stmt: Statement, sid: &str) -> Statement {
    stmt.sid = Some(sid.to_string());
    stmt
}

pub fn with_condition(mut stmt: Statement, condition: Value) -> Statement {
    let Value::Object(map) = condition else {
        panic!("condition must be an object");
    };
    stmt.conditions = Some(map);
    stmt
}

pub fn empty_condition(mut stmt: Statement) -> Statement {
    stmt.conditions = Some(Map::new());
    stmt
}

pub fn policy(statements: Vec<Statement>) -> PolicyDocument {
    PolicyDocument {
        version: Some(POLICY_VERSION_2012.to_string()),
        statements,
        defects: Vec::new(),
    }
}

pub fn config_without(rule_ids: &[&str]) -> EffectiveConfig {
    let mut cfg = EffectiveConfig::default();
    for id in rule_ids {
        cfg.rules.insert(id.to_string(), RulePolicy::disabled());
    }
    cfg
}

pub fn config_with_allow(rule_id: &str, allow: &[&str]) -> EffectiveConfig {
    let mut cfg = EffectiveConfig::default();
    cfg.rules.insert(
        rule_id.to_string(),
        RulePolicy {
            enabled: true,
            allow: PatternSet::new(allow.iter().copied()).expect("valid globs"),
        },
    );
    cfg
}

/// Findings of one rule after a full engine run.
pub fn findings_for(rule_id: &str, doc: &PolicyDocument, cfg: &EffectiveConfig) -> Vec<Finding> {
    validate_with(doc, cfg)
        .findings
        .into_iter()
        .filter(|f| f.rule_id == rule_id)
        .collect()
}
