//! The rule registry.
//!
//! Every rule sees one statement at a time (plus an optional whole-document pass) and emits
//! zero or more findings. Rules never read each other's output, so the registry order alone
//! decides the order of findings within a statement.

use crate::model::{PolicyDocument, Statement};
use crate::policy::{EffectiveConfig, RulePolicy};
use iamguard_types::Finding;

mod condition_absent;
mod deny_broad;
mod negated;
mod sensitive_action;
mod structure;
mod unscoped_resource;
pub(crate) mod utils;
mod wildcard_action;
mod wildcard_resource;

#[cfg(test)]
mod tests;

/// What a rule may consult while it runs.
#[derive(Clone, Copy, Debug)]
pub struct RuleContext<'a> {
    pub config: &'a EffectiveConfig,
    /// This rule's own settings. Only enabled rules are ever run.
    pub policy: &'a RulePolicy,
}

pub trait Rule: Send + Sync {
    /// Stable dotted identifier, one of `iamguard_types::ids::RULE_*`.
    fn id(&self) -> &'static str;

    /// Findings about the document as a whole. Most rules have none.
    fn check_document(&self, _doc: &PolicyDocument, _ctx: &RuleContext<'_>, _out: &mut Vec<Finding>) {
    }

    fn check_statement(&self, stmt: &Statement, ctx: &RuleContext<'_>, out: &mut Vec<Finding>);
}

/// All rules, in evaluation order.
pub const RULES: &[&dyn Rule] = &[
    &wildcard_action::WildcardAction,
    &wildcard_resource::WildcardResource,
    &unscoped_resource::UnscopedResource,
    &structure::Structure,
    &condition_absent::ConditionAbsent,
    &deny_broad::DenyBroad,
    &negated::Negated,
    &sensitive_action::SensitiveAction,
];

/// Run every enabled rule over `doc`: the document pass first, then each statement in order.
pub fn run_all(doc: &PolicyDocument, cfg: &EffectiveConfig, out: &mut Vec<Finding>) {
    let active: Vec<(&dyn Rule, RuleContext<'_>)> = RULES
        .iter()
        .filter_map(|rule| {
            cfg.rule_policy(rule.id()).map(|policy| {
                (
                    *rule,
                    RuleContext {
                        config: cfg,
                        policy,
                    },
                )
            })
        })
        .collect();

    for (rule, ctx) in &active {
        rule.check_document(doc, ctx, out);
    }

    for stmt in &doc.statements {
        for (rule, ctx) in &active {
            rule.check_statement(stmt, ctx, out);
        }
    }
}
