use super::utils::{Draft, quoted_list, sid_allowed};
use super::{Rule, RuleContext};
use crate::model::{Statement, StringSet};
use iamguard_types::{Finding, Severity, ids};
use serde_json::json;

/// `NotAction` / `NotResource` invert the match and are easy to get wrong, whichever the Effect.
pub struct Negated;

impl Rule for Negated {
    fn id(&self) -> &'static str {
        ids::RULE_STATEMENTS_NEGATED
    }

    fn check_statement(&self, stmt: &Statement, ctx: &RuleContext<'_>, out: &mut Vec<Finding>) {
        if sid_allowed(stmt, &ctx.policy.allow) {
            return;
        }
        let effect = stmt.effect.map_or("unknown", |e| e.as_str());

        if let Some(not_actions) = &stmt.not_actions {
            out.push(negation_finding(
                stmt,
                ids::CODE_NOT_ACTION,
                "NotAction",
                "actions",
                effect,
                not_actions,
            ));
        }
        if let Some(not_resources) = &stmt.not_resources {
            out.push(negation_finding(
                stmt,
                ids::CODE_NOT_RESOURCE,
                "NotResource",
                "resources",
                effect,
                not_resources,
            ));
        }
    }
}

fn negation_finding(
    stmt: &Statement,
    code: &'static str,
    key: &str,
    noun: &str,
    effect: &str,
    excluded: &StringSet,
) -> Finding {
    let excluded: Vec<&str> = excluded.iter().map(String::as_str).collect();
    let message = if effect == "Allow" {
        format!(
            "statement allows all {noun} except {} via {key}; manual review required",
            quoted_list(&excluded)
        )
    } else {
        format!(
            "statement ({effect}) applies to all {noun} except {} via {key}; manual review required",
            quoted_list(&excluded)
        )
    };

    Draft {
        severity: Severity::Medium,
        rule_id: ids::RULE_STATEMENTS_NEGATED,
        code,
        message,
        recommendation: format!(
            "Rewrite the statement with an explicit {} list, or confirm that everything outside the exclusion is meant to match.",
            key.trim_start_matches("Not")
        ),
        data: json!({ "effect": effect, "excluded": excluded }),
    }
    .at_statement(stmt, &excluded)
}
