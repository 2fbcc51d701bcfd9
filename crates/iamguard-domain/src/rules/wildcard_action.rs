use super::utils::{Draft, not_allowed, quoted_list};
use super::{Rule, RuleContext};
use crate::model::{Statement, has_wildcard};
use iamguard_types::{Finding, Severity, ids};
use serde_json::json;

pub struct WildcardAction;

impl Rule for WildcardAction {
    fn id(&self) -> &'static str {
        ids::RULE_ACTIONS_WILDCARD
    }

    fn check_statement(&self, stmt: &Statement, ctx: &RuleContext<'_>, out: &mut Vec<Finding>) {
        if !stmt.is_allow() {
            return;
        }

        let mut offending: Vec<&str> = Vec::new();
        let mut worst: Option<(Severity, &'static str, &str)> = None;
        for action in not_allowed(&stmt.actions, &ctx.policy.allow) {
            let Some((severity, code)) = classify(action) else {
                continue;
            };
            offending.push(action);
            if worst.is_none_or(|(s, _, _)| severity > s) {
                worst = Some((severity, code, action));
            }
        }

        let Some((severity, code, action)) = worst else {
            return;
        };

        let (message, recommendation) = match code {
            ids::CODE_BARE_WILDCARD_ACTION => (
                format!("statement allows every action via \"{action}\""),
                "Replace the wildcard with the specific actions this principal needs.".to_string(),
            ),
            ids::CODE_SERVICE_WILDCARD_ACTION => (
                format!("statement allows every action of a service via \"{action}\""),
                "Enumerate the service actions that are actually required.".to_string(),
            ),
            _ => (
                format!("statement uses wildcard actions: {}", quoted_list(&offending)),
                "Prefer explicit action names so new API operations are not granted implicitly."
                    .to_string(),
            ),
        };

        out.push(
            Draft {
                severity,
                rule_id: ids::RULE_ACTIONS_WILDCARD,
                code,
                message,
                recommendation,
                data: json!({ "actions": offending }),
            }
            .at_statement(stmt, &offending),
        );
    }
}

/// Severity of a single action pattern, or `None` when it names one action.
fn classify(action: &str) -> Option<(Severity, &'static str)> {
    if !has_wildcard(action) {
        return None;
    }
    match action.split_once(':') {
        Some((service, name)) if !has_wildcard(service) => {
            if name == "*" {
                Some((Severity::Medium, ids::CODE_SERVICE_WILDCARD_ACTION))
            } else {
                Some((Severity::Low, ids::CODE_PARTIAL_WILDCARD_ACTION))
            }
        }
        // "*", "*:*", "s3*", "*:Get*": the wildcard reaches across services.
        _ => Some((Severity::High, ids::CODE_BARE_WILDCARD_ACTION)),
    }
}
