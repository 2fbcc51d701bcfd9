use super::utils::{Draft, quoted_list};
use super::{Rule, RuleContext};
use crate::model::{Statement, has_wildcard};
use iamguard_types::{Finding, Severity, ids};
use serde_json::json;

pub struct SensitiveAction;

impl Rule for SensitiveAction {
    fn id(&self) -> &'static str {
        ids::RULE_ACTIONS_SENSITIVE
    }

    fn check_statement(&self, stmt: &Statement, ctx: &RuleContext<'_>, out: &mut Vec<Finding>) {
        if !stmt.is_allow() {
            return;
        }

        // Wildcards are reported by actions.wildcard; only named actions are listed here.
        let sensitive: Vec<&str> = stmt
            .actions
            .iter()
            .map(String::as_str)
            .filter(|a| !has_wildcard(a))
            .filter(|a| ctx.config.sensitive.is_match(a))
            .filter(|a| !ctx.policy.allow.is_match(a))
            .collect();
        if sensitive.is_empty() {
            return;
        }

        out.push(
            Draft {
                severity: Severity::Low,
                rule_id: ids::RULE_ACTIONS_SENSITIVE,
                code: ids::CODE_SENSITIVE_ACTION,
                message: format!(
                    "statement grants sensitive actions: {}",
                    quoted_list(&sensitive)
                ),
                recommendation:
                    "Confirm these actions are required and restrict them to specific resources with a Condition where possible."
                        .to_string(),
                data: json!({ "actions": sensitive }),
            }
            .at_statement(stmt, &sensitive),
        );
    }
}
