use super::utils::{Draft, quoted_list};
use super::{Rule, RuleContext};
use crate::model::{Statement, has_wildcard};
use iamguard_types::{Finding, Severity, ids};
use serde_json::json;

pub struct ConditionAbsent;

impl Rule for ConditionAbsent {
    fn id(&self) -> &'static str {
        ids::RULE_CONDITIONS_ABSENT
    }

    fn check_statement(&self, stmt: &Statement, ctx: &RuleContext<'_>, out: &mut Vec<Finding>) {
        if !stmt.is_allow() || stmt.has_condition() {
            return;
        }

        let broad: Vec<&str> = stmt
            .actions
            .iter()
            .map(String::as_str)
            .filter(|a| has_wildcard(a) || ctx.config.condition_advised.is_match(a))
            .filter(|a| !ctx.policy.allow.is_match(a))
            .collect();
        let negated = stmt.not_actions.is_some();
        if broad.is_empty() && !negated {
            return;
        }

        let message = if broad.is_empty() {
            "statement allows everything outside its NotAction list without a Condition block"
                .to_string()
        } else {
            format!(
                "broad grant of {} has no Condition block",
                quoted_list(&broad)
            )
        };

        out.push(
            Draft {
                severity: Severity::Info,
                rule_id: ids::RULE_CONDITIONS_ABSENT,
                code: ids::CODE_CONDITION_ADVISED,
                message,
                recommendation:
                    "Consider a Condition such as aws:SourceIp or aws:MultiFactorAuthPresent to limit when this grant applies."
                        .to_string(),
                data: json!({ "actions": broad }),
            }
            .at_statement(stmt, &broad),
        );
    }
}
