use super::utils::{Draft, sid_allowed};
use super::{Rule, RuleContext};
use crate::model::Statement;
use iamguard_types::{Finding, Severity, ids};
use serde_json::Value;

pub struct DenyBroad;

impl Rule for DenyBroad {
    fn id(&self) -> &'static str {
        ids::RULE_DENY_BROAD
    }

    fn check_statement(&self, stmt: &Statement, ctx: &RuleContext<'_>, out: &mut Vec<Finding>) {
        if !stmt.is_deny() || !stmt.grants_all_actions() || !stmt.grants_all_resources() {
            return;
        }
        if sid_allowed(stmt, &ctx.policy.allow) {
            return;
        }

        let message = if stmt.has_condition() {
            "statement denies every action on every resource when its Condition holds".to_string()
        } else {
            "statement denies every action on every resource".to_string()
        };

        out.push(
            Draft {
                severity: Severity::Low,
                rule_id: ids::RULE_DENY_BROAD,
                code: ids::CODE_BROAD_DENY,
                message,
                recommendation:
                    "Verify the denial is intended; guardrails usually carry a Condition or a narrower Action list."
                        .to_string(),
                data: Value::Null,
            }
            .at_statement(stmt, &[]),
        );
    }
}
