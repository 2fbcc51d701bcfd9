use super::utils::{Draft, quoted_list};
use super::{Rule, RuleContext};
use crate::model::Statement;
use iamguard_types::{Finding, Severity, ids};
use serde_json::json;

pub struct UnscopedResource;

impl Rule for UnscopedResource {
    fn id(&self) -> &'static str {
        ids::RULE_RESOURCES_UNSCOPED
    }

    fn check_statement(&self, stmt: &Statement, ctx: &RuleContext<'_>, out: &mut Vec<Finding>) {
        if !stmt.is_allow() || !stmt.grants_all_resources() {
            return;
        }

        let unscoped: Vec<&str> = stmt
            .actions
            .iter()
            .map(String::as_str)
            .filter(|a| ctx.config.scope.requires_scope(a))
            .filter(|a| !ctx.policy.allow.is_match(a))
            .collect();
        if unscoped.is_empty() {
            return;
        }

        out.push(
            Draft {
                severity: Severity::Medium,
                rule_id: ids::RULE_RESOURCES_UNSCOPED,
                code: ids::CODE_UNSCOPED_RESOURCE,
                message: format!(
                    "{} support resource-level permissions but are granted on \"*\"",
                    quoted_list(&unscoped)
                ),
                recommendation:
                    "Replace \"*\" with the ARNs these actions should reach, or move account-wide actions to their own statement."
                        .to_string(),
                data: json!({ "actions": unscoped }),
            }
            .at_statement(stmt, &unscoped),
        );
    }
}
