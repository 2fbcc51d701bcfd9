use super::utils::{Draft, quoted_list};
use super::{Rule, RuleContext};
use crate::model::{Statement, has_wildcard};
use iamguard_types::{Finding, Severity, ids};
use serde_json::json;

/// Services whose ARN resource part starts directly with the resource name
/// (`arn:aws:s3:::bucket/key`) instead of a resource type (`table/Orders`).
const NAME_FIRST_SERVICES: &[&str] = &["s3", "sqs", "sns"];

pub struct WildcardResource;

impl Rule for WildcardResource {
    fn id(&self) -> &'static str {
        ids::RULE_RESOURCES_WILDCARD
    }

    fn check_statement(&self, stmt: &Statement, ctx: &RuleContext<'_>, out: &mut Vec<Finding>) {
        if !stmt.is_allow() {
            return;
        }

        let mut offending: Vec<&str> = Vec::new();
        let mut worst: Option<(Severity, &'static str, &str)> = None;
        for resource in stmt.resources.iter().map(String::as_str) {
            if ctx.policy.allow.is_match(resource) {
                continue;
            }
            let Some((severity, code)) = classify(resource) else {
                continue;
            };
            offending.push(resource);
            if worst.is_none_or(|(s, _, _)| severity > s) {
                worst = Some((severity, code, resource));
            }
        }

        let Some((severity, code, resource)) = worst else {
            return;
        };

        let (message, recommendation) = match code {
            ids::CODE_WILDCARD_RESOURCE => (
                "statement applies to every resource (\"*\")".to_string(),
                "Scope the statement to the ARNs of the resources it is meant for.".to_string(),
            ),
            ids::CODE_TRAILING_WILDCARD_ARN => (
                format!(
                    "statement uses wildcards below a named resource: {}",
                    quoted_list(&offending)
                ),
                "Acceptable when the path prefix is intended; narrow it further if possible."
                    .to_string(),
            ),
            _ => (
                format!("resource ARN \"{resource}\" matches resources of any name or location"),
                "Name the resource, region and account explicitly in the ARN.".to_string(),
            ),
        };

        out.push(
            Draft {
                severity,
                rule_id: ids::RULE_RESOURCES_WILDCARD,
                code,
                message,
                recommendation,
                data: json!({ "resources": offending }),
            }
            .at_statement(stmt, &offending),
        );
    }
}

/// Severity of a single resource pattern, or `None` when it names one resource.
///
/// Anything that does not parse as an ARN but carries a wildcard gets the stricter outcome.
fn classify(resource: &str) -> Option<(Severity, &'static str)> {
    const WIDE: Option<(Severity, &str)> = Some((Severity::Medium, ids::CODE_WILDCARD_ARN));

    if resource == "*" {
        return Some((Severity::High, ids::CODE_WILDCARD_RESOURCE));
    }
    if !has_wildcard(resource) {
        return None;
    }

    // arn:partition:service:region:account:resource
    let parts: Vec<&str> = resource.splitn(6, ':').collect();
    if parts.len() < 6 || parts[0] != "arn" {
        return WIDE;
    }
    if parts[1..5].iter().any(|p| has_wildcard(p)) {
        return WIDE;
    }

    let service = parts[2].to_ascii_lowercase();
    let segments: Vec<&str> = parts[5]
        .split(['/', ':'])
        .filter(|s| !s.is_empty())
        .collect();
    let Some(first_wild) = segments.iter().position(|s| has_wildcard(s)) else {
        return WIDE;
    };

    let name_position = if NAME_FIRST_SERVICES.contains(&service.as_str()) {
        0
    } else {
        1
    };
    if first_wild > name_position {
        Some((Severity::Low, ids::CODE_TRAILING_WILDCARD_ARN))
    } else {
        WIDE
    }
}
