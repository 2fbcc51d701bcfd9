//! JSON -> [`PolicyDocument`] with grammar problems recorded as defects.

use crate::error::PolicyError;
use crate::model::{
    DocumentDefect, Effect, PolicyDocument, Statement, StatementDefect, StringSet, json_type_name,
};
use iamguard_types::ids::POLICY_VERSION_2012;
use serde_json::{Map, Value};

const DOCUMENT_KEYS: &[&str] = &["Version", "Id", "Statement"];

const STATEMENT_KEYS: &[&str] = &[
    "Sid",
    "Effect",
    "Principal",
    "NotPrincipal",
    "Action",
    "NotAction",
    "Resource",
    "NotResource",
    "Condition",
];

/// Parse a policy document.
///
/// Fails only when `value` is not a JSON object.
pub fn parse_policy(value: &Value) -> Result<PolicyDocument, PolicyError> {
    let Value::Object(obj) = value else {
        return Err(PolicyError::NotAnObject {
            found: json_type_name(value),
        });
    };

    let mut doc = PolicyDocument::default();

    match obj.get("Version") {
        None => doc.defects.push(DocumentDefect::MissingVersion),
        Some(Value::String(v)) if v == POLICY_VERSION_2012 => doc.version = Some(v.clone()),
        Some(Value::String(v)) => {
            doc.version = Some(v.clone());
            doc.defects
                .push(DocumentDefect::UnsupportedVersion(Value::String(v.clone()).to_string()));
        }
        Some(other) => doc
            .defects
            .push(DocumentDefect::UnsupportedVersion(other.to_string())),
    }

    for key in obj.keys() {
        if !DOCUMENT_KEYS.contains(&key.as_str()) {
            doc.defects.push(DocumentDefect::UnknownKey {
                key: key.clone(),
                suggestion: suggest_key(key, DOCUMENT_KEYS),
            });
        }
    }

    match obj.get("Statement") {
        None => doc.defects.push(DocumentDefect::MissingStatement),
        Some(single @ Value::Object(_)) => {
            // A single statement may be given without the surrounding array.
            doc.statements.push(parse_statement(0, single));
        }
        Some(Value::Array(entries)) => {
            if entries.is_empty() {
                doc.defects.push(DocumentDefect::NoStatements);
            }
            doc.statements = entries
                .iter()
                .enumerate()
                .map(|(index, entry)| parse_statement(index, entry))
                .collect();
        }
        Some(other) => doc.defects.push(DocumentDefect::InvalidStatementContainer {
            found: json_type_name(other),
        }),
    }

    Ok(doc)
}

fn parse_statement(index: usize, value: &Value) -> Statement {
    let mut stmt = Statement {
        index,
        ..Statement::default()
    };

    let Value::Object(obj) = value else {
        stmt.defects.push(StatementDefect::NotAnObject {
            found: json_type_name(value),
        });
        return stmt;
    };

    match obj.get("Sid") {
        None => {}
        Some(Value::String(sid)) => stmt.sid = Some(sid.clone()),
        Some(other) => stmt.defects.push(StatementDefect::InvalidFieldType {
            key: "Sid",
            expected: "a string",
            found: json_type_name(other),
        }),
    }

    match obj.get("Effect") {
        None => stmt.defects.push(StatementDefect::MissingEffect),
        Some(Value::String(effect)) => match Effect::parse(effect) {
            Some(e) => stmt.effect = Some(e),
            None => stmt
                .defects
                .push(StatementDefect::InvalidEffect(Value::String(effect.clone()).to_string())),
        },
        Some(other) => stmt
            .defects
            .push(StatementDefect::InvalidEffect(other.to_string())),
    }

    stmt.has_principal = obj.contains_key("Principal") || obj.contains_key("NotPrincipal");
    if obj.contains_key("Principal") && obj.contains_key("NotPrincipal") {
        stmt.defects.push(StatementDefect::ConflictingKeys {
            first: "Principal",
            second: "NotPrincipal",
        });
    }

    let actions = string_set_field(obj, "Action", &mut stmt.defects);
    let not_actions = string_set_field(obj, "NotAction", &mut stmt.defects);
    match (&actions, &not_actions) {
        (Some(_), Some(_)) => stmt.defects.push(StatementDefect::ConflictingKeys {
            first: "Action",
            second: "NotAction",
        }),
        (Some(a), None) if a.is_empty() => stmt.defects.push(StatementDefect::MissingAction),
        (None, Some(n)) if n.is_empty() => stmt.defects.push(StatementDefect::MissingAction),
        (None, None) => stmt.defects.push(StatementDefect::MissingAction),
        _ => {}
    }
    stmt.actions = actions.unwrap_or_default();
    stmt.not_actions = not_actions;

    let resources = string_set_field(obj, "Resource", &mut stmt.defects);
    let not_resources = string_set_field(obj, "NotResource", &mut stmt.defects);
    match (&resources, &not_resources) {
        (Some(_), Some(_)) => stmt.defects.push(StatementDefect::ConflictingKeys {
            first: "Resource",
            second: "NotResource",
        }),
        (Some(r), None) if r.is_empty() => stmt.defects.push(StatementDefect::MissingResource),
        (None, Some(n)) if n.is_empty() => stmt.defects.push(StatementDefect::MissingResource),
        (None, None) => stmt.defects.push(StatementDefect::MissingResource),
        _ => {}
    }
    stmt.resources = resources.unwrap_or_default();
    stmt.not_resources = not_resources;

    match obj.get("Condition") {
        None => {}
        Some(Value::Object(conditions)) => stmt.conditions = Some(conditions.clone()),
        Some(other) => stmt.defects.push(StatementDefect::InvalidFieldType {
            key: "Condition",
            expected: "an object",
            found: json_type_name(other),
        }),
    }

    for key in obj.keys() {
        if !STATEMENT_KEYS.contains(&key.as_str()) {
            stmt.defects.push(StatementDefect::UnknownKey {
                key: key.clone(),
                suggestion: suggest_key(key, STATEMENT_KEYS),
            });
        }
    }

    stmt
}

/// Read a string-or-list field. `None` means the key is absent.
///
/// Entries that are not non-empty strings are dropped and reported once per field.
fn string_set_field(
    obj: &Map<String, Value>,
    key: &'static str,
    defects: &mut Vec<StatementDefect>,
) -> Option<StringSet> {
    let value = obj.get(key)?;
    let mut set = StringSet::new();
    let mut bad: Option<&'static str> = None;

    match value {
        Value::String(s) if !s.is_empty() => {
            set.insert(s.clone());
        }
        Value::Array(items) => {
            for item in items {
                match item {
                    Value::String(s) if !s.is_empty() => {
                        set.insert(s.clone());
                    }
                    other => {
                        bad.get_or_insert(json_type_name(other));
                    }
                }
            }
        }
        other => bad = Some(json_type_name(other)),
    }

    if let Some(found) = bad {
        defects.push(StatementDefect::InvalidFieldType {
            key,
            expected: "a non-empty string or a list of non-empty strings",
            found,
        });
    }

    Some(set)
}

/// Keys are case-sensitive; point at the intended spelling when only the case is off.
fn suggest_key(key: &str, known: &[&'static str]) -> Option<&'static str> {
    known.iter().copied().find(|k| k.eq_ignore_ascii_case(key))
}
