use iamguard_types::StatementRef;
use serde_json::{Map, Value};
use std::collections::BTreeSet;

/// Actions and resources are sets: the order they were written in carries no meaning.
pub type StringSet = BTreeSet<String>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Effect {
    Allow,
    Deny,
}

impl Effect {
    /// IAM only accepts the exact spellings `Allow` and `Deny`.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Allow" => Some(Effect::Allow),
            "Deny" => Some(Effect::Deny),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Effect::Allow => "Allow",
            Effect::Deny => "Deny",
        }
    }
}

/// A parsed policy document.
///
/// Parsing never fails on a JSON object: anything that does not fit the grammar is recorded
/// as a defect and the rest of the document is still modelled.
#[derive(Clone, Debug, Default)]
pub struct PolicyDocument {
    pub version: Option<String>,
    pub statements: Vec<Statement>,
    /// Document-level problems, in discovery order.
    pub defects: Vec<DocumentDefect>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DocumentDefect {
    MissingVersion,
    /// `Version` present but not `2012-10-17` (value rendered as JSON).
    UnsupportedVersion(String),
    MissingStatement,
    /// `Statement` is neither an object nor an array.
    InvalidStatementContainer { found: &'static str },
    NoStatements,
    UnknownKey { key: String, suggestion: Option<&'static str> },
}

/// One entry of the `Statement` array, viewed through the IAM grammar.
#[derive(Clone, Debug, Default)]
pub struct Statement {
    pub index: usize,
    pub sid: Option<String>,
    /// `None` when `Effect` is missing or not one of the two valid values.
    pub effect: Option<Effect>,
    pub actions: StringSet,
    pub not_actions: Option<StringSet>,
    pub resources: StringSet,
    pub not_resources: Option<StringSet>,
    pub conditions: Option<Map<String, Value>>,
    pub has_principal: bool,
    /// Statement-level problems, in discovery order.
    pub defects: Vec<StatementDefect>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StatementDefect {
    NotAnObject { found: &'static str },
    MissingEffect,
    /// `Effect` present but not `Allow`/`Deny` (value rendered as JSON).
    InvalidEffect(String),
    /// Neither `Action` nor `NotAction` carries at least one action.
    MissingAction,
    /// Neither `Resource` nor `NotResource` carries at least one resource.
    MissingResource,
    ConflictingKeys { first: &'static str, second: &'static str },
    InvalidFieldType {
        key: &'static str,
        expected: &'static str,
        found: &'static str,
    },
    UnknownKey { key: String, suggestion: Option<&'static str> },
}

impl Statement {
    pub fn is_allow(&self) -> bool {
        self.effect == Some(Effect::Allow)
    }

    pub fn is_deny(&self) -> bool {
        self.effect == Some(Effect::Deny)
    }

    pub fn reference(&self) -> StatementRef {
        StatementRef {
            index: self.index,
            sid: self.sid.clone(),
        }
    }

    /// True when `Resource` contains the bare `*`.
    pub fn grants_all_resources(&self) -> bool {
        self.resources.contains("*")
    }

    /// True when `Action` contains `*` or `*:*`.
    pub fn grants_all_actions(&self) -> bool {
        self.actions.contains("*") || self.actions.contains("*:*")
    }

    /// An empty `Condition` object constrains nothing, so it counts as absent.
    pub fn has_condition(&self) -> bool {
        self.conditions.as_ref().is_some_and(|c| !c.is_empty())
    }

    pub fn uses_negation(&self) -> bool {
        self.not_actions.is_some() || self.not_resources.is_some()
    }
}

/// Human-readable JSON type name for defect messages.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Does this action or resource pattern contain an IAM wildcard character?
pub fn has_wildcard(value: &str) -> bool {
    value.contains('*') || value.contains('?')
}
