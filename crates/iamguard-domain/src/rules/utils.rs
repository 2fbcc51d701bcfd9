use crate::fingerprint::fingerprint_for_finding;
use crate::model::{Statement, StringSet};
use crate::policy::PatternSet;
use iamguard_types::{Finding, Severity};
use serde_json::Value;

/// A finding before it is attached to a position.
pub struct Draft {
    pub severity: Severity,
    pub rule_id: &'static str,
    pub code: &'static str,
    pub message: String,
    pub recommendation: String,
    pub data: Value,
}

impl Draft {
    pub fn at_statement(self, stmt: &Statement, salient: &[&str]) -> Finding {
        let fingerprint = fingerprint_for_finding(
            self.rule_id,
            self.code,
            Some(stmt.index),
            stmt.sid.as_deref(),
            salient,
        );
        self.into_finding(Some(stmt), fingerprint)
    }

    pub fn at_document(self, salient: &[&str]) -> Finding {
        let fingerprint = fingerprint_for_finding(self.rule_id, self.code, None, None, salient);
        self.into_finding(None, fingerprint)
    }

    fn into_finding(self, stmt: Option<&Statement>, fingerprint: String) -> Finding {
        Finding {
            severity: self.severity,
            rule_id: self.rule_id.to_string(),
            code: self.code.to_string(),
            statement: stmt.map(Statement::reference),
            message: self.message,
            recommendation: self.recommendation,
            fingerprint: Some(fingerprint),
            data: self.data,
        }
    }
}

/// Entries of `set` the allow-list does not cover, in set order.
pub fn not_allowed<'a>(set: &'a StringSet, allow: &PatternSet) -> Vec<&'a str> {
    set.iter()
        .map(String::as_str)
        .filter(|v| !allow.is_match(v))
        .collect()
}

/// `"a", "b"` style list for messages.
pub fn quoted_list(values: &[&str]) -> String {
    values
        .iter()
        .map(|v| format!("\"{v}\""))
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn sid_allowed(stmt: &Statement, allow: &PatternSet) -> bool {
    stmt.sid.as_deref().is_some_and(|sid| allow.is_match(sid))
}
