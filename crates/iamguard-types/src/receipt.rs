use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;
use time::OffsetDateTime;

/// Stable schema identifier for iamguard reports.
pub const SCHEMA_REPORT_V1: &str = "iamguard.report.v1";

/// Finding severity, ordered so that the worst case is the maximum.
///
/// `High` and `Medium` block a policy; `Low` and `Info` are advisory.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Low,
    Medium,
    High,
}

impl Severity {
    /// All severities, worst first.
    pub const ALL: [Severity; 4] = [
        Severity::High,
        Severity::Medium,
        Severity::Low,
        Severity::Info,
    ];

    pub fn is_blocking(self) -> bool {
        self >= Severity::Medium
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Points at the statement a finding is about.
///
/// Document-level findings carry no reference at all.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct StatementRef {
    /// Zero-based position in the `Statement` array.
    pub index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sid: Option<String>,
}

impl fmt::Display for StatementRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.sid {
            Some(sid) => write!(f, "statement {} (Sid \"{}\")", self.index, sid),
            None => write!(f, "statement {}", self.index),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Finding {
    pub severity: Severity,
    pub rule_id: String,
    pub code: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub statement: Option<StatementRef>,

    pub message: String,
    pub recommendation: String,

    /// Stable identifier intended for dedup and diffing across runs. A hash of:
    /// `rule_id + code + statement position + salient fields`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<String>,

    /// Rule-specific structured payload (kept open-ended for forward compatibility).
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub data: JsonValue,
}

impl Finding {
    /// Position used for report ordering: document-level findings sort first.
    pub fn statement_index(&self) -> Option<usize> {
        self.statement.as_ref().map(|s| s.index)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SeverityCounts {
    pub high: u32,
    pub medium: u32,
    pub low: u32,
    pub info: u32,
}

impl SeverityCounts {
    pub fn from_findings(findings: &[Finding]) -> Self {
        let mut counts = SeverityCounts::default();
        for f in findings {
            match f.severity {
                Severity::High => counts.high = counts.high.saturating_add(1),
                Severity::Medium => counts.medium = counts.medium.saturating_add(1),
                Severity::Low => counts.low = counts.low.saturating_add(1),
                Severity::Info => counts.info = counts.info.saturating_add(1),
            }
        }
        counts
    }

    pub fn get(&self, severity: Severity) -> u32 {
        match severity {
            Severity::High => self.high,
            Severity::Medium => self.medium,
            Severity::Low => self.low,
            Severity::Info => self.info,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ToolMeta {
    pub name: String,
    pub version: String,
}

/// iamguard-specific summary payload for the report.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Default)]
pub struct IamguardData {
    pub profile: String,
    pub statement_count: u32,
    pub findings_total: u32,
    pub counts: SeverityCounts,
}

/// The JSON report written by `iamguard check`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ReportEnvelope<TData = IamguardData> {
    /// Versioned schema identifier for the envelope shape.
    pub schema: String,
    pub tool: ToolMeta,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub started_at: OffsetDateTime,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub finished_at: OffsetDateTime,
    /// Where the policy came from (file path or `-` for stdin).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    pub passed: bool,
    pub findings: Vec<Finding>,
    pub data: TData,
}

pub type IamguardReport = ReportEnvelope<IamguardData>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_orders_worst_last() {
        assert!(Severity::High > Severity::Medium);
        assert!(Severity::Medium > Severity::Low);
        assert!(Severity::Low > Severity::Info);
        assert_eq!(
            [Severity::Low, Severity::High, Severity::Info]
                .into_iter()
                .max(),
            Some(Severity::High)
        );
    }

    #[test]
    fn only_high_and_medium_block() {
        assert!(Severity::High.is_blocking());
        assert!(Severity::Medium.is_blocking());
        assert!(!Severity::Low.is_blocking());
        assert!(!Severity::Info.is_blocking());
    }

    #[test]
    fn finding_serializes_without_empty_fields() {
        let finding = Finding {
            severity: Severity::Low,
            rule_id: "deny.broad".to_string(),
            code: "broad_deny".to_string(),
            statement: None,
            message: "m".to_string(),
            recommendation: "r".to_string(),
            fingerprint: None,
            data: JsonValue::Null,
        };
        let json = serde_json::to_value(&finding).expect("serialize");
        assert_eq!(json["severity"], "low");
        assert!(json.get("statement").is_none());
        assert!(json.get("fingerprint").is_none());
        assert!(json.get("data").is_none());
    }

    #[test]
    fn statement_ref_display_includes_sid() {
        let r = StatementRef {
            index: 2,
            sid: Some("ReadLogs".to_string()),
        };
        assert_eq!(r.to_string(), "statement 2 (Sid \"ReadLogs\")");
        let r = StatementRef {
            index: 0,
            sid: None,
        };
        assert_eq!(r.to_string(), "statement 0");
    }
}
