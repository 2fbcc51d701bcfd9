use iamguard_types::{Finding, Severity, SeverityCounts};
use serde::{Deserialize, Serialize};

/// The outcome of validating one policy document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Document-level findings first, then by statement index, then by rule order.
    pub findings: Vec<Finding>,
    pub statement_count: usize,
    /// True iff no finding is `High` or `Medium`.
    pub passed: bool,
}

impl ValidationReport {
    pub fn from_findings(findings: Vec<Finding>, statement_count: usize) -> Self {
        let passed = !findings.iter().any(|f| f.severity.is_blocking());
        Self {
            findings,
            statement_count,
            passed,
        }
    }

    pub fn max_severity(&self) -> Option<Severity> {
        self.findings.iter().map(|f| f.severity).max()
    }

    pub fn counts(&self) -> SeverityCounts {
        SeverityCounts::from_findings(&self.findings)
    }
}
