#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum RenderableSeverity {
    High,
    Medium,
    Low,
    Info,
}

impl RenderableSeverity {
    /// Rendering order: worst first.
    pub const ALL: [RenderableSeverity; 4] = [
        RenderableSeverity::High,
        RenderableSeverity::Medium,
        RenderableSeverity::Low,
        RenderableSeverity::Info,
    ];

    pub fn label(self) -> &'static str {
        match self {
            RenderableSeverity::High => "High",
            RenderableSeverity::Medium => "Medium",
            RenderableSeverity::Low => "Low",
            RenderableSeverity::Info => "Info",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            RenderableSeverity::High => "🔴",
            RenderableSeverity::Medium => "🟠",
            RenderableSeverity::Low => "🟡",
            RenderableSeverity::Info => "🔵",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableStatement {
    pub index: usize,
    pub sid: Option<String>,
}

impl RenderableStatement {
    pub fn describe(&self) -> String {
        match &self.sid {
            Some(sid) => format!("statement {} (Sid \"{}\")", self.index, sid),
            None => format!("statement {}", self.index),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableFinding {
    pub severity: RenderableSeverity,
    pub rule_id: String,
    pub code: String,
    /// `None` for findings about the document as a whole.
    pub statement: Option<RenderableStatement>,
    pub message: String,
    pub recommendation: String,
}

impl RenderableFinding {
    pub fn position(&self) -> String {
        self.statement
            .as_ref()
            .map_or_else(|| "document".to_string(), RenderableStatement::describe)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderableCounts {
    pub high: u32,
    pub medium: u32,
    pub low: u32,
    pub info: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableReport {
    pub passed: bool,
    pub source: Option<String>,
    pub profile: String,
    pub statement_count: u32,
    pub counts: RenderableCounts,
    pub findings: Vec<RenderableFinding>,
}

impl RenderableReport {
    pub fn verdict(&self) -> &'static str {
        if self.passed { "PASS" } else { "FAIL" }
    }

    /// Findings of one severity, in report order.
    pub fn with_severity(
        &self,
        severity: RenderableSeverity,
    ) -> impl Iterator<Item = &RenderableFinding> {
        self.findings.iter().filter(move |f| f.severity == severity)
    }
}
