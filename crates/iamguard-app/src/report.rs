use anyhow::Context;
use iamguard_render::{
    RenderableCounts, RenderableFinding, RenderableReport, RenderableSeverity,
    RenderableStatement,
};
use iamguard_types::{Finding, IamguardReport, Severity};

pub fn serialize_report(report: &IamguardReport) -> anyhow::Result<Vec<u8>> {
    serde_json::to_vec_pretty(report).context("serialize report")
}

pub fn to_renderable(report: &IamguardReport) -> RenderableReport {
    let counts = &report.data.counts;
    RenderableReport {
        passed: report.passed,
        source: report.source.clone(),
        profile: report.data.profile.clone(),
        statement_count: report.data.statement_count,
        counts: RenderableCounts {
            high: counts.high,
            medium: counts.medium,
            low: counts.low,
            info: counts.info,
        },
        findings: report.findings.iter().map(renderable_finding).collect(),
    }
}

fn renderable_finding(f: &Finding) -> RenderableFinding {
    RenderableFinding {
        severity: match f.severity {
            Severity::High => RenderableSeverity::High,
            Severity::Medium => RenderableSeverity::Medium,
            Severity::Low => RenderableSeverity::Low,
            Severity::Info => RenderableSeverity::Info,
        },
        rule_id: f.rule_id.clone(),
        code: f.code.clone(),
        statement: f.statement.as_ref().map(|s| RenderableStatement {
            index: s.index,
            sid: s.sid.clone(),
        }),
        message: f.message.clone(),
        recommendation: f.recommendation.clone(),
    }
}
