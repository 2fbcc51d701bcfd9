use crate::{RenderableReport, RenderableSeverity};

pub fn render_markdown(report: &RenderableReport) -> String {
    let mut out = String::new();

    out.push_str("# iamguard report\n\n");
    out.push_str(&format!("- Verdict: **{}**\n", report.verdict()));
    if let Some(source) = &report.source {
        out.push_str(&format!("- Source: `{}`\n", source));
    }
    out.push_str(&format!(
        "- Profile: `{}`\n- Statements: {}\n- Findings: {} high, {} medium, {} low, {} info\n\n",
        report.profile,
        report.statement_count,
        report.counts.high,
        report.counts.medium,
        report.counts.low,
        report.counts.info
    ));

    if report.findings.is_empty() {
        out.push_str("No findings.\n");
        return out;
    }

    for severity in RenderableSeverity::ALL {
        let group: Vec<_> = report.with_severity(severity).collect();
        if group.is_empty() {
            continue;
        }
        out.push_str(&format!(
            "## {} {} ({})\n\n",
            severity.icon(),
            severity.label(),
            group.len()
        ));
        for f in group {
            out.push_str(&format!(
                "- `{}` / `{}` ({}): {}\n",
                f.rule_id,
                f.code,
                f.position(),
                f.message
            ));
            out.push_str(&format!("  - fix: {}\n", f.recommendation));
        }
        out.push('\n');
    }

    out
}
