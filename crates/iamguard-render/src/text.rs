use crate::{RenderableReport, RenderableSeverity};

/// Terminal output: a one-line verdict, then findings grouped by severity.
pub fn render_text(report: &RenderableReport) -> String {
    let mut out = String::new();

    let source = report.source.as_deref().unwrap_or("<policy>");
    out.push_str(&format!(
        "iamguard: {} {} ({} statement{}, {} finding{}, profile {})\n",
        report.verdict(),
        source,
        report.statement_count,
        plural(report.statement_count as usize),
        report.findings.len(),
        plural(report.findings.len()),
        report.profile
    ));

    for severity in RenderableSeverity::ALL {
        let group: Vec<_> = report.with_severity(severity).collect();
        if group.is_empty() {
            continue;
        }
        out.push_str(&format!(
            "\n{} {}\n",
            severity.icon(),
            severity.label().to_uppercase()
        ));
        for f in group {
            out.push_str(&format!(
                "  {}: {} [{}/{}]\n",
                f.position(),
                f.message,
                f.rule_id,
                f.code
            ));
            out.push_str(&format!("      fix: {}\n", f.recommendation));
        }
    }

    out
}

fn plural(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}
