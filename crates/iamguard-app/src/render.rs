//! Render use cases: JSON, Markdown and terminal text from an in-memory report.

use crate::report::{serialize_report, to_renderable};
use anyhow::Context;
use iamguard_types::IamguardReport;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Markdown,
}

pub fn render_report(report: &IamguardReport, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Text => Ok(iamguard_render::render_text(&to_renderable(report))),
        OutputFormat::Markdown => Ok(iamguard_render::render_markdown(&to_renderable(report))),
        OutputFormat::Json => {
            let bytes = serialize_report(report)?;
            let mut text = String::from_utf8(bytes).context("report json is utf-8")?;
            text.push('\n');
            Ok(text)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::check::{CheckInput, run_check};
    use iamguard_settings::Overrides;

    fn sample_report() -> IamguardReport {
        run_check(CheckInput {
            policy_text: r#"{"Version":"2012-10-17","Statement":[
                {"Sid":"All","Effect":"Allow","Action":"*","Resource":"*"},
                {"Effect":"Allow","Action":"s3:GetObject","Resource":"arn:aws:s3:::b/*"}
            ]}"#,
            source: Some("policy.json"),
            config_text: "",
            overrides: Overrides::default(),
        })
        .expect("run_check")
        .report
    }

    #[test]
    fn json_round_trips_through_serde() {
        let report = sample_report();
        let text = render_report(&report, OutputFormat::Json).expect("render");
        let parsed: IamguardReport = serde_json::from_str(&text).expect("parse");
        assert_eq!(parsed, report);
    }

    #[test]
    fn text_and_markdown_keep_every_high_finding() {
        let report = sample_report();
        let highs: Vec<&str> = report
            .findings
            .iter()
            .filter(|f| f.severity == iamguard_types::Severity::High)
            .map(|f| f.code.as_str())
            .collect();
        assert!(!highs.is_empty());

        let text = render_report(&report, OutputFormat::Text).expect("render");
        let md = render_report(&report, OutputFormat::Markdown).expect("render");
        assert!(text.starts_with("iamguard: FAIL policy.json"));
        assert!(md.contains("Verdict: **FAIL**"));
        for code in highs {
            assert!(text.contains(code), "text output lost {code}");
            assert!(md.contains(code), "markdown output lost {code}");
        }
        assert!(text.contains("statement 0 (Sid \"All\")"));
    }
}
