//! CLI entry point for iamguard.
//!
//! This module is intentionally thin: it handles argument parsing, I/O, and exit codes.
//! All business logic lives in the `iamguard-app` crate.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use iamguard_app::{
    CheckInput, ExplainOutput, OutputFormat, extract_policy_from_text, format_explanation,
    format_not_found, format_rule_list, render_report, run_check, run_explain, serialize_report,
    verdict_exit_code,
};
use iamguard_settings::Overrides;
use log::{LevelFilter, debug};
use std::io::Read;

#[derive(Parser, Debug)]
#[command(
    name = "iamguard",
    version,
    about = "Least-privilege linter for AWS IAM policy documents"
)]
struct Cli {
    /// Path to iamguard config TOML (a missing file means defaults).
    #[arg(long, default_value = "iamguard.toml")]
    config: Utf8PathBuf,

    /// Override profile (default|strict|quiet).
    #[arg(long)]
    profile: Option<String>,

    /// Increase log verbosity (-v info, -vv debug). RUST_LOG takes precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate a policy document and print the findings.
    Check {
        /// Policy JSON file, or `-` for stdin.
        policy: Utf8PathBuf,

        /// Output format for stdout.
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,

        /// Also write the JSON report to this path.
        #[arg(long)]
        report_out: Option<Utf8PathBuf>,
    },

    /// Explain a rule_id or code with remediation guidance.
    Explain {
        /// The rule_id (e.g., "actions.wildcard") or code (e.g., "duplicate_sid") to explain.
        identifier: String,
    },

    /// Pull a policy document out of free text (e.g. a chat reply) and print it.
    Extract {
        /// Text file to search; reads stdin when omitted.
        file: Option<Utf8PathBuf>,
    },

    /// List rule ids and finding codes.
    Rules,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Text,
    Json,
    Markdown,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Text => OutputFormat::Text,
            Format::Json => OutputFormat::Json,
            Format::Markdown => OutputFormat::Markdown,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match &cli.cmd {
        Commands::Check {
            policy,
            format,
            report_out,
        } => cmd_check(&cli, policy, *format, report_out.as_deref()),
        Commands::Explain { identifier } => cmd_explain(identifier),
        Commands::Extract { file } => cmd_extract(file.as_deref()),
        Commands::Rules => {
            print!("{}", format_rule_list());
            Ok(0)
        }
    };

    match result {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("iamguard error: {err:#}");
            std::process::exit(1);
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

fn cmd_check(
    cli: &Cli,
    policy: &Utf8Path,
    format: Format,
    report_out: Option<&Utf8Path>,
) -> anyhow::Result<i32> {
    let policy_text = read_input(Some(policy)).context("read policy")?;

    // Load config if present; missing file is allowed (defaults apply).
    let config_text = match std::fs::read_to_string(&cli.config) {
        Ok(text) => text,
        Err(err) => {
            debug!("no config loaded from {}: {err}", cli.config);
            String::new()
        }
    };

    let output = run_check(CheckInput {
        policy_text: &policy_text,
        source: Some(policy.as_str()),
        config_text: &config_text,
        overrides: Overrides {
            profile: cli.profile.clone(),
        },
    })?;

    print!("{}", render_report(&output.report, format.into())?);

    if let Some(path) = report_out {
        let data = serialize_report(&output.report)?;
        write_file(path, &data).context("write report json")?;
    }

    Ok(verdict_exit_code(output.report.passed))
}

fn cmd_explain(identifier: &str) -> anyhow::Result<i32> {
    match run_explain(identifier) {
        ExplainOutput::Found(exp) => {
            print!("{}", format_explanation(&exp));
            Ok(0)
        }
        ExplainOutput::NotFound {
            identifier,
            available_rule_ids,
            available_codes,
        } => {
            eprint!(
                "{}",
                format_not_found(&identifier, available_rule_ids, available_codes)
            );
            Ok(1)
        }
    }
}

fn cmd_extract(file: Option<&Utf8Path>) -> anyhow::Result<i32> {
    let text = read_input(file).context("read text")?;
    match extract_policy_from_text(&text) {
        Some(policy) => {
            println!("{policy}");
            Ok(0)
        }
        None => {
            eprintln!("iamguard: no policy document found in input");
            Ok(1)
        }
    }
}

/// Read a file, or stdin for `None` and `-`.
fn read_input(path: Option<&Utf8Path>) -> anyhow::Result<String> {
    match path {
        Some(path) if path.as_str() != "-" => {
            std::fs::read_to_string(path).with_context(|| format!("read file: {}", path))
        }
        _ => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("read stdin")?;
            Ok(text)
        }
    }
}

fn write_file(path: &Utf8Path, data: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_str().is_empty()
    {
        std::fs::create_dir_all(parent).with_context(|| format!("create directory: {}", parent))?;
    }
    std::fs::write(path, data).with_context(|| format!("write file: {}", path))?;
    Ok(())
}
