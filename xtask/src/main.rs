//! Developer tasks (schema generation, fixture updates, conformance).
//!
//! Keeping this separate avoids bloating the end-user CLI.

use anyhow::{Context, bail};
use iamguard_app::{CheckInput, run_check};
use iamguard_settings::Overrides;
use iamguard_test_util::summarize_report;
use schemars::schema_for;
use std::fs;
use std::path::{Path, PathBuf};

/// Get the project root (parent of xtask directory).
fn project_root() -> PathBuf {
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or(manifest_dir)
}

fn schemas_dir() -> PathBuf {
    project_root().join("schemas")
}

fn fixtures_dir() -> PathBuf {
    project_root().join("tests").join("fixtures")
}

/// Schema definition with its target filename.
struct SchemaSpec {
    filename: &'static str,
    generate: fn() -> schemars::Schema,
}

fn generate_report_schema() -> schemars::Schema {
    schema_for!(iamguard_types::IamguardReport)
}

fn generate_config_schema() -> schemars::Schema {
    schema_for!(iamguard_settings::IamguardConfigV1)
}

fn schema_specs() -> Vec<SchemaSpec> {
    vec![
        SchemaSpec {
            filename: "iamguard.report.v1.json",
            generate: generate_report_schema,
        },
        SchemaSpec {
            filename: "iamguard.config.v1.json",
            generate: generate_config_schema,
        },
    ]
}

/// Serialize a schema to pretty-printed JSON with trailing newline.
fn serialize_schema(schema: &schemars::Schema) -> anyhow::Result<String> {
    let mut json = serde_json::to_string_pretty(schema).context("Failed to serialize schema")?;
    json.push('\n');
    Ok(json)
}

/// Emit schemas to the schemas/ directory.
fn emit_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir();
    fs::create_dir_all(&dir).context("Failed to create schemas directory")?;

    for spec in schema_specs() {
        let json = serialize_schema(&(spec.generate)())?;
        let path = dir.join(spec.filename);
        fs::write(&path, &json)
            .with_context(|| format!("Failed to write schema to {}", path.display()))?;
        println!("Wrote {}", path.display());
    }

    println!("\nSchemas emitted successfully.");
    Ok(())
}

/// Fixture directories, sorted by name. Each holds a `policy.json`.
fn fixture_dirs() -> anyhow::Result<Vec<PathBuf>> {
    let dir = fixtures_dir();
    let mut dirs = Vec::new();
    for entry in fs::read_dir(&dir).with_context(|| format!("read {}", dir.display()))? {
        let path = entry?.path();
        if path.join("policy.json").is_file() {
            dirs.push(path);
        }
    }
    dirs.sort();
    Ok(dirs)
}

fn fixture_name(path: &Path) -> String {
    path.file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string()
}

/// Run `check` on one fixture the way the CLI would and return the JSON report.
fn check_fixture(path: &Path) -> anyhow::Result<serde_json::Value> {
    let policy_text = fs::read_to_string(path.join("policy.json"))
        .with_context(|| format!("read {}", path.join("policy.json").display()))?;
    let config_text = fs::read_to_string(path.join("iamguard.toml")).unwrap_or_default();

    let output = run_check(CheckInput {
        policy_text: &policy_text,
        source: Some("policy.json"),
        config_text: &config_text,
        overrides: Overrides::default(),
    })?;
    serde_json::to_value(&output.report).context("serialize report")
}

/// Rewrite every fixture's `expected.json` from the current engine output.
fn update_fixtures() -> anyhow::Result<()> {
    for path in fixture_dirs()? {
        let report = check_fixture(&path)?;
        let mut json = serde_json::to_string_pretty(&summarize_report(&report))?;
        json.push('\n');
        let expected = path.join("expected.json");
        fs::write(&expected, json)
            .with_context(|| format!("Failed to write {}", expected.display()))?;
        println!("Updated {}", fixture_name(&path));
    }
    Ok(())
}

/// Validate every fixture's report against the generated report schema and its expected summary.
fn conform() -> anyhow::Result<()> {
    let schema = serde_json::to_value(generate_report_schema()).context("schema to json")?;
    let validator = jsonschema::validator_for(&schema)
        .map_err(|e| anyhow::anyhow!("Failed to compile report schema: {}", e))?;
    println!("✓ iamguard.report.v1 schema compiles");

    let mut errors = Vec::new();
    let dirs = fixture_dirs()?;
    for path in &dirs {
        let name = fixture_name(path);
        let report = check_fixture(path).with_context(|| format!("check fixture {name}"))?;

        for error in validator.iter_errors(&report) {
            errors.push(format!("{name}: schema violation: {error}"));
        }

        let expected_path = path.join("expected.json");
        match fs::read_to_string(&expected_path) {
            Ok(text) => {
                let expected: serde_json::Value = serde_json::from_str(&text)
                    .with_context(|| format!("parse {}", expected_path.display()))?;
                if summarize_report(&report) != expected {
                    errors.push(format!("{name}: findings differ from expected.json"));
                }
            }
            Err(_) => errors.push(format!("{name}: missing expected.json")),
        }
    }

    if errors.is_empty() {
        println!("✓ {} fixtures conform", dirs.len());
        Ok(())
    } else {
        for error in &errors {
            eprintln!("  - {}", error);
        }
        eprintln!("\nRun `cargo xtask update-fixtures` if the change is intended.");
        bail!("Conformance failed with {} errors", errors.len())
    }
}

/// Validate that all rule IDs and codes have explanations.
fn explain_coverage() -> anyhow::Result<()> {
    let rule_ids = iamguard_types::explain::all_rule_ids();
    let codes = iamguard_types::explain::all_codes();

    let mut errors = Vec::new();
    for (kind, id) in rule_ids
        .iter()
        .map(|id| ("Rule ID", id))
        .chain(codes.iter().map(|code| ("Code", code)))
    {
        match iamguard_types::explain::lookup_explanation(id) {
            Some(exp) => {
                for (field, value) in [
                    ("title", exp.title),
                    ("description", exp.description),
                    ("remediation", exp.remediation),
                ] {
                    if value.is_empty() {
                        errors.push(format!("{kind} '{id}' has empty {field}"));
                    }
                }
            }
            None => errors.push(format!("{kind} '{id}' has no explanation")),
        }
    }

    if errors.is_empty() {
        println!("✓ {} rule IDs have explanations", rule_ids.len());
        println!("✓ {} codes have explanations", codes.len());
        Ok(())
    } else {
        for error in &errors {
            eprintln!("  - {}", error);
        }
        bail!(
            "Explain coverage validation failed with {} errors",
            errors.len()
        )
    }
}

fn print_help() {
    eprintln!("xtask commands:");
    eprintln!("  help              Show this message");
    eprintln!("  emit-schemas      Generate JSON schemas from Rust types to schemas/");
    eprintln!("  update-fixtures   Rewrite tests/fixtures/*/expected.json from current output");
    eprintln!("  conform           Check fixture reports against the schema and expected.json");
    eprintln!("  explain-coverage  Validate all rule IDs and codes have explanations");
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let cmd = args.get(1).map(|s| s.as_str()).unwrap_or("help");

    match cmd {
        "help" | "--help" | "-h" => {
            print_help();
            Ok(())
        }
        "emit-schemas" => emit_schemas(),
        "update-fixtures" => update_fixtures(),
        "conform" => conform(),
        "explain-coverage" => explain_coverage(),
        other => bail!("unknown xtask command: {other}\n\nRun `cargo xtask help` for usage."),
    }
    .context("xtask failed")
}
