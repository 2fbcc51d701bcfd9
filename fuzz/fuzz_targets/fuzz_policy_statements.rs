//! Structure-aware fuzz target: well-formed documents with arbitrary actions and resources.
//!
//! Exercises the wildcard and ARN classification paths far more often than raw bytes would.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_policy_statements
//! ```

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use serde_json::{Value, json};

#[derive(Arbitrary, Debug)]
struct FuzzStatement {
    sid: Option<String>,
    allow: bool,
    negate_actions: bool,
    actions: Vec<String>,
    resources: Vec<String>,
    with_condition: bool,
}

fn to_json(stmt: &FuzzStatement) -> Value {
    let mut obj = serde_json::Map::new();
    if let Some(sid) = &stmt.sid {
        obj.insert("Sid".into(), json!(sid));
    }
    obj.insert("Effect".into(), json!(if stmt.allow { "Allow" } else { "Deny" }));
    let action_key = if stmt.negate_actions { "NotAction" } else { "Action" };
    obj.insert(action_key.into(), json!(stmt.actions));
    obj.insert("Resource".into(), json!(stmt.resources));
    if stmt.with_condition {
        obj.insert(
            "Condition".into(),
            json!({"Bool": {"aws:MultiFactorAuthPresent": "true"}}),
        );
    }
    Value::Object(obj)
}

fuzz_target!(|statements: Vec<FuzzStatement>| {
    let doc = json!({
        "Version": "2012-10-17",
        "Statement": statements.iter().map(to_json).collect::<Vec<_>>(),
    });

    let first = iamguard_domain::validate_value(&doc).expect("document is an object");
    let second = iamguard_domain::validate_value(&doc).expect("document is an object");
    assert_eq!(first, second);
});
