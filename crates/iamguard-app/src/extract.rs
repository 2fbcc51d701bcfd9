//! Locate a policy document inside free text or a saved policy file.

use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

static FENCED_JSON: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)```json\s*([\s\S]*?)```").expect("fenced block pattern is valid")
});

static VERSION_OBJECT_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\{\s*"Version""#).expect("object start pattern is valid"));

/// Find a policy document in `text`.
///
/// Looks at fenced ```` ```json ```` blocks first and returns the first one that parses. Failing
/// that, returns the first `{"Version": ...}` object that parses and has a `Statement` key.
/// The returned string is the exact matched source text.
pub fn extract_policy_from_text(text: &str) -> Option<String> {
    for caps in FENCED_JSON.captures_iter(text) {
        let body = caps.get(1).map_or("", |m| m.as_str()).trim();
        if serde_json::from_str::<Value>(body).is_ok() {
            return Some(body.to_string());
        }
    }

    for start in VERSION_OBJECT_START.find_iter(text) {
        let rest = &text[start.start()..];
        let mut stream = serde_json::Deserializer::from_str(rest).into_iter::<Value>();
        if let Some(Ok(value)) = stream.next()
            && value.get("Statement").is_some()
        {
            return Some(rest[..stream.byte_offset()].to_string());
        }
    }

    None
}

/// The inner policy of a saved `{"metadata": {...}, "policy": {...}}` file.
///
/// Returns `None` for anything else, including plain policy documents.
pub fn unwrap_saved_policy(value: &Value) -> Option<&Value> {
    let obj = value.as_object()?;
    if obj.contains_key("Statement") {
        return None;
    }
    obj.get("policy").filter(|p| p.is_object())
}
