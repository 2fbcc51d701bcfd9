use sha2::{Digest, Sha256};

/// Compute a stable SHA-256 fingerprint for a finding.
///
/// Identity fields:
/// - rule_id
/// - code
/// - statement index (`-` for document-level findings)
/// - statement Sid (empty when absent)
/// - salient values chosen by the rule (offending actions, resources, keys)
pub fn fingerprint_for_finding(
    rule_id: &str,
    code: &str,
    statement_index: Option<usize>,
    sid: Option<&str>,
    salient: &[&str],
) -> String {
    let index = statement_index.map_or_else(|| "-".to_string(), |i| i.to_string());
    let mut parts = vec![rule_id, code, index.as_str(), sid.unwrap_or("")];
    parts.extend_from_slice(salient);
    let canonical = parts.join("|");

    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    let digest = hasher.finalize();
    hex::encode(digest)
}
