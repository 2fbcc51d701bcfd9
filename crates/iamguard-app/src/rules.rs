//! The `rules` use case: list every rule and the codes it can emit.

use iamguard_types::explain::{all_codes, all_rule_ids, lookup_explanation};

/// One line per rule (`id  title`), in evaluation order, followed by the known codes.
pub fn format_rule_list() -> String {
    let mut out = String::new();

    out.push_str("Rules (evaluation order):\n");
    let width = all_rule_ids().iter().map(|id| id.len()).max().unwrap_or(0);
    for id in all_rule_ids() {
        let title = lookup_explanation(id).map_or("", |e| e.title);
        out.push_str(&format!("  {id:<width$}  {title}\n"));
    }

    out.push_str("\nCodes:\n");
    for code in all_codes() {
        out.push_str(&format!("  {code}\n"));
    }

    out
}
