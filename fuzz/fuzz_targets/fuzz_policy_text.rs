//! Fuzz target for validating raw policy text.
//!
//! Goal: validation should **never panic** on any input.
//! Non-object JSON may be rejected with an error; anything else yields a report.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_policy_text
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data)
        && let Ok(report) = iamguard_domain::validate_str(text)
    {
        let blocking = report.findings.iter().any(|f| f.severity.is_blocking());
        assert_eq!(report.passed, !blocking);
    }
});
