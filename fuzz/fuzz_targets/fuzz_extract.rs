//! Fuzz target for pulling a policy out of free text.
//!
//! Goal: extraction should **never panic**, and whatever it returns must parse as JSON.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_extract
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data)
        && let Some(policy) = iamguard_app::extract_policy_from_text(text)
    {
        assert!(serde_json::from_str::<serde_json::Value>(&policy).is_ok());
    }
});
