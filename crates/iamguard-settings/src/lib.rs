//! Config parsing and profile/preset resolution.
//!
//! This crate is intentionally IO-free: it parses and resolves configuration provided as strings.

#![forbid(unsafe_code)]

mod model;
mod presets;
mod resolve;

pub use model::{IamguardConfigV1, RuleConfig, ScopeConfig};
pub use presets::PROFILES;
pub use resolve::{Overrides, ResolvedConfig};

/// Parse `iamguard.toml` (or equivalent) into a typed model.
pub fn parse_config_toml(input: &str) -> anyhow::Result<IamguardConfigV1> {
    let cfg: IamguardConfigV1 = toml::from_str(input)?;
    Ok(cfg)
}

/// Resolve the effective config used by the engine (profile + overrides + per-rule config).
pub fn resolve_config(
    cfg: IamguardConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    resolve::resolve_config(cfg, overrides)
}
