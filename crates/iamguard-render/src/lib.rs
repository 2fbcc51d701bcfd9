//! Rendering utilities for terminals and CI surfaces (Markdown summaries, plain text).
//!
//! Renderers never drop findings: every severity, High included, is always printed.

#![forbid(unsafe_code)]

mod markdown;
mod model;
mod text;

pub use markdown::render_markdown;
pub use model::{
    RenderableCounts, RenderableFinding, RenderableReport, RenderableSeverity,
    RenderableStatement,
};
pub use text::render_text;
