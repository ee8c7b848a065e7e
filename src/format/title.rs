//! Page title formatting.
//!
//! The title writes through three places: the document title variable (with
//! the suffix/separator policy applied) and the Twitter and Open Graph
//! `title` fields, which receive the bare text without suffix.

use tracing::warn;

use crate::sink::MetaSink;
use crate::value::{EvalScope, FieldValue, TitleValue};

use super::TagFormatter;

/// Middle dot, the default separator between title text and suffix.
pub const DEFAULT_SEPARATOR: &str = "·";

/// Mount-level title policy.
#[derive(Debug, Clone, Default)]
pub struct TitlePolicy {
    pub suffix: Option<String>,
    pub separator: Option<String>,
    pub no_log_empty_title: bool,
}

/// Resolve `title` and write it through the sink. A computed title is
/// evaluated once; a structured title resolves its text and suffix parts,
/// the suffix falling back to the policy default. A title that does not
/// resolve to text is skipped with a warning (silently when
/// `no_log_empty_title` is set).
pub fn apply_title(
    eval: &mut EvalScope,
    sink: &dyn MetaSink,
    title: &TitleValue,
    policy: &TitlePolicy,
) -> anyhow::Result<()> {
    let title = match title {
        TitleValue::Computed(f) => f(eval)?,
        other => other.clone(),
    };
    let (text_value, suffix_override) = match title {
        TitleValue::Text(text) => (FieldValue::text(text), None),
        TitleValue::Structured(parts) => (parts.text, parts.suffix),
        TitleValue::Raw(found) => {
            if !policy.no_log_empty_title {
                warn!(found = %found, "title must resolve to a string; skipping");
            }
            return Ok(());
        }
        TitleValue::Computed(_) => {
            warn!("computed title must yield text or a structured title; skipping");
            return Ok(());
        }
    };

    let resolved = text_value.resolve(eval)?;
    let Some(text) = resolved.as_text().map(str::to_string) else {
        if !policy.no_log_empty_title {
            warn!(found = ?resolved, "title must resolve to a string; skipping");
        }
        return Ok(());
    };

    let suffix = match suffix_override {
        Some(value) => value.resolve(eval)?.as_text().map(str::to_string),
        None => policy.suffix.clone(),
    };
    let separator = policy.separator.as_deref().unwrap_or(DEFAULT_SEPARATOR);
    let browser_title = match suffix {
        Some(suffix) if !suffix.is_empty() => format!("{text} {separator} {suffix}"),
        _ => text.clone(),
    };

    sink.set_var("title", &browser_title);
    TagFormatter::twitter().apply(eval, sink, &FieldValue::text(text.clone()), "title")?;
    TagFormatter::open_graph().apply(eval, sink, &FieldValue::text(text), "title")
}
