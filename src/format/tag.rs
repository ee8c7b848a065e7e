//! Namespace-parameterized meta tag formatter.

use tracing::warn;

use crate::sink::{MetaEntry, MetaSink, Namespace};
use crate::value::{EvalScope, FieldValue, ResolvedField};

/// Writes one tag family: Open Graph (`property`, `og:` prefix), Twitter
/// cards (`name`, `twitter:` prefix), or generic meta (`name`, no prefix).
#[derive(Debug, Clone, Copy)]
pub struct TagFormatter {
    namespace: Namespace,
    prefix: Option<&'static str>,
}

impl TagFormatter {
    pub fn open_graph() -> Self {
        TagFormatter {
            namespace: Namespace::Property,
            prefix: Some("og"),
        }
    }

    pub fn twitter() -> Self {
        TagFormatter {
            namespace: Namespace::Name,
            prefix: Some("twitter"),
        }
    }

    pub fn meta() -> Self {
        TagFormatter {
            namespace: Namespace::Name,
            prefix: None,
        }
    }

    /// Full property name for a field key, e.g. `og:description`.
    pub fn property(&self, key: &str) -> String {
        match self.prefix {
            Some(prefix) => format!("{prefix}:{key}"),
            None => key.to_string(),
        }
    }

    /// Resolve `content` and write it under `key`. Empty content skips
    /// silently; a raw value of unusable shape logs a warning and skips;
    /// lists join with `", "`. Errors from computed fields propagate.
    pub fn apply(
        &self,
        eval: &mut EvalScope,
        sink: &dyn MetaSink,
        content: &FieldValue,
        key: &str,
    ) -> anyhow::Result<()> {
        if content.is_empty() {
            return Ok(());
        }
        let resolved = content.resolve(eval)?;
        if resolved.is_empty() {
            return Ok(());
        }
        let text = match resolved {
            ResolvedField::Text(text) => text,
            ResolvedField::List(items) => items.join(", "),
            ResolvedField::Raw(value) => {
                warn!(
                    key,
                    value = %value,
                    "content must be a string, list, or computed value; skipping tag"
                );
                return Ok(());
            }
        };
        sink.set(MetaEntry {
            namespace: self.namespace,
            property: self.property(key),
            content: text,
        });
        Ok(())
    }
}
