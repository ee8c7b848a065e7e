//! Document metadata sink.
//!
//! The sink is the boundary between metadata resolution and whatever renders
//! the document head. Entries are keyed by (namespace, property) and
//! last-write-wins, so re-applying an identical resolution is a no-op from the
//! renderer's point of view.

use std::collections::BTreeMap;
use std::fmt;

use parking_lot::RwLock;

/// RDF namespace declaration required for `property`-namespaced Open Graph
/// tags to resolve when the document is rendered.
pub const OG_PREFIX: &str = "og: http://ogp.me/ns#";

/// Attribute namespace a meta tag is written under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Namespace {
    /// `<meta name="...">` — Twitter cards and generic meta tags.
    Name,
    /// `<meta property="...">` — Open Graph tags.
    Property,
}

impl Namespace {
    pub fn as_str(&self) -> &'static str {
        match self {
            Namespace::Name => "name",
            Namespace::Property => "property",
        }
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One applied metadata tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaEntry {
    pub namespace: Namespace,
    pub property: String,
    pub content: String,
}

/// External facility holding the document's metadata tags.
///
/// Implementations must overwrite on duplicate (namespace, property) and
/// tolerate identical re-application.
pub trait MetaSink {
    /// Write one tag, replacing any prior entry for the same property.
    fn set(&self, entry: MetaEntry);

    /// Write a named document variable (currently only `title`).
    fn set_var(&self, name: &str, value: &str);

    /// Declare the root-element namespace prefix. Applied once per sink;
    /// later calls are ignored.
    fn declare_prefix(&self, value: &str);
}

#[derive(Default)]
struct HeadState {
    entries: BTreeMap<(Namespace, String), String>,
    vars: BTreeMap<String, String>,
    prefix: Option<String>,
}

/// In-process [`MetaSink`] backed by a lock, readable by the render layer.
#[derive(Default)]
pub struct DocumentHead {
    state: RwLock<HeadState>,
}

impl DocumentHead {
    pub fn new() -> Self {
        Self::default()
    }

    /// Content of the tag at (namespace, property), if applied.
    pub fn entry(&self, namespace: Namespace, property: &str) -> Option<String> {
        self.state
            .read()
            .entries
            .get(&(namespace, property.to_string()))
            .cloned()
    }

    /// Value of a document variable such as `title`.
    pub fn var(&self, name: &str) -> Option<String> {
        self.state.read().vars.get(name).cloned()
    }

    /// The declared root-element prefix, if bootstrapped.
    pub fn prefix(&self) -> Option<String> {
        self.state.read().prefix.clone()
    }

    /// Snapshot of every applied tag, in stable order.
    pub fn entries(&self) -> Vec<MetaEntry> {
        self.state
            .read()
            .entries
            .iter()
            .map(|((namespace, property), content)| MetaEntry {
                namespace: *namespace,
                property: property.clone(),
                content: content.clone(),
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.state.read().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.read().entries.is_empty()
    }
}

impl MetaSink for DocumentHead {
    fn set(&self, entry: MetaEntry) {
        self.state
            .write()
            .entries
            .insert((entry.namespace, entry.property), entry.content);
    }

    fn set_var(&self, name: &str, value: &str) {
        self.state
            .write()
            .vars
            .insert(name.to_string(), value.to_string());
    }

    fn declare_prefix(&self, value: &str) {
        let mut state = self.state.write();
        if state.prefix.is_none() {
            state.prefix = Some(value.to_string());
        }
    }
}
