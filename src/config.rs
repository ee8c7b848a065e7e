//! Mount configuration.
//!
//! The metadata descriptor shape shared by per-route configuration and the
//! mount-time defaults, plus a loader that reads the literal subset of the
//! defaults from a TOML or JSON file. Layering follows the usual order:
//! built-in defaults, then file values; computed fields are attached
//! programmatically after loading.

use std::collections::BTreeMap;
use std::path::Path;

use config::{Config, ConfigBuilder, ConfigError};
use serde::Deserialize;
use serde_json::Value;

use crate::error::SeoError;
use crate::format::DEFAULT_SEPARATOR;
use crate::value::{FieldGroup, FieldValue, GroupValue, TitleValue};

/// Per-route (or default) metadata descriptor.
///
/// `image` and `description` at the top level are shared fallbacks: groups
/// missing those keys inherit them before falling back to the mount defaults.
#[derive(Debug, Clone, Default)]
pub struct SeoDescriptor {
    pub title: Option<TitleValue>,
    pub meta: Option<GroupValue>,
    pub og: Option<FieldGroup>,
    pub twitter: Option<FieldGroup>,
    pub url: Option<FieldValue>,
    pub image: Option<FieldValue>,
    pub description: Option<FieldValue>,
}

impl SeoDescriptor {
    /// Shared fallback value for an inheritable key.
    pub fn shared_field(&self, key: &str) -> Option<&FieldValue> {
        match key {
            "image" => self.image.as_ref(),
            "description" => self.description.as_ref(),
            _ => None,
        }
    }
}

/// Mount-time defaults: the lowest-priority descriptor layer plus the title
/// and lifecycle policy flags.
#[derive(Debug, Clone, Default)]
pub struct SeoDefaults {
    pub descriptor: SeoDescriptor,
    /// Appended to the page title after the separator, unless the route
    /// title overrides it.
    pub suffix: Option<String>,
    /// Separator between title text and suffix. Middle dot when unset.
    pub separator: Option<String>,
    /// Re-apply headers on every settled navigation instead of once per
    /// context. Needed when the path changes without the route changing.
    pub skip_once_check: bool,
    /// Suppress the warning for routes that resolve no title.
    pub no_log_empty_title: bool,
}

/// Builder carrying the defaults layer applied under any file source.
fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError> {
    Config::builder()
        .set_default("separator", DEFAULT_SEPARATOR)?
        .set_default("skip_once_check", false)?
        .set_default("no_log_empty_title", false)
}

/// Literal on-disk shape of the defaults.
#[derive(Debug, Deserialize)]
struct RawDefaults {
    #[serde(default)]
    title: Option<Value>,
    #[serde(default)]
    meta: Option<BTreeMap<String, Value>>,
    #[serde(default)]
    og: Option<BTreeMap<String, Value>>,
    #[serde(default)]
    twitter: Option<BTreeMap<String, Value>>,
    #[serde(default)]
    url: Option<Value>,
    #[serde(default)]
    image: Option<Value>,
    #[serde(default)]
    description: Option<Value>,
    #[serde(default)]
    suffix: Option<String>,
    separator: String,
    skip_once_check: bool,
    no_log_empty_title: bool,
}

fn group_from_raw(raw: Option<BTreeMap<String, Value>>) -> Option<FieldGroup> {
    raw.map(|fields| {
        fields
            .into_iter()
            .map(|(key, value)| (key, FieldValue::from_json(value)))
            .collect()
    })
}

impl RawDefaults {
    fn into_defaults(self) -> Result<SeoDefaults, SeoError> {
        let title = match self.title {
            None => None,
            Some(value) => match TitleValue::from_json(value) {
                TitleValue::Raw(found) => {
                    return Err(SeoError::Descriptor(format!(
                        "default title must be a string or an object with a text field, got {found}"
                    )));
                }
                title => Some(title),
            },
        };
        Ok(SeoDefaults {
            descriptor: SeoDescriptor {
                title,
                meta: group_from_raw(self.meta).map(GroupValue::Fields),
                og: group_from_raw(self.og),
                twitter: group_from_raw(self.twitter),
                url: self.url.map(FieldValue::from_json),
                image: self.image.map(FieldValue::from_json),
                description: self.description.map(FieldValue::from_json),
            },
            suffix: self.suffix,
            separator: Some(self.separator),
            skip_once_check: self.skip_once_check,
            no_log_empty_title: self.no_log_empty_title,
        })
    }
}

impl SeoDefaults {
    /// Load the literal defaults from a TOML or JSON file, with built-in
    /// defaults filling anything the file leaves out.
    pub fn load_from_file(path: &Path) -> Result<Self, SeoError> {
        let settings = builder_with_defaults()?
            .add_source(config::File::from(path))
            .build()?;
        let raw: RawDefaults = settings.try_deserialize()?;
        raw.into_defaults()
    }
}
