//! Metadata field values and their resolution.
//!
//! A field in a metadata descriptor is either a literal or a computed value.
//! Computed values run against an [`EvalScope`], which exposes the navigation
//! context and lets the closure subscribe to reactive inputs, so a field that
//! reads application state re-resolves when that state changes.

use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use serde_json::Value;

use crate::context::{NavContext, RouteState};
use crate::reactive::{Input, Scope};

/// Evaluation scope handed to computed fields: the owning navigation context
/// plus the dependency tracker of the computation currently running.
pub struct EvalScope<'a> {
    ctx: &'a NavContext,
    tracker: &'a mut Scope,
}

impl<'a> EvalScope<'a> {
    pub fn new(ctx: &'a NavContext, tracker: &'a mut Scope) -> Self {
        EvalScope { ctx, tracker }
    }

    /// Untracked snapshot of the current route. The orchestrator's
    /// computation already tracks the route input itself.
    pub fn route(&self) -> RouteState {
        self.ctx.route().peek()
    }

    /// Tracked read of a reactive input: the surrounding metadata computation
    /// re-runs when the input is next written.
    pub fn watch<T: Clone + 'static>(&mut self, input: &Input<T>) -> T {
        input.get(self.tracker)
    }
}

/// A field value resolved to a concrete shape.
///
/// `Raw` carries values that arrived through untyped configuration; only
/// string and string-array shapes are usable downstream, anything else is
/// rejected by the formatters.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedField {
    Text(String),
    List(Vec<String>),
    Raw(Value),
}

impl ResolvedField {
    pub fn is_empty(&self) -> bool {
        match self {
            ResolvedField::Text(text) => text.is_empty(),
            ResolvedField::List(items) => items.is_empty(),
            ResolvedField::Raw(value) => value.is_null(),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ResolvedField::Text(text) => Some(text),
            _ => None,
        }
    }
}

pub type ComputedField = Rc<dyn Fn(&mut EvalScope) -> anyhow::Result<ResolvedField>>;

/// A descriptor field: a literal, or a closure evaluated once per run.
#[derive(Clone)]
pub enum FieldValue {
    Static(ResolvedField),
    Computed(ComputedField),
}

impl FieldValue {
    pub fn computed(
        f: impl Fn(&mut EvalScope) -> anyhow::Result<ResolvedField> + 'static,
    ) -> Self {
        FieldValue::Computed(Rc::new(f))
    }

    pub fn text(text: impl Into<String>) -> Self {
        FieldValue::Static(ResolvedField::Text(text.into()))
    }

    /// Classify an untyped configuration value. Strings and all-string arrays
    /// become usable literals; everything else stays raw for the formatters
    /// to reject.
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::String(text) => FieldValue::Static(ResolvedField::Text(text)),
            Value::Array(items) => {
                let mut texts = Vec::with_capacity(items.len());
                for item in &items {
                    match item {
                        Value::String(text) => texts.push(text.clone()),
                        _ => {
                            texts.clear();
                            break;
                        }
                    }
                }
                if texts.len() == items.len() {
                    FieldValue::Static(ResolvedField::List(texts))
                } else {
                    FieldValue::Static(ResolvedField::Raw(Value::Array(items)))
                }
            }
            other => FieldValue::Static(ResolvedField::Raw(other)),
        }
    }

    /// Whether the value counts as absent for inheritance purposes.
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Static(resolved) => resolved.is_empty(),
            FieldValue::Computed(_) => false,
        }
    }

    /// Produce the concrete value. Errors raised by a computed closure are
    /// not caught here; the orchestrator owns the failure boundary.
    pub fn resolve(&self, eval: &mut EvalScope) -> anyhow::Result<ResolvedField> {
        match self {
            FieldValue::Static(resolved) => Ok(resolved.clone()),
            FieldValue::Computed(f) => f(eval),
        }
    }
}

impl fmt::Debug for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Static(resolved) => f.debug_tuple("Static").field(resolved).finish(),
            FieldValue::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(text: &str) -> Self {
        FieldValue::text(text)
    }
}

impl From<String> for FieldValue {
    fn from(text: String) -> Self {
        FieldValue::text(text)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(items: Vec<String>) -> Self {
        FieldValue::Static(ResolvedField::List(items))
    }
}

impl From<Vec<&str>> for FieldValue {
    fn from(items: Vec<&str>) -> Self {
        FieldValue::Static(ResolvedField::List(
            items.into_iter().map(String::from).collect(),
        ))
    }
}

/// Structured title: text plus an optional per-route suffix override.
#[derive(Debug, Clone)]
pub struct TitleParts {
    pub text: FieldValue,
    pub suffix: Option<FieldValue>,
}

pub type ComputedTitle = Rc<dyn Fn(&mut EvalScope) -> anyhow::Result<TitleValue>>;

/// The page title field: plain text, a closure, or structured text + suffix.
#[derive(Clone)]
pub enum TitleValue {
    Text(String),
    Computed(ComputedTitle),
    Structured(TitleParts),
    Raw(Value),
}

impl TitleValue {
    pub fn computed(f: impl Fn(&mut EvalScope) -> anyhow::Result<TitleValue> + 'static) -> Self {
        TitleValue::Computed(Rc::new(f))
    }

    pub fn from_json(value: Value) -> Self {
        match value {
            Value::String(text) => TitleValue::Text(text),
            Value::Object(mut fields) => match fields.remove("text") {
                Some(text) => TitleValue::Structured(TitleParts {
                    text: FieldValue::from_json(text),
                    suffix: fields.remove("suffix").map(FieldValue::from_json),
                }),
                None => TitleValue::Raw(Value::Object(fields)),
            },
            other => TitleValue::Raw(other),
        }
    }
}

impl fmt::Debug for TitleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TitleValue::Text(text) => f.debug_tuple("Text").field(text).finish(),
            TitleValue::Computed(_) => f.write_str("Computed(..)"),
            TitleValue::Structured(parts) => f.debug_tuple("Structured").field(parts).finish(),
            TitleValue::Raw(value) => f.debug_tuple("Raw").field(value).finish(),
        }
    }
}

impl From<&str> for TitleValue {
    fn from(text: &str) -> Self {
        TitleValue::Text(text.to_string())
    }
}

impl From<String> for TitleValue {
    fn from(text: String) -> Self {
        TitleValue::Text(text)
    }
}

/// Ordered field-key to value mapping for one tag family (og, twitter, meta).
pub type FieldGroup = BTreeMap<String, FieldValue>;

pub type ComputedGroup = Rc<dyn Fn(&mut EvalScope) -> anyhow::Result<FieldGroup>>;

/// A whole tag group: literal fields, or a closure producing the entire group.
/// The closure form is evaluated exactly once per run; inheritance applies to
/// its result, never to the unevaluated closure.
#[derive(Clone)]
pub enum GroupValue {
    Fields(FieldGroup),
    Computed(ComputedGroup),
}

impl GroupValue {
    pub fn computed(f: impl Fn(&mut EvalScope) -> anyhow::Result<FieldGroup> + 'static) -> Self {
        GroupValue::Computed(Rc::new(f))
    }

    pub fn resolve(&self, eval: &mut EvalScope) -> anyhow::Result<FieldGroup> {
        match self {
            GroupValue::Fields(fields) => Ok(fields.clone()),
            GroupValue::Computed(f) => f(eval),
        }
    }
}

impl fmt::Debug for GroupValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupValue::Fields(fields) => f.debug_tuple("Fields").field(fields).finish(),
            GroupValue::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

impl From<FieldGroup> for GroupValue {
    fn from(fields: FieldGroup) -> Self {
        GroupValue::Fields(fields)
    }
}
