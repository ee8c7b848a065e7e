//! Per-navigation metadata orchestration.
//!
//! [`run`] starts the single reactive computation that keeps the document
//! metadata in sync with the active route. The computation re-runs on every
//! route-state write and on every invalidation of a reactive input a computed
//! field watched; it stops when the context's registry is cleared.

use std::rc::Rc;

use tracing::{debug, warn};

use crate::config::SeoDefaults;
use crate::context::NavContext;
use crate::format::{apply_title, TagFormatter, TitlePolicy};
use crate::guard::Hook;
use crate::inherit::inherit;
use crate::sink::MetaSink;
use crate::value::{EvalScope, FieldGroup, FieldValue};

fn merged(base: Option<&FieldGroup>, overlay: Option<&FieldGroup>) -> FieldGroup {
    let mut group = base.cloned().unwrap_or_default();
    if let Some(overlay) = overlay {
        for (key, value) in overlay {
            group.insert(key.clone(), value.clone());
        }
    }
    group
}

/// Start the metadata computation for `ctx` and register it with the
/// context's registry.
///
/// A malformed field only skips itself; an error from a user-supplied
/// computed field aborts the remainder of that run and surfaces through the
/// reactor, leaving the computation registered for the next invalidation.
pub fn run(ctx: &Rc<NavContext>, defaults: &Rc<SeoDefaults>, sink: &Rc<dyn MetaSink>) {
    let ctx2 = ctx.clone();
    let defaults = defaults.clone();
    let sink = sink.clone();
    let computation = ctx.reactor().run(move |scope| {
        let state = ctx2.route().get(scope);
        let seo = state.seo.clone().unwrap_or_default();
        debug!(route = %state.name, "applying route metadata");
        let mut eval = EvalScope::new(&ctx2, scope);

        match seo.title.clone().or_else(|| defaults.descriptor.title.clone()) {
            Some(title) => {
                let policy = TitlePolicy {
                    suffix: defaults.suffix.clone(),
                    separator: defaults.separator.clone(),
                    no_log_empty_title: defaults.no_log_empty_title,
                };
                apply_title(&mut eval, sink.as_ref(), &title, &policy)?;
            }
            None => {
                if !defaults.no_log_empty_title {
                    warn!(route = %state.name, "no title configured for route");
                }
            }
        }

        let mut twitter = merged(defaults.descriptor.twitter.as_ref(), seo.twitter.as_ref());
        let mut og = merged(defaults.descriptor.og.as_ref(), seo.og.as_ref());
        inherit(&mut twitter, &["image", "description"], &seo, &defaults.descriptor);
        inherit(&mut og, &["image", "description"], &seo, &defaults.descriptor);

        // The whole meta group may be one computed value; inheritance applies
        // to the result, never before evaluation.
        let mut meta = match seo.meta.clone().or_else(|| defaults.descriptor.meta.clone()) {
            Some(group) => group.resolve(&mut eval)?,
            None => FieldGroup::new(),
        };
        inherit(&mut meta, &["description"], &seo, &defaults.descriptor);

        let og_tags = TagFormatter::open_graph();
        let twitter_tags = TagFormatter::twitter();
        let meta_tags = TagFormatter::meta();
        for (key, value) in &og {
            og_tags.apply(&mut eval, sink.as_ref(), value, key)?;
        }
        for (key, value) in &twitter {
            twitter_tags.apply(&mut eval, sink.as_ref(), value, key)?;
        }
        for (key, value) in &meta {
            meta_tags.apply(&mut eval, sink.as_ref(), value, key)?;
        }

        let url = seo
            .url
            .clone()
            .unwrap_or_else(|| FieldValue::text(state.href.clone()));
        twitter_tags.apply(&mut eval, sink.as_ref(), &url, "url")?;
        og_tags.apply(&mut eval, sink.as_ref(), &url, "url")
    });
    ctx.registry().add(computation);
}

/// Hook form of [`run`] for composition with the lifecycle guards.
pub fn run_hook(defaults: Rc<SeoDefaults>, sink: Rc<dyn MetaSink>) -> Hook {
    Rc::new(move |ctx| run(ctx, &defaults, &sink))
}
