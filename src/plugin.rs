//! Mount surface.
//!
//! [`SeoPlugin::mount`] is the one-time setup the hosting router performs:
//! seed the default title, declare the Open Graph namespace prefix, and build
//! the composed lifecycle hook. The router then calls
//! [`SeoPlugin::after_action`] whenever a navigation settles and
//! [`SeoPlugin::on_stop`] when a navigation context is discarded.

use std::cell::RefCell;
use std::rc::Rc;

use crate::config::SeoDefaults;
use crate::context::{NavContext, RouteState};
use crate::guard::{once_guard, ready_gate, Hook};
use crate::orchestrator::run_hook;
use crate::reactive::Reactor;
use crate::sink::{MetaSink, OG_PREFIX};
use crate::value::{ComputedTitle, EvalScope, FieldValue, ResolvedField, TitleValue};

/// Options consumed once at mount time.
#[derive(Debug, Clone, Default)]
pub struct MountOptions {
    pub defaults: SeoDefaults,
    /// Apply only on these route names.
    pub only: Option<Vec<String>>,
    /// Never apply on these route names.
    pub except: Vec<String>,
}

/// Include/exclude filter over route identifiers.
#[derive(Debug, Clone, Default)]
pub struct RouteFilter {
    only: Option<Vec<String>>,
    except: Vec<String>,
}

impl RouteFilter {
    pub fn new(only: Option<Vec<String>>, except: Vec<String>) -> Self {
        RouteFilter { only, except }
    }

    pub fn allows(&self, route_name: &str) -> bool {
        if let Some(only) = &self.only {
            if !only.iter().any(|name| name == route_name) {
                return false;
            }
        }
        !self.except.iter().any(|name| name == route_name)
    }
}

fn static_text(value: &FieldValue) -> Option<String> {
    match value {
        FieldValue::Static(ResolvedField::Text(text)) if !text.is_empty() => Some(text.clone()),
        _ => None,
    }
}

/// Evaluate a computed default title once, against a throwaway context that
/// tracks nothing. A closure that errors or yields another closure seeds no
/// title.
fn resolve_default_title(f: &ComputedTitle) -> Option<String> {
    let reactor = Reactor::new();
    let ctx = NavContext::new(&reactor, RouteState::default());
    let f = f.clone();
    let out: Rc<RefCell<Option<TitleValue>>> = Rc::new(RefCell::new(None));
    let out2 = out.clone();
    let computation = reactor.run(move |scope| {
        let mut eval = EvalScope::new(&ctx, scope);
        *out2.borrow_mut() = Some(f(&mut eval)?);
        Ok(())
    });
    computation.stop();
    let resolved = out.borrow_mut().take()?;
    match resolved {
        TitleValue::Text(text) if !text.is_empty() => Some(text),
        TitleValue::Structured(parts) => static_text(&parts.text),
        _ => None,
    }
}

/// The text of a default title, for seeding the sink before any route
/// applies. Computed defaults are resolved once at mount time.
fn static_default_title(title: Option<&TitleValue>) -> Option<String> {
    match title? {
        TitleValue::Text(text) if !text.is_empty() => Some(text.clone()),
        TitleValue::Text(_) => None,
        TitleValue::Structured(parts) => static_text(&parts.text),
        TitleValue::Computed(f) => resolve_default_title(f),
        TitleValue::Raw(_) => None,
    }
}

/// Mounted metadata synchronization plugin.
pub struct SeoPlugin {
    filter: RouteFilter,
    hook: Hook,
}

impl SeoPlugin {
    pub fn mount(options: MountOptions, sink: Rc<dyn MetaSink>) -> Self {
        let defaults = Rc::new(options.defaults);

        // One-time bootstrap: Open Graph `property` attributes only resolve
        // under the declared RDF prefix.
        sink.declare_prefix(OG_PREFIX);
        if let Some(title) = static_default_title(defaults.descriptor.title.as_ref()) {
            sink.set_var("title", &title);
        }

        let run = run_hook(defaults.clone(), sink);
        // Skipping the once check trades idempotent header application for
        // correctness when the path changes under an unchanged route.
        let hook = if defaults.skip_once_check {
            ready_gate(run)
        } else {
            ready_gate(once_guard(run))
        };
        SeoPlugin {
            filter: RouteFilter::new(options.only, options.except),
            hook,
        }
    }

    /// Navigation-settled callback. No-op when the current route name is
    /// filtered out or the context is not ready yet.
    pub fn after_action(&self, ctx: &Rc<NavContext>) {
        if !self.filter.allows(&ctx.route().peek().name) {
            return;
        }
        (self.hook)(ctx);
    }

    /// Context-teardown callback: stop every computation the context owns.
    pub fn on_stop(&self, ctx: &Rc<NavContext>) {
        ctx.registry().clear();
    }
}
