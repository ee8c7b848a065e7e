//! Lifecycle hook guards.
//!
//! Two composable wrappers around navigation hooks: a ready gate that defers
//! work until the navigation target is resolved and the current reactive
//! flush has settled, and a once guard that runs its inner hook at most once
//! per context instance. The installer composes them as
//! `ready_gate(once_guard(run))`, or `ready_gate(run)` when the mount opts
//! out of the once check.

use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::context::NavContext;

/// Identity of a once-guarded callback site, allocated at wrap time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CallbackId(u64);

impl CallbackId {
    fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(0);
        CallbackId(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// A navigation lifecycle hook.
pub type Hook = Rc<dyn Fn(&Rc<NavContext>)>;

pub fn hook(f: impl Fn(&Rc<NavContext>) + 'static) -> Hook {
    Rc::new(f)
}

/// No-op while the context is not ready; otherwise schedule the inner hook
/// after the current reactive flush settles, bound to that context.
pub fn ready_gate(inner: Hook) -> Hook {
    Rc::new(move |ctx| {
        if !ctx.ready() {
            return;
        }
        let inner = inner.clone();
        let ctx = ctx.clone();
        let reactor = ctx.reactor().clone();
        reactor.after_flush(move || inner(&ctx));
    })
}

/// Run the inner hook at most once per context instance, however many times
/// the wrapper is invoked. Distinct instances are independent.
pub fn once_guard(inner: Hook) -> Hook {
    let id = CallbackId::next();
    Rc::new(move |ctx| {
        if ctx.mark_ran(id) {
            inner(ctx);
        }
    })
}
