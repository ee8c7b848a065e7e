//! Navigation context.
//!
//! A [`NavContext`] is the owning instance for everything this system keeps
//! per mounted navigation lifecycle: the reactive route snapshot, the
//! registry of active computations, and the record of once-guarded hooks that
//! already ran. All of it is discarded together when the context goes away;
//! nothing is process-wide.

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use crate::config::SeoDescriptor;
use crate::guard::CallbackId;
use crate::reactive::{ComputationRegistry, Input, Reactor};

/// Snapshot of the active route, written by the external router.
#[derive(Debug, Clone, Default)]
pub struct RouteState {
    /// Whether the navigation target is fully resolved.
    pub ready: bool,
    /// Route identifier, matched against only/except filters.
    pub name: String,
    /// Current location, the fallback canonical url.
    pub href: String,
    /// Per-route metadata descriptor, if the route configures one.
    pub seo: Option<SeoDescriptor>,
}

/// Per-mount navigation context instance.
pub struct NavContext {
    reactor: Reactor,
    route: Input<RouteState>,
    registry: ComputationRegistry,
    ran_once: RefCell<HashSet<CallbackId>>,
}

impl NavContext {
    pub fn new(reactor: &Reactor, initial: RouteState) -> Rc<Self> {
        Rc::new(NavContext {
            reactor: reactor.clone(),
            route: Input::new(reactor, initial),
            registry: ComputationRegistry::new(),
            ran_once: RefCell::new(HashSet::new()),
        })
    }

    pub fn reactor(&self) -> &Reactor {
        &self.reactor
    }

    /// The reactive route cell. Reading it through a scope subscribes the
    /// computation to navigation changes.
    pub fn route(&self) -> &Input<RouteState> {
        &self.route
    }

    pub fn registry(&self) -> &ComputationRegistry {
        &self.registry
    }

    /// Readiness predicate of the navigation target.
    pub fn ready(&self) -> bool {
        self.route.peek().ready
    }

    /// Replace the route snapshot; subscribers re-run.
    pub fn update(&self, state: RouteState) {
        self.route.set(state);
    }

    /// Record that the once-guarded callback `id` ran on this instance.
    /// Returns true on first call for that id.
    pub(crate) fn mark_ran(&self, id: CallbackId) -> bool {
        self.ran_once.borrow_mut().insert(id)
    }
}
