//! Computations and the reactor that schedules them.

use std::cell::{Cell, RefCell};
use std::collections::{HashSet, VecDeque};
use std::rc::{Rc, Weak};

use tracing::error;

pub type ComputationId = u64;

type RunFn = Box<dyn FnMut(&mut Scope) -> anyhow::Result<()>>;
type DeferredFn = Box<dyn FnOnce()>;

/// Source a computation subscribed to during its last run. Type-erased so a
/// computation can drop stale subscriptions without knowing value types.
pub(crate) trait Source {
    fn unsubscribe(&self, id: ComputationId);
}

pub(crate) struct ComputationInner {
    pub(crate) id: ComputationId,
    /// Taken out for the duration of a run; a computation observed mid-run is
    /// never re-entered.
    body: RefCell<Option<RunFn>>,
    stopped: Cell<bool>,
    sources: RefCell<Vec<Rc<dyn Source>>>,
}

impl ComputationInner {
    fn drop_subscriptions(&self) {
        for source in self.sources.borrow_mut().drain(..) {
            source.unsubscribe(self.id);
        }
    }
}

/// Handle to one active reactive computation.
///
/// Dropping the handle does not stop the computation; call [`Computation::stop`]
/// (usually via [`super::ComputationRegistry::clear`]).
pub struct Computation {
    inner: Rc<ComputationInner>,
}

impl Computation {
    /// Prevent any further re-run and drop all subscriptions. Idempotent.
    pub fn stop(&self) {
        self.inner.stopped.set(true);
        self.inner.drop_subscriptions();
    }

    pub fn is_stopped(&self) -> bool {
        self.inner.stopped.get()
    }
}

/// Dependency-collection scope passed to a computation body. Reading an
/// [`super::Input`] through the scope subscribes the computation to it.
pub struct Scope {
    pub(crate) comp: Rc<ComputationInner>,
}

impl Scope {
    pub(crate) fn track(&mut self, source: Rc<dyn Source>) {
        self.comp.sources.borrow_mut().push(source);
    }
}

pub(crate) struct ReactorInner {
    next_id: Cell<ComputationId>,
    dirty: RefCell<VecDeque<(ComputationId, Weak<ComputationInner>)>>,
    dirty_ids: RefCell<HashSet<ComputationId>>,
    deferred: RefCell<VecDeque<DeferredFn>>,
    flushing: Cell<bool>,
}

impl ReactorInner {
    fn execute(comp: &Rc<ComputationInner>) {
        if comp.stopped.get() {
            return;
        }
        comp.drop_subscriptions();
        let body = comp.body.borrow_mut().take();
        let Some(mut run) = body else {
            return;
        };
        let mut scope = Scope { comp: comp.clone() };
        let result = run(&mut scope);
        *comp.body.borrow_mut() = Some(run);
        if let Err(err) = result {
            // The computation stays subscribed; the next invalidation of any
            // of its inputs re-runs it.
            error!(computation = comp.id, error = %err, "reactive run failed");
        }
    }

    pub(crate) fn mark_dirty(&self, comp: &Rc<ComputationInner>) {
        if comp.stopped.get() {
            return;
        }
        if self.dirty_ids.borrow_mut().insert(comp.id) {
            self.dirty
                .borrow_mut()
                .push_back((comp.id, Rc::downgrade(comp)));
        }
    }

    pub(crate) fn flush(&self) {
        if self.flushing.get() {
            return;
        }
        self.flushing.set(true);
        loop {
            let next = self.dirty.borrow_mut().pop_front();
            if let Some((id, weak)) = next {
                self.dirty_ids.borrow_mut().remove(&id);
                if let Some(comp) = weak.upgrade() {
                    Self::execute(&comp);
                }
                continue;
            }
            let deferred = self.deferred.borrow_mut().pop_front();
            if let Some(callback) = deferred {
                callback();
                continue;
            }
            break;
        }
        self.flushing.set(false);
    }
}

/// Single-threaded reactive scheduler. Cheap to clone; clones share state.
#[derive(Clone)]
pub struct Reactor {
    pub(crate) inner: Rc<ReactorInner>,
}

impl Default for Reactor {
    fn default() -> Self {
        Self::new()
    }
}

impl Reactor {
    pub fn new() -> Self {
        Reactor {
            inner: Rc::new(ReactorInner {
                next_id: Cell::new(0),
                dirty: RefCell::new(VecDeque::new()),
                dirty_ids: RefCell::new(HashSet::new()),
                deferred: RefCell::new(VecDeque::new()),
                flushing: Cell::new(false),
            }),
        }
    }

    /// Start a computation: run `body` immediately, re-run it whenever any
    /// input it read gets written. A body returning `Err` is logged and the
    /// computation stays live.
    pub fn run(
        &self,
        body: impl FnMut(&mut Scope) -> anyhow::Result<()> + 'static,
    ) -> Computation {
        let id = self.inner.next_id.get();
        self.inner.next_id.set(id + 1);
        let inner = Rc::new(ComputationInner {
            id,
            body: RefCell::new(Some(Box::new(body))),
            stopped: Cell::new(false),
            sources: RefCell::new(Vec::new()),
        });
        ReactorInner::execute(&inner);
        Computation { inner }
    }

    /// Queue `callback` to run after the current flush settles. Outside a
    /// flush it runs right away (after any pending dirty computations).
    pub fn after_flush(&self, callback: impl FnOnce() + 'static) {
        self.inner.deferred.borrow_mut().push_back(Box::new(callback));
        self.inner.flush();
    }

    /// Drain pending dirty computations and deferred callbacks. No-op when
    /// already flushing or when nothing is pending.
    pub fn flush(&self) {
        self.inner.flush();
    }
}
