//! Reactive input cells.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};

use super::computation::{ComputationId, ComputationInner, Reactor, ReactorInner, Scope, Source};

struct InputShared<T> {
    value: RefCell<T>,
    subscribers: RefCell<BTreeMap<ComputationId, Weak<ComputationInner>>>,
    reactor: Weak<ReactorInner>,
}

impl<T> Source for InputShared<T> {
    fn unsubscribe(&self, id: ComputationId) {
        self.subscribers.borrow_mut().remove(&id);
    }
}

/// A reactive cell. Reading through a [`Scope`] subscribes the current
/// computation; [`Input::set`] re-runs all live subscribers.
///
/// Clones share the same cell.
pub struct Input<T> {
    shared: Rc<InputShared<T>>,
}

impl<T> Clone for Input<T> {
    fn clone(&self) -> Self {
        Input {
            shared: self.shared.clone(),
        }
    }
}

impl<T: Clone + 'static> Input<T> {
    pub fn new(reactor: &Reactor, value: T) -> Self {
        Input {
            shared: Rc::new(InputShared {
                value: RefCell::new(value),
                subscribers: RefCell::new(BTreeMap::new()),
                reactor: Rc::downgrade(&reactor.inner),
            }),
        }
    }

    /// Tracked read: the computation behind `scope` re-runs when this input
    /// is next written.
    pub fn get(&self, scope: &mut Scope) -> T {
        self.shared
            .subscribers
            .borrow_mut()
            .insert(scope.comp.id, Rc::downgrade(&scope.comp));
        scope.track(self.shared.clone());
        self.shared.value.borrow().clone()
    }

    /// Untracked read.
    pub fn peek(&self) -> T {
        self.shared.value.borrow().clone()
    }

    /// Replace the value, mark every subscriber dirty, and flush. Writes
    /// issued while a flush is active only mark dirty; the active flush
    /// picks them up.
    pub fn set(&self, value: T) {
        *self.shared.value.borrow_mut() = value;
        let subscribers: Vec<Weak<ComputationInner>> =
            self.shared.subscribers.borrow().values().cloned().collect();
        let Some(reactor) = self.shared.reactor.upgrade() else {
            return;
        };
        for weak in subscribers {
            if let Some(comp) = weak.upgrade() {
                reactor.mark_dirty(&comp);
            }
        }
        reactor.flush();
    }

    /// Update in place through `mutate`, then notify as [`Input::set`] does.
    pub fn update(&self, mutate: impl FnOnce(&mut T)) {
        let mut next = self.shared.value.borrow().clone();
        mutate(&mut next);
        self.set(next);
    }
}
