//! Per-context tracking of active computations.

use std::cell::RefCell;

use super::computation::Computation;

/// Records the computations started for one navigation context so they can be
/// torn down together when the context stops.
///
/// One registry per context instance; registries are never shared across
/// contexts.
#[derive(Default)]
pub struct ComputationRegistry {
    computations: RefCell<Vec<Computation>>,
}

impl ComputationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, computation: Computation) {
        self.computations.borrow_mut().push(computation);
    }

    pub fn len(&self) -> usize {
        self.computations.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.computations.borrow().is_empty()
    }

    /// Stop every recorded computation and forget the handles. No-op when
    /// empty; safe to call repeatedly.
    pub fn clear(&self) {
        for computation in self.computations.borrow_mut().drain(..) {
            computation.stop();
        }
    }
}
