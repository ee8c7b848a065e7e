//! Reactive runtime.
//!
//! Explicit observable/subscription model driving metadata recomputation.
//! A [`Computation`] subscribes to the [`Input`] cells it reads during a run;
//! writing an input marks its subscribers dirty and flushes them. Scheduling
//! is two-phase (mark dirty, then apply) and single-threaded: no two runs of
//! the same computation ever overlap, and callbacks queued with
//! [`Reactor::after_flush`] run only once the current flush has settled.

pub mod computation;
pub mod input;
pub mod registry;

pub use computation::{Computation, Reactor, Scope};
pub use input::Input;
pub use registry::ComputationRegistry;
