//! Headsync: Reactive Document Metadata Synchronization
//!
//! Keeps a document's descriptive metadata (title, Open Graph tags, Twitter
//! card tags, generic meta tags) in sync with the active navigation state of
//! a client application: values re-resolve through an inheritance chain and
//! re-apply to the metadata sink whenever the route or a watched reactive
//! input changes.

pub mod config;
pub mod context;
pub mod error;
pub mod format;
pub mod guard;
pub mod inherit;
pub mod logging;
pub mod orchestrator;
pub mod plugin;
pub mod reactive;
pub mod sink;
pub mod value;
