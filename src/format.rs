//! Tag formatters.
//!
//! Formatters take a resolved field value, validate its shape, and write one
//! (namespace, property, content) triple to the metadata sink. Shape problems
//! are warnings, never errors: a bad field is skipped and its siblings still
//! apply.

pub mod tag;
pub mod title;

pub use tag::TagFormatter;
pub use title::{apply_title, TitlePolicy, DEFAULT_SEPARATOR};
