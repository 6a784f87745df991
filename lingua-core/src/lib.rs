//! Lingua core library — document model, locale types, errors.
//!
//! Public API surface:
//! - [`document`] — flatten / unflatten / path accessors over YAML trees
//! - [`emit`] — stable YAML emitter with forced double-quoted strings
//! - [`types`] — locale descriptors
//! - [`error`] — [`DocumentError`]

pub mod document;
pub mod emit;
pub mod error;
pub mod types;

pub use document::{flatten, parse_document, unflatten, FlatMap};
pub use emit::to_yaml_string;
pub use error::DocumentError;
pub use types::{Locale, LocaleCode};
