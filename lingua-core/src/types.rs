//! Domain types for lingua locale configuration.
//!
//! A [`Locale`] describes one translation target: the folder its output
//! document lives in, its language code, and the human-readable language
//! name handed to the translation capability. The locale list is ordinary
//! input data loaded from project configuration, never a baked-in constant.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A strongly-typed language code (e.g. `"fr"`, `"pt-BR"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LocaleCode(pub String);

impl fmt::Display for LocaleCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for LocaleCode {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for LocaleCode {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// One translation target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Locale {
    /// Folder identifier the output document is written under.
    pub folder: String,
    /// Language code.
    pub code: LocaleCode,
    /// Human-readable language name, as given to the translator
    /// (e.g. `"Brazilian Portuguese"`).
    pub name: String,
}
