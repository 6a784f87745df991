//! # lingua-translate
//!
//! The translation capability behind lingua's synchronizer.
//!
//! [`Translator`] is the injection seam: the sync core only ever sees the
//! trait, so tests run against scripted fakes and production runs against
//! [`LlmTranslator`], an OpenAI-compatible chat-completions client.
//!
//! A failed translation never aborts a run. The synchronizer substitutes the
//! tagged placeholder from [`failure_placeholder`], which embeds the original
//! text so a reviewer can spot it in the output document and force a retry by
//! touching the source value.

pub mod error;
pub mod llm;

pub use error::TranslateError;
pub use llm::{LlmConfig, LlmTranslator};

/// Marker prefixed to values whose translation failed.
pub const FAILURE_MARKER: &str = "[[TRANSLATION FAILED]]";

/// A capability that translates one text into one target language.
///
/// `language` is the human-readable language name (e.g. `"French"`), not a
/// language code — translation backends respond better to names.
pub trait Translator {
    fn translate(&self, text: &str, language: &str) -> Result<String, TranslateError>;
}

/// Build the tagged placeholder substituted for a failed translation.
pub fn failure_placeholder(source_text: &str) -> String {
    format!("{FAILURE_MARKER} {source_text}")
}

/// Whether a stored value is a failure placeholder from an earlier run.
pub fn is_failure_placeholder(text: &str) -> bool {
    text.starts_with(FAILURE_MARKER)
}
