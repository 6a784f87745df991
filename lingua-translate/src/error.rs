//! Error types for lingua-translate.

use thiserror::Error;

/// All errors a translation call can produce.
///
/// None of these are run-fatal: the synchronizer converts them into tagged
/// placeholder values and continues with the remaining keys.
#[derive(Debug, Error)]
pub enum TranslateError {
    /// Transport-level failure: connection refused, DNS, timeout.
    #[error("translation transport error: {0}")]
    Transport(#[source] Box<ureq::Error>),

    /// The service answered with a non-success HTTP status.
    #[error("translation service returned HTTP {code}: {body}")]
    Status { code: u16, body: String },

    /// The response body did not have the expected shape.
    #[error("malformed translation response: {0}")]
    Malformed(String),

    /// The service returned an empty completion.
    #[error("translation service returned an empty completion")]
    Empty,
}
