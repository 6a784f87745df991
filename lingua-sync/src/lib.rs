//! # lingua-sync
//!
//! Delta reconciliation between a canonical source-language document and its
//! per-locale translations.
//!
//! Call [`pipeline::run`] to process every configured locale for one source
//! revision: diff the source against the revision last synchronized,
//! translate only the delta, prune deleted keys, write only the targets that
//! actually changed, and checkpoint the processed revision.

pub mod detector;
pub mod error;
pub mod pipeline;
pub mod reconciler;
pub mod revision;
pub mod state;
pub mod synchronizer;
pub mod writer;

pub use detector::{diff, DeltaMap};
pub use error::SyncError;
pub use pipeline::{run, RunReport, SyncRequest};
pub use revision::{GitRevisionStore, RevisionStore};
pub use synchronizer::{LocaleSyncResult, SyncOutcome};
