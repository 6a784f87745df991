//! Shared sync pipeline entrypoint used by the CLI.
//!
//! Run shape: load state → load current source (fatal on read/parse error) →
//! fetch the previous source via the revision store (absent or failed → empty
//! baseline) → compute the delta → synchronize each locale sequentially →
//! checkpoint the processed revision if anything changed or no prior state
//! existed. Dry runs never touch the checkpoint.

use std::path::{Path, PathBuf};

use serde_yaml::Value;

use lingua_core::document::{empty_document, flatten, parse_document};
use lingua_core::Locale;
use lingua_translate::Translator;

use crate::detector::{diff, DeltaMap};
use crate::error::{io_err, SyncError};
use crate::revision::RevisionStore;
use crate::state::{self, RunState};
use crate::synchronizer::{sync_locale, LocaleSyncResult};

/// One sync invocation's inputs. Built once by the configuration layer; the
/// core never reads ambient environment state.
#[derive(Debug, Clone)]
pub struct SyncRequest {
    /// Canonical source-language document.
    pub source_path: PathBuf,
    /// Revision identifier of the current checkout, recorded on success.
    pub current_revision: String,
    /// Translation targets, in processing order.
    pub locales: Vec<Locale>,
    /// Directory the per-locale folders live under.
    pub output_root: PathBuf,
    /// Run state checkpoint location.
    pub state_path: PathBuf,
    pub dry_run: bool,
}

impl SyncRequest {
    /// Where a locale's output document lives:
    /// `<output_root>/<folder>/<source file name>`.
    pub fn target_path(&self, locale: &Locale) -> PathBuf {
        let file_name = self
            .source_path
            .file_name()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("strings.yaml"));
        self.output_root.join(&locale.folder).join(file_name)
    }
}

/// Outcome of one full pipeline run.
#[derive(Debug)]
pub struct RunReport {
    /// Revision this run processed.
    pub revision: String,
    /// Revision the delta was computed against, if any.
    pub previous_revision: Option<String>,
    pub delta: DeltaMap,
    pub results: Vec<LocaleSyncResult>,
    /// Whether the checkpoint was written.
    pub state_written: bool,
}

impl RunReport {
    pub fn any_changed(&self) -> bool {
        self.results.iter().any(LocaleSyncResult::changed)
    }
}

/// Run the sync pipeline for every locale in the request.
pub fn run(
    request: &SyncRequest,
    translator: &dyn Translator,
    revisions: &dyn RevisionStore,
) -> Result<RunReport, SyncError> {
    let prior_state = state::load(&request.state_path);
    let previous_revision = prior_state
        .as_ref()
        .map(|s| s.last_synchronized_revision.clone());

    let source = load_source(&request.source_path)?;
    let previous = load_previous(request, previous_revision.as_deref(), revisions);
    let delta = diff(&source, &previous);
    let source_flat = flatten(&source);

    let mut results = Vec::with_capacity(request.locales.len());
    for locale in &request.locales {
        let target_path = request.target_path(locale);
        let result = sync_locale(
            locale,
            &source,
            &source_flat,
            &delta,
            &target_path,
            translator,
            request.dry_run,
        )?;
        results.push(result);
    }

    let any_changed = results.iter().any(LocaleSyncResult::changed);
    // Checkpoint when something changed, or to establish the first-run
    // baseline; a failed checkpoint write is fatal.
    let state_written = !request.dry_run && (any_changed || prior_state.is_none());
    if state_written {
        state::save(&request.state_path, &RunState::new(&request.current_revision))?;
    }

    Ok(RunReport {
        revision: request.current_revision.clone(),
        previous_revision,
        delta,
        results,
        state_written,
    })
}

/// Compute the delta the next run would translate, without writing anything.
pub fn compute_delta(
    source_path: &Path,
    state_path: &Path,
    revisions: &dyn RevisionStore,
) -> Result<DeltaMap, SyncError> {
    let prior_state = state::load(state_path);
    let source = load_source(source_path)?;
    let previous = match &prior_state {
        Some(state) => load_previous_content(
            source_path,
            &state.last_synchronized_revision,
            revisions,
        ),
        None => empty_document(),
    };
    Ok(diff(&source, &previous))
}

fn load_source(path: &Path) -> Result<Value, SyncError> {
    let contents = std::fs::read_to_string(path).map_err(|e| io_err(path, e))?;
    let doc = parse_document(&contents, path)?;
    Ok(doc)
}

fn load_previous(
    request: &SyncRequest,
    previous_revision: Option<&str>,
    revisions: &dyn RevisionStore,
) -> Value {
    match previous_revision {
        Some(revision) => load_previous_content(&request.source_path, revision, revisions),
        None => empty_document(),
    }
}

/// Historical retrieval failures are recovered locally: no previous document
/// means every key counts as changed, which is correct and safe.
fn load_previous_content(
    source_path: &Path,
    revision: &str,
    revisions: &dyn RevisionStore,
) -> Value {
    let contents = match revisions.content_at(source_path, revision) {
        Ok(Some(contents)) => contents,
        Ok(None) => {
            tracing::warn!("source absent at revision {revision}; using empty baseline");
            return empty_document();
        }
        Err(err) => {
            tracing::warn!("could not retrieve revision {revision}: {err}; using empty baseline");
            return empty_document();
        }
    };
    match parse_document(&contents, source_path) {
        Ok(doc) => doc,
        Err(err) => {
            tracing::warn!("previous snapshot unparsable: {err}; using empty baseline");
            empty_document()
        }
    }
}
