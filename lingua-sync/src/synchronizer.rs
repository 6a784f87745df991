//! Per-locale synchronizer — drives one locale end-to-end.
//!
//! Loads the existing target document (or starts fresh), prunes deleted keys,
//! resolves each source key under the reuse-by-equality policy, and writes
//! the document atomically only when its content actually changed.
//!
//! ## Reuse policy
//!
//! A key is sent to the translator only when its source text changed since
//! the last synchronized revision (it appears in the delta map) or when the
//! target document holds no string at its path (fresh locale, or a key that
//! went missing). Unchanged keys with a stored translation are reused without
//! a call, so a run over an untouched source makes zero translation calls.
//!
//! Empty or whitespace-only source values are never sent; they are copied
//! verbatim. A failed translation becomes a tagged placeholder embedding the
//! original text, and processing continues with the remaining keys.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde_yaml::Value;

use lingua_core::document::{empty_document, get_path, opaque_leaves, parse_document, set_path};
use lingua_core::{to_yaml_string, FlatMap, Locale};
use lingua_translate::{failure_placeholder, is_failure_placeholder, Translator};

use crate::detector::DeltaMap;
use crate::error::SyncError;
use crate::reconciler::reconcile;
use crate::writer::atomic_write;

/// Outcome of synchronizing one locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The target document changed and was written.
    Written,
    /// Nothing changed; no write was made.
    Unchanged,
    /// Dry-run mode: the target document *would* have been written.
    WouldWrite,
}

/// Summary of one locale's synchronization.
#[derive(Debug, Clone)]
pub struct LocaleSyncResult {
    pub locale: Locale,
    pub path: PathBuf,
    pub outcome: SyncOutcome,
    /// No usable target document existed; every source key was translated.
    pub fresh: bool,
    /// Keys sent to the translation capability.
    pub translated: usize,
    /// Keys whose stored translation was reused without a call.
    pub reused: usize,
    /// Keys that received a failure placeholder.
    pub placeholders: usize,
    /// Whether stale keys were pruned from the target.
    pub removed: bool,
}

impl LocaleSyncResult {
    pub fn changed(&self) -> bool {
        matches!(self.outcome, SyncOutcome::Written | SyncOutcome::WouldWrite)
    }
}

/// Synchronize one locale against the current source document.
///
/// `source_flat` is the flattened current source; `delta` is the change
/// detector's output against the previously synchronized revision.
pub fn sync_locale(
    locale: &Locale,
    source: &Value,
    source_flat: &FlatMap,
    delta: &DeltaMap,
    target_path: &Path,
    translator: &dyn Translator,
    dry_run: bool,
) -> Result<LocaleSyncResult, SyncError> {
    let (mut target, fresh) = load_target(target_path);

    let removed = reconcile(&mut target, source);
    let mut changed = removed;

    // Opaque passthrough leaves mirror into targets that lack them.
    for (path, value) in opaque_leaves(source) {
        if get_path(&target, &path).is_none() {
            set_path(&mut target, &path, value);
            changed = true;
        }
    }

    let mut translated = 0usize;
    let mut reused = 0usize;
    let mut placeholders = 0usize;

    for (key, source_value) in source_flat {
        let existing = get_path(&target, key)
            .and_then(Value::as_str)
            .map(str::to_owned);

        if source_value.trim().is_empty() {
            if existing.as_deref() != Some(source_value.as_str()) {
                set_path(&mut target, key, Value::String(source_value.clone()));
                changed = true;
            }
            continue;
        }

        // Reuse-by-equality: source text unchanged and a stored translation
        // exists at this path. A stored failure placeholder counts as
        // translated; it is surfaced but not retried until the source changes.
        if !delta.contains_key(key) {
            if let Some(stored) = &existing {
                if is_failure_placeholder(stored) {
                    tracing::warn!(
                        "'{key}' ({}) still carries a failure placeholder; edit the source text to retranslate",
                        locale.code
                    );
                }
                reused += 1;
                continue;
            }
        }

        let resolved = match translator.translate(source_value, &locale.name) {
            Ok(text) => {
                translated += 1;
                text
            }
            Err(err) => {
                tracing::warn!(
                    "translation failed for '{key}' ({}): {err}",
                    locale.code
                );
                placeholders += 1;
                failure_placeholder(source_value)
            }
        };

        if existing.as_deref() != Some(resolved.as_str()) {
            set_path(&mut target, key, Value::String(resolved));
            changed = true;
        }
    }

    let outcome = if !changed {
        SyncOutcome::Unchanged
    } else if dry_run {
        tracing::info!("[dry-run] would write: {}", target_path.display());
        SyncOutcome::WouldWrite
    } else {
        atomic_write(target_path, &to_yaml_string(&target))?;
        SyncOutcome::Written
    };

    Ok(LocaleSyncResult {
        locale: locale.clone(),
        path: target_path.to_path_buf(),
        outcome,
        fresh,
        translated,
        reused,
        placeholders,
        removed,
    })
}

/// Load the existing target document.
///
/// A missing file is a fresh locale. A file that cannot be read or parsed as
/// a mapping is logged and also treated as fresh — its translations cannot be
/// trusted, so the locale is retranslated in full. Never fatal: one broken
/// target must not abort the other locales.
fn load_target(path: &Path) -> (Value, bool) {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == ErrorKind::NotFound => return (empty_document(), true),
        Err(err) => {
            tracing::warn!(
                "unreadable target {}: {err}; retranslating from scratch",
                path.display()
            );
            return (empty_document(), true);
        }
    };
    match parse_document(&contents, path) {
        Ok(doc) if doc.is_mapping() => (doc, false),
        Ok(_) => {
            tracing::warn!(
                "target {} is not a key/value document; retranslating from scratch",
                path.display()
            );
            (empty_document(), true)
        }
        Err(err) => {
            tracing::warn!("unparsable target, retranslating from scratch: {err}");
            (empty_document(), true)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    use lingua_core::document::flatten;
    use lingua_core::LocaleCode;
    use lingua_translate::TranslateError;
    use tempfile::TempDir;

    use crate::detector::diff;

    /// Scripted translator: prefixes the locale code, records calls, and can
    /// be told to fail on one exact source text.
    struct FakeTranslator {
        calls: RefCell<Vec<String>>,
        fail_on: Option<String>,
    }

    impl FakeTranslator {
        fn new() -> Self {
            Self {
                calls: RefCell::new(Vec::new()),
                fail_on: None,
            }
        }

        fn failing_on(text: &str) -> Self {
            Self {
                calls: RefCell::new(Vec::new()),
                fail_on: Some(text.to_string()),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.borrow().len()
        }
    }

    impl Translator for FakeTranslator {
        fn translate(&self, text: &str, _language: &str) -> Result<String, TranslateError> {
            self.calls.borrow_mut().push(text.to_string());
            if self.fail_on.as_deref() == Some(text) {
                return Err(TranslateError::Empty);
            }
            Ok(format!("fr:{text}"))
        }
    }

    fn french() -> Locale {
        Locale {
            folder: "fr".to_string(),
            code: LocaleCode::from("fr"),
            name: "French".to_string(),
        }
    }

    fn doc(yaml: &str) -> Value {
        serde_yaml::from_str(yaml).unwrap()
    }

    fn sync(
        source_yaml: &str,
        previous_yaml: &str,
        target_path: &Path,
        translator: &dyn Translator,
    ) -> LocaleSyncResult {
        let source = doc(source_yaml);
        let previous = doc(previous_yaml);
        let source_flat = flatten(&source);
        let delta = diff(&source, &previous);
        sync_locale(
            &french(),
            &source,
            &source_flat,
            &delta,
            target_path,
            translator,
            false,
        )
        .unwrap()
    }

    #[test]
    fn fresh_locale_translates_every_string_leaf() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("fr.yaml");
        let translator = FakeTranslator::new();

        let result = sync("a:\n  b: Hello\nc: Bye\n", "{}", &path, &translator);

        assert!(result.fresh);
        assert_eq!(result.outcome, SyncOutcome::Written);
        assert_eq!(result.translated, 2);
        let written = doc(&std::fs::read_to_string(&path).unwrap());
        assert_eq!(get_path(&written, "a.b").and_then(Value::as_str), Some("fr:Hello"));
        assert_eq!(get_path(&written, "c").and_then(Value::as_str), Some("fr:Bye"));
    }

    #[test]
    fn only_changed_key_is_retranslated() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("fr.yaml");
        std::fs::write(&path, "a:\n  b: \"fr:Hello\"\nc: \"fr:Goodbye\"\n").unwrap();
        let translator = FakeTranslator::new();

        let result = sync(
            "a:\n  b: Hello\nc: Bye\n",
            "a:\n  b: Hello\nc: Goodbye\n",
            &path,
            &translator,
        );

        assert_eq!(translator.call_count(), 1);
        assert_eq!(result.translated, 1);
        assert_eq!(result.reused, 1);
        let written = doc(&std::fs::read_to_string(&path).unwrap());
        assert_eq!(get_path(&written, "a.b").and_then(Value::as_str), Some("fr:Hello"));
        assert_eq!(get_path(&written, "c").and_then(Value::as_str), Some("fr:Bye"));
    }

    #[test]
    fn unchanged_source_makes_no_calls_and_no_write() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("fr.yaml");
        std::fs::write(&path, "a: \"fr:Hello\"\n").unwrap();
        let translator = FakeTranslator::new();

        let result = sync("a: Hello\n", "a: Hello\n", &path, &translator);

        assert_eq!(translator.call_count(), 0);
        assert_eq!(result.outcome, SyncOutcome::Unchanged);
    }

    #[test]
    fn missing_key_is_backfilled_even_when_source_unchanged() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("fr.yaml");
        std::fs::write(&path, "a: \"fr:Hello\"\n").unwrap();
        let translator = FakeTranslator::new();

        let result = sync("a: Hello\nb: New\n", "a: Hello\nb: New\n", &path, &translator);

        assert_eq!(translator.call_count(), 1);
        assert_eq!(result.outcome, SyncOutcome::Written);
        let written = doc(&std::fs::read_to_string(&path).unwrap());
        assert_eq!(get_path(&written, "b").and_then(Value::as_str), Some("fr:New"));
    }

    #[test]
    fn deleted_source_key_is_pruned_and_marks_change() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("fr.yaml");
        std::fs::write(&path, "a: \"fr:Hello\"\nd: \"fr:Old\"\n").unwrap();
        let translator = FakeTranslator::new();

        let result = sync("a: Hello\n", "a: Hello\nd: Old\n", &path, &translator);

        assert!(result.removed);
        assert_eq!(result.outcome, SyncOutcome::Written);
        let written = doc(&std::fs::read_to_string(&path).unwrap());
        assert!(get_path(&written, "d").is_none());
    }

    #[test]
    fn failure_becomes_placeholder_and_siblings_still_translate() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("fr.yaml");
        let translator = FakeTranslator::failing_on("Bad");

        let result = sync("a: Good\nb: Bad\nc: Fine\n", "{}", &path, &translator);

        assert_eq!(result.translated, 2);
        assert_eq!(result.placeholders, 1);
        assert_eq!(result.outcome, SyncOutcome::Written);
        let written = doc(&std::fs::read_to_string(&path).unwrap());
        assert_eq!(get_path(&written, "a").and_then(Value::as_str), Some("fr:Good"));
        assert_eq!(
            get_path(&written, "b").and_then(Value::as_str),
            Some("[[TRANSLATION FAILED]] Bad")
        );
        assert_eq!(get_path(&written, "c").and_then(Value::as_str), Some("fr:Fine"));
    }

    #[test]
    fn empty_source_value_passes_through_untranslated() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("fr.yaml");
        let translator = FakeTranslator::new();

        let result = sync("e: \"\"\nf: Hello\n", "{}", &path, &translator);

        assert_eq!(translator.call_count(), 1, "empty value must not be sent");
        assert_eq!(result.translated, 1);
        let written = doc(&std::fs::read_to_string(&path).unwrap());
        assert_eq!(get_path(&written, "e").and_then(Value::as_str), Some(""));
    }

    #[test]
    fn opaque_leaves_mirror_into_fresh_target() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("fr.yaml");
        let translator = FakeTranslator::new();

        sync("name: App\ncount: 3\ntags:\n  - a\n  - b\n", "{}", &path, &translator);

        let written = doc(&std::fs::read_to_string(&path).unwrap());
        assert_eq!(get_path(&written, "count"), Some(&Value::from(3u64)));
        assert_eq!(
            get_path(&written, "tags"),
            Some(&doc("inner:\n  - a\n  - b\n")["inner"])
        );
    }

    #[test]
    fn unparsable_target_is_retranslated_from_scratch() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("fr.yaml");
        std::fs::write(&path, "a: [unclosed").unwrap();
        let translator = FakeTranslator::new();

        let result = sync("a: Hello\n", "a: Hello\n", &path, &translator);

        assert!(result.fresh);
        assert_eq!(translator.call_count(), 1);
        let written = doc(&std::fs::read_to_string(&path).unwrap());
        assert_eq!(get_path(&written, "a").and_then(Value::as_str), Some("fr:Hello"));
    }

    #[test]
    fn unreadable_target_degrades_to_fresh_locale() {
        let tmp = TempDir::new().unwrap();
        // A directory where the document should be makes read_to_string fail
        // with something other than NotFound.
        let path = tmp.path().join("fr.yaml");
        std::fs::create_dir(&path).unwrap();
        let translator = FakeTranslator::new();

        let source = doc("a: Hello\n");
        let result = sync_locale(
            &french(),
            &source,
            &flatten(&source),
            &diff(&source, &doc("a: Hello\n")),
            &path,
            &translator,
            true,
        )
        .unwrap();

        assert!(result.fresh, "unreadable target must be treated as fresh");
        assert_eq!(translator.call_count(), 1);
        assert_eq!(result.outcome, SyncOutcome::WouldWrite);
    }

    #[test]
    fn stored_placeholder_is_kept_until_source_changes() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("fr.yaml");
        std::fs::write(&path, "a: \"[[TRANSLATION FAILED]] Hello\"\n").unwrap();
        let translator = FakeTranslator::new();

        let result = sync("a: Hello\n", "a: Hello\n", &path, &translator);

        assert_eq!(translator.call_count(), 0, "placeholder counts as translated");
        assert_eq!(result.reused, 1);
        assert_eq!(result.outcome, SyncOutcome::Unchanged);
    }

    #[test]
    fn dry_run_reports_would_write_without_touching_disk() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("fr.yaml");
        let translator = FakeTranslator::new();

        let source = doc("a: Hello\n");
        let result = sync_locale(
            &french(),
            &source,
            &flatten(&source),
            &diff(&source, &doc("{}")),
            &path,
            &translator,
            true,
        )
        .unwrap();

        assert_eq!(result.outcome, SyncOutcome::WouldWrite);
        assert!(!path.exists(), "dry-run must not create files");
    }
}
