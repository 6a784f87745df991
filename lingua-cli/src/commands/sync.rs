//! `lingua sync` — translate changed keys and write per-locale documents.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use lingua_sync::{pipeline, GitRevisionStore, LocaleSyncResult, RunReport, SyncOutcome};
use lingua_translate::LlmTranslator;

use crate::config;

/// Arguments for `lingua sync`.
#[derive(Args, Debug)]
pub struct SyncArgs {
    /// Show what would be written without calling the writer or the checkpoint.
    #[arg(long)]
    pub dry_run: bool,

    /// Revision identifier to record; defaults to the current git HEAD.
    #[arg(long)]
    pub revision: Option<String>,

    /// Project root containing lingua.yaml.
    #[arg(long, default_value = ".")]
    pub root: PathBuf,
}

impl SyncArgs {
    pub fn run(self) -> Result<()> {
        let project = config::load_project(&self.root)?;
        let llm = config::load_llm()?;
        let store = GitRevisionStore::new(&self.root);

        let revision = match self.revision {
            Some(revision) => revision,
            None => store
                .head()
                .context("cannot determine the current revision; pass --revision")?,
        };

        let request = config::sync_request(&self.root, &project, revision, self.dry_run);
        let translator = LlmTranslator::new(llm);
        let report = pipeline::run(&request, &translator, &store).context("sync failed")?;

        print_report(&report, self.dry_run);
        Ok(())
    }
}

fn print_report(report: &RunReport, dry_run: bool) {
    let prefix = if dry_run { "[dry-run] " } else { "" };

    if !report.any_changed() {
        println!(
            "{prefix}{} nothing to do — no locale needed changes at {}",
            "✓".green(),
            report.revision
        );
        return;
    }

    println!(
        "{prefix}{} synchronized {} changed source key(s) at {}",
        "✓".green(),
        report.delta.len(),
        report.revision
    );
    for result in &report.results {
        print_locale(result);
    }
    if report.state_written {
        println!("  checkpoint advanced to {}", report.revision);
    }
}

fn print_locale(result: &LocaleSyncResult) {
    let marker = match result.outcome {
        SyncOutcome::Written => "✎".yellow(),
        SyncOutcome::WouldWrite => "~".yellow(),
        SyncOutcome::Unchanged => "·".normal(),
    };
    let mut notes = vec![
        format!("{} translated", result.translated),
        format!("{} reused", result.reused),
    ];
    if result.placeholders > 0 {
        notes.push(format!("{} failed", result.placeholders).red().to_string());
    }
    if result.removed {
        notes.push("stale keys pruned".to_string());
    }
    if result.fresh {
        notes.push("new locale".to_string());
    }
    println!(
        "  {marker}  {} ({}) — {}",
        result.locale.code,
        result.path.display(),
        notes.join(", ")
    );
}
