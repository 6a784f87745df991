//! `lingua diff` — show the delta a sync would translate. No writes.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use lingua_sync::{pipeline, GitRevisionStore};

use crate::config;

/// Arguments for `lingua diff`.
#[derive(Args, Debug)]
pub struct DiffArgs {
    /// Project root containing lingua.yaml.
    #[arg(long, default_value = ".")]
    pub root: PathBuf,
}

impl DiffArgs {
    pub fn run(self) -> Result<()> {
        let project = config::load_project(&self.root)?;
        let store = GitRevisionStore::new(&self.root);

        let source_path = self.root.join(&project.source);
        let state_path = self.root.join(&project.state_path);
        let delta = pipeline::compute_delta(&source_path, &state_path, &store)
            .context("failed to compute delta")?;

        if delta.is_empty() {
            println!("{} no source changes since the last sync", "✓".green());
            return Ok(());
        }

        println!("{} changed source key(s):", delta.len());
        for (key, value) in &delta {
            println!("  {} {} = {:?}", "+".yellow(), key.bold(), value);
        }
        Ok(())
    }
}
