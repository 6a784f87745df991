//! `lingua status` — show the recorded checkpoint and per-locale targets.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use lingua_sync::state;

use crate::config;

/// Arguments for `lingua status`.
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Project root containing lingua.yaml.
    #[arg(long, default_value = ".")]
    pub root: PathBuf,
}

impl StatusArgs {
    pub fn run(self) -> Result<()> {
        let project = config::load_project(&self.root)?;

        match state::load(&self.root.join(&project.state_path)) {
            Some(state) => println!(
                "last synchronized revision: {} ({})",
                state.last_synchronized_revision.bold(),
                state.synced_at
            ),
            None => println!("no checkpoint recorded yet — first run pending"),
        }

        println!("source: {}", self.root.join(&project.source).display());
        for locale in &project.locales {
            let file_name = project
                .source
                .file_name()
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("strings.yaml"));
            let target = self
                .root
                .join(&project.output_root)
                .join(&locale.folder)
                .join(file_name);
            let marker = if target.exists() {
                "✓".green()
            } else {
                "✗".red()
            };
            println!(
                "  {marker} {} ({}) — {}",
                locale.code,
                locale.name,
                target.display()
            );
        }
        Ok(())
    }
}
