//! Configuration loading — the only place ambient environment is read.
//!
//! Produces immutable values consumed by the core: a [`ProjectConfig`] from
//! `lingua.yaml` at the project root and an [`LlmConfig`] from `LINGUA_*`
//! environment variables. Missing required configuration fails fast with a
//! printed cause before any work starts.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use lingua_core::Locale;
use lingua_sync::SyncRequest;
use lingua_translate::LlmConfig;

/// Project configuration file name, looked up at the project root.
pub const CONFIG_FILE: &str = "lingua.yaml";

pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Contents of `lingua.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectConfig {
    /// Canonical source-language document, relative to the project root.
    pub source: PathBuf,
    /// Directory the per-locale folders live under.
    pub output_root: PathBuf,
    /// Run state checkpoint location.
    #[serde(default = "default_state_path")]
    pub state_path: PathBuf,
    /// Translation targets, in processing order.
    pub locales: Vec<Locale>,
}

fn default_state_path() -> PathBuf {
    PathBuf::from(".lingua/state.json")
}

/// Load and validate `lingua.yaml` from the project root.
pub fn load_project(root: &Path) -> Result<ProjectConfig> {
    let path = root.join(CONFIG_FILE);
    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("cannot read {}; run from a project with a {CONFIG_FILE}", path.display()))?;
    let config: ProjectConfig = serde_yaml::from_str(&contents)
        .with_context(|| format!("invalid {}", path.display()))?;
    if config.locales.is_empty() {
        bail!("no locales configured in {}", path.display());
    }
    Ok(config)
}

/// Build the translator configuration from `LINGUA_*` environment variables.
pub fn load_llm() -> Result<LlmConfig> {
    let api_key = std::env::var("LINGUA_API_KEY")
        .context("LINGUA_API_KEY is not set; it is required to call the translation service")?;
    let api_base =
        std::env::var("LINGUA_API_BASE").unwrap_or_else(|_| DEFAULT_API_BASE.to_string());
    let model = std::env::var("LINGUA_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
    Ok(LlmConfig::new(api_base, api_key, model))
}

/// Assemble the pipeline request, resolving configured paths against `root`.
pub fn sync_request(
    root: &Path,
    config: &ProjectConfig,
    revision: String,
    dry_run: bool,
) -> SyncRequest {
    SyncRequest {
        source_path: root.join(&config.source),
        current_revision: revision,
        locales: config.locales.clone(),
        output_root: root.join(&config.output_root),
        state_path: root.join(&config.state_path),
        dry_run,
    }
}
