//! OpenAI-compatible chat-completions translator over ureq.

use std::time::Duration;

use serde_json::json;

use crate::error::TranslateError;
use crate::Translator;

/// Default per-request timeout. Expiry surfaces as a per-key translation
/// failure, never as a run-fatal error.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for [`LlmTranslator`].
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Base URL of an OpenAI-compatible API (e.g. `https://api.openai.com/v1`).
    pub api_base: String,
    pub api_key: String,
    pub model: String,
    pub timeout: Duration,
}

impl LlmConfig {
    pub fn new(
        api_base: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            api_base: api_base.into(),
            api_key: api_key.into(),
            model: model.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Translator backed by an OpenAI-compatible chat-completions endpoint.
pub struct LlmTranslator {
    agent: ureq::Agent,
    config: LlmConfig,
}

impl LlmTranslator {
    pub fn new(config: LlmConfig) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(config.timeout).build();
        Self { agent, config }
    }
}

fn system_prompt(language: &str) -> String {
    format!(
        "You are a professional software localization translator. \
         Translate the user's text into {language}. \
         Keep placeholder tokens such as {{name}} or [count] exactly as they appear. \
         Return only the translated text, with no surrounding quotes and no commentary."
    )
}

impl Translator for LlmTranslator {
    fn translate(&self, text: &str, language: &str) -> Result<String, TranslateError> {
        let url = format!(
            "{}/chat/completions",
            self.config.api_base.trim_end_matches('/')
        );
        let payload = json!({
            "model": self.config.model,
            "temperature": 0,
            "messages": [
                { "role": "system", "content": system_prompt(language) },
                { "role": "user", "content": text },
            ],
        });

        tracing::debug!("translating {} chars into {language}", text.len());
        let response = match self
            .agent
            .post(&url)
            .set("Authorization", &format!("Bearer {}", self.config.api_key))
            .send_json(payload)
        {
            Ok(response) => response,
            Err(ureq::Error::Status(code, response)) => {
                let body = response.into_string().unwrap_or_default();
                return Err(TranslateError::Status { code, body });
            }
            Err(err) => return Err(TranslateError::Transport(Box::new(err))),
        };

        let body: serde_json::Value = response
            .into_json()
            .map_err(|e| TranslateError::Malformed(e.to_string()))?;
        extract_completion(&body)
    }
}

/// Pull the completion text out of a chat-completions response body.
pub(crate) fn extract_completion(body: &serde_json::Value) -> Result<String, TranslateError> {
    let content = body
        .pointer("/choices/0/message/content")
        .and_then(|v| v.as_str())
        .ok_or_else(|| TranslateError::Malformed(body.to_string()))?;
    let text = strip_wrapping_quotes(content.trim());
    if text.is_empty() {
        return Err(TranslateError::Empty);
    }
    Ok(text.to_string())
}

/// Models occasionally quote their answer despite instructions.
fn strip_wrapping_quotes(text: &str) -> &str {
    if text.len() >= 2 && text.starts_with('"') && text.ends_with('"') {
        &text[1..text.len() - 1]
    } else {
        text
    }
}
