//! Anthropic Messages API client for semantic review.
//!
//! Conventions of the Messages API this client follows:
//! - Auth via `x-api-key` header (not `Authorization: Bearer`)
//! - Required `anthropic-version` header
//! - Completion text arrives as `content` blocks with `type: "text"`
//!
//! The client is deliberately minimal: one blocking request per file, a
//! request timeout, and no retry or backoff.

use crate::parse::findings_from_response;
use crate::prompt::build_prompt;
use sqlreview_core::{FileChange, Finding};

use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

/// The default Anthropic API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.anthropic.com/v1";

/// The required Anthropic API version header value.
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// The default model used for semantic review.
pub const DEFAULT_MODEL: &str = "claude-haiku-4-5-20251001";

/// Environment variable consulted when no API key is configured.
pub const API_KEY_ENV: &str = "ANTHROPIC_API_KEY";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);
const MAX_TOKENS: u32 = 1024;

/// Settings for the semantic reviewer.
#[derive(Debug, Clone)]
pub struct SemanticConfig {
    /// Model identifier.
    pub model: String,
    /// API base URL.
    pub base_url: String,
    /// API key; resolved from [`API_KEY_ENV`] when `None`.
    pub api_key: Option<String>,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for SemanticConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Reviews changed files by delegating judgment to a language model.
///
/// Findings come back in the same shape the deterministic checks produce;
/// the aggregation step cannot tell them apart.
pub struct SemanticReviewer {
    client: reqwest::blocking::Client,
    model: String,
    base_url: String,
    api_key: String,
}

impl SemanticReviewer {
    /// Creates a reviewer, resolving the API key from configuration or the
    /// environment.
    ///
    /// # Errors
    ///
    /// Returns [`SemanticError::MissingApiKey`] when no key is available,
    /// or an HTTP error if the client cannot be constructed.
    pub fn new(config: SemanticConfig) -> Result<Self, SemanticError> {
        let api_key = match config.api_key {
            Some(key) => key,
            None => std::env::var(API_KEY_ENV)
                .map_err(|_| SemanticError::MissingApiKey { env: API_KEY_ENV })?,
        };

        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            model: config.model,
            base_url: config.base_url,
            api_key,
        })
    }

    /// Reviews a single file change.
    ///
    /// Files with no reconstructed content are skipped without a request.
    ///
    /// # Errors
    ///
    /// Returns an error when the request fails or the completion cannot be
    /// parsed into findings. Callers reviewing several files should prefer
    /// [`analyze_changes`](Self::analyze_changes), which isolates failures.
    pub fn analyze(&self, change: &FileChange) -> Result<Vec<Finding>, SemanticError> {
        if change.full_content.trim().is_empty() {
            return Ok(Vec::new());
        }

        let prompt = build_prompt(&change.path, &change.full_content);
        let completion = self.complete(&prompt)?;
        findings_from_response(&completion, &change.path).ok_or_else(|| {
            SemanticError::MalformedResponse {
                file: change.path.clone(),
            }
        })
    }

    /// Reviews every change, isolating failures per file.
    ///
    /// A file whose review fails contributes zero findings and a warning;
    /// it never aborts the run.
    #[must_use]
    pub fn analyze_changes(&self, changes: &[FileChange]) -> Vec<Finding> {
        let mut findings = Vec::new();
        for change in changes {
            match self.analyze(change) {
                Ok(mut emitted) => {
                    debug!(
                        file = %change.path,
                        findings = emitted.len(),
                        "semantic review complete"
                    );
                    findings.append(&mut emitted);
                }
                Err(error) => {
                    warn!(file = %change.path, %error, "semantic review failed, continuing");
                }
            }
        }
        findings
    }

    /// Sends one completion request and returns the first text block.
    fn complete(&self, prompt: &str) -> Result<String, SemanticError> {
        let body = serde_json::json!({
            "model": self.model,
            "max_tokens": MAX_TOKENS,
            "messages": [{"role": "user", "content": prompt}],
        });

        let response = self
            .client
            .post(format!("{}/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(SemanticError::Api {
                status: status.as_u16(),
                body: response.text().unwrap_or_default(),
            });
        }

        let parsed: MessagesResponse = response.json()?;
        parsed
            .content
            .into_iter()
            .find(|block| block.kind == "text")
            .map(|block| block.text)
            .ok_or(SemanticError::EmptyCompletion)
    }
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: String,
}

/// Errors from the semantic collaborator.
///
/// These never cross the crate boundary during a review run;
/// [`SemanticReviewer::analyze_changes`] degrades them to warnings.
#[derive(Debug, thiserror::Error)]
pub enum SemanticError {
    /// No API key configured or present in the environment.
    #[error("no API key found (set {env} or pass --api-key)")]
    MissingApiKey {
        /// Environment variable that was consulted.
        env: &'static str,
    },

    /// Transport-level failure.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success response from the API.
    #[error("API returned status {status}: {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body, if readable.
        body: String,
    },

    /// The completion contained no text block.
    #[error("completion contained no text block")]
    EmptyCompletion,

    /// The completion text held no parseable findings array.
    #[error("could not parse findings for {file}")]
    MalformedResponse {
        /// File whose review response was malformed.
        file: String,
    },
}
