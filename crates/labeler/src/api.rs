//! REST client for the completion endpoint.

use std::time::Duration;

use serde::Deserialize;
use threadnote_core::label::VALID_LABEL_STRINGS;
use threadnote_core::suggest::validate_suggestion_text;
use threadnote_core::CoreError;

use crate::parse::{parse_suggestions, LabelSuggestion};

/// Configuration for the completion service.
#[derive(Debug, Clone)]
pub struct LabelerConfig {
    /// Base HTTP URL, e.g. `https://api.openai.com`.
    pub base_url: String,
    /// API key sent as a bearer token.
    pub api_key: String,
    /// Completion model name.
    pub model: String,
    /// Token budget for the completion.
    pub max_tokens: u32,
    /// Full request timeout in seconds.
    pub request_timeout_secs: u64,
}

/// Errors from the completion API layer.
#[derive(Debug, thiserror::Error)]
pub enum LabelerApiError {
    /// The input text failed validation before any network call.
    #[error(transparent)]
    InvalidInput(CoreError),

    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("Completion request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The completion service returned a non-2xx status.
    #[error("Completion API error ({status}): {body}")]
    Api { status: u16, body: String },

    /// The completion could not be parsed into suggestions.
    #[error("Unable to parse completion: {0}")]
    Parse(String),
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    text: String,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

/// HTTP client for the completion service.
pub struct LabelerApi {
    client: reqwest::Client,
    config: LabelerConfig,
}

impl LabelerApi {
    /// Build a client with the configured request timeout.
    pub fn new(config: LabelerConfig) -> Result<Self, LabelerApiError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(Self { client, config })
    }

    /// Suggest label/annotation pairs for a piece of text.
    ///
    /// Validates the input first so empty or oversized text never reaches
    /// the upstream service, then submits the fixed categorization prompt
    /// and parses the first completion choice.
    pub async fn suggest(&self, text: &str) -> Result<Vec<LabelSuggestion>, LabelerApiError> {
        validate_suggestion_text(text).map_err(LabelerApiError::InvalidInput)?;

        let body = serde_json::json!({
            "model": self.config.model,
            "prompt": categorization_prompt(text),
            "max_tokens": self.config.max_tokens,
        });

        let response = self
            .client
            .post(format!("{}/v1/completions", self.config.base_url))
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LabelerApiError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let completion: CompletionResponse = response.json().await?;
        let raw = completion
            .choices
            .first()
            .map(|c| c.text.trim())
            .ok_or_else(|| LabelerApiError::Parse("completion returned no choices".to_string()))?;

        parse_suggestions(raw)
    }
}

/// Build the fixed categorization prompt for a piece of text.
///
/// The label list is injected from the closed annotation label set so the
/// prompt can never drift from what the service accepts.
fn categorization_prompt(text: &str) -> String {
    let labels = VALID_LABEL_STRINGS
        .iter()
        .map(|l| format!("- {l}"))
        .collect::<Vec<_>>()
        .join("\n");
    format!(
        "Given the user input '{text}', categorize the text under one or more \
         of the following labels:\n{labels}\nRespond only with pairs of the form \
         'Category: <label>, Annotation: <selected_text>', separated by semicolons, \
         with no additional text."
    )
}
