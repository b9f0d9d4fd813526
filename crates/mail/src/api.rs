//! REST client for the email-thread message endpoint.

use std::collections::HashSet;
use std::time::Duration;

use serde::Deserialize;

/// Configuration for the mail provider API.
#[derive(Debug, Clone)]
pub struct MailConfig {
    /// Base HTTP URL, e.g. `https://api.nylas.com`.
    pub base_url: String,
    /// Bearer token for the provider.
    pub auth_token: String,
    /// TCP connect timeout in seconds.
    pub connect_timeout_secs: u64,
    /// Full request timeout in seconds.
    pub request_timeout_secs: u64,
}

/// The set of email addresses allowed to act on a thread.
///
/// Union of the message's from, to, and cc addresses. Membership is an
/// exact string match; addresses are kept as the provider returned them.
#[derive(Debug, Clone)]
pub struct ParticipantSet(HashSet<String>);

impl ParticipantSet {
    pub fn contains(&self, email: &str) -> bool {
        self.0.contains(email)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Errors from the mail provider API layer.
#[derive(Debug, thiserror::Error)]
pub enum MailApiError {
    /// No message id was supplied.
    #[error("Email id must be provided")]
    EmptyId,

    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("Mail API request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The provider did not return a matching message.
    #[error("{0}")]
    NotMatched(String),

    /// The message exists but has no usable participant addresses.
    #[error("Email participants cannot be retrieved at this time")]
    MissingParticipants,
}

#[derive(Debug, Deserialize)]
struct Participant {
    email: String,
}

#[derive(Debug, Deserialize)]
struct MessageResponse {
    id: Option<String>,
    /// Present on provider error bodies instead of message fields.
    message: Option<String>,
    #[serde(default)]
    from: Vec<Participant>,
    #[serde(default)]
    to: Vec<Participant>,
    #[serde(default)]
    cc: Vec<Participant>,
}

/// HTTP client for the mail provider's message lookup.
pub struct MailApi {
    client: reqwest::Client,
    config: MailConfig,
}

impl MailApi {
    /// Build a client with the configured connect/request timeouts.
    pub fn new(config: MailConfig) -> Result<Self, MailApiError> {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(Self { client, config })
    }

    /// Fetch the participant set for a message.
    ///
    /// Sends `GET /messages/{email_id}` with the bearer token and returns
    /// the union of the from, to, and cc addresses. A provider error body,
    /// a non-2xx status, or an id mismatch all mean the message could not
    /// be confirmed.
    pub async fn fetch_participants(&self, email_id: &str) -> Result<ParticipantSet, MailApiError> {
        if email_id.is_empty() {
            return Err(MailApiError::EmptyId);
        }

        let url = format!("{}/messages/{email_id}", self.config.base_url);
        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.config.auth_token)
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        // The provider is not trusted to return JSON on error statuses.
        let body: Option<MessageResponse> = serde_json::from_str(&text).ok();

        if !status.is_success() {
            let reason = body
                .and_then(|b| b.message)
                .unwrap_or_else(|| "Unable to confirm email id".to_string());
            tracing::warn!(email_id, status = %status, "Mail provider rejected message lookup");
            return Err(MailApiError::NotMatched(reason));
        }

        let body = body.ok_or_else(|| {
            MailApiError::NotMatched("Unable to confirm email id".to_string())
        })?;

        if let Some(message) = body.message {
            tracing::warn!(email_id, status = %status, "Mail provider rejected message lookup");
            return Err(MailApiError::NotMatched(message));
        }

        if body.id.as_deref() != Some(email_id) {
            return Err(MailApiError::NotMatched(
                "Unable to confirm email id".to_string(),
            ));
        }

        let participants: HashSet<String> = body
            .from
            .into_iter()
            .chain(body.to)
            .chain(body.cc)
            .map(|p| p.email)
            .collect();

        if participants.is_empty() {
            return Err(MailApiError::MissingParticipants);
        }

        Ok(ParticipantSet(participants))
    }
}
