/// LLM Client — the single point of entry for all text-generation provider calls.
///
/// ARCHITECTURAL RULE: No other module may talk to the provider directly.
/// Services build a `ChatRequest` and hand it to a `ChatTransport`.
///
/// Provider: Groq, OpenAI-compatible chat completions.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub mod prompts;

pub const GROQ_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
/// Default model for every provider call. Overridable via `GROQ_MODEL`.
pub const MODEL: &str = "llama-3.3-70b-versatile";

const MAX_LOG_CHARS: usize = 500;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {body}")]
    Api { status: u16, body: String },

    #[error("provider did not respond within {}s", .0.as_secs())]
    Timeout(Duration),

    #[error("Malformed provider envelope: {0}")]
    Envelope(#[from] serde_json::Error),

    #[error("LLM returned empty content")]
    EmptyContent,

    #[error("credential contains characters not allowed in an HTTP header")]
    InvalidCredential,
}

impl LlmError {
    /// Rate limits, server errors and timeouts are worth another attempt.
    pub fn is_transient(&self) -> bool {
        match self {
            LlmError::Api { status, .. } => *status == 429 || *status >= 500,
            LlmError::Timeout(_) => true,
            LlmError::Http(e) => e.is_timeout() || e.is_connect(),
            LlmError::Envelope(_) | LlmError::EmptyContent | LlmError::InvalidCredential => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Structured-output constraint. `json_object` forces a single JSON object reply.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseFormat {
    #[serde(rename = "type")]
    pub format_type: String,
}

impl ResponseFormat {
    pub fn json_object() -> Self {
        Self {
            format_type: "json_object".to_string(),
        }
    }
}

/// Request body for the chat completions endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<ResponseFormat>,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessageResponse,
}

#[derive(Debug, Deserialize)]
struct ChatMessageResponse {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

/// Sends one chat request and returns the first choice's message content.
///
/// Implementations perform exactly one attempt; retrying is the job of
/// [`crate::retry::RetryPolicy`] around the calling client.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn complete(
        &self,
        api_key: &str,
        request: &ChatRequest,
        timeout: Duration,
    ) -> Result<String, LlmError>;
}

/// reqwest-backed transport for the Groq endpoint.
#[derive(Clone)]
pub struct HttpChatTransport {
    client: Client,
    endpoint: String,
}

impl HttpChatTransport {
    pub fn new(endpoint: impl Into<String>) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder().build()?,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait]
impl ChatTransport for HttpChatTransport {
    async fn complete(
        &self,
        api_key: &str,
        request: &ChatRequest,
        timeout: Duration,
    ) -> Result<String, LlmError> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {api_key}"))
            .map_err(|_| LlmError::InvalidCredential)?;
        auth.set_sensitive(true);

        let response = self
            .client
            .post(&self.endpoint)
            .timeout(timeout)
            .header(AUTHORIZATION, auth)
            .header(CONTENT_TYPE, "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| classify_reqwest_error(e, timeout))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| classify_reqwest_error(e, timeout))?;

        if !status.is_success() {
            warn!(
                status = status.as_u16(),
                body_len = body.len(),
                body = %truncate_for_log(&body, MAX_LOG_CHARS),
                "provider returned non-success status"
            );
            return Err(LlmError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse = serde_json::from_str(&body)?;
        if let Some(usage) = &parsed.usage {
            debug!(
                "LLM call succeeded: prompt_tokens={}, completion_tokens={}",
                usage.prompt_tokens, usage.completion_tokens
            );
        }

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|c| !c.trim().is_empty())
            .ok_or(LlmError::EmptyContent)
    }
}

fn classify_reqwest_error(e: reqwest::Error, timeout: Duration) -> LlmError {
    if e.is_timeout() {
        LlmError::Timeout(timeout)
    } else {
        LlmError::Http(e)
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
pub fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}

/// Char-safe preview of long provider payloads for log lines.
pub fn truncate_for_log(input: &str, max_chars: usize) -> String {
    let char_count = input.chars().count();
    if char_count <= max_chars {
        return input.to_string();
    }
    let mut preview: String = input.chars().take(max_chars).collect();
    preview.push_str(&format!("... [truncated, total_chars={char_count}]"));
    preview
}
