//! Schedule Client — one provider call per plan, decoded into a typed `Schedule`.
//!
//! Single attempt by contract, bounded by a 60 s timeout. Retries wrap whole
//! calls to this type (`retry::RetryPolicy`), so every attempt gets its own bound.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::errors::AppError;
use crate::llm_client::{
    strip_json_fences, truncate_for_log, ChatMessage, ChatRequest, ChatTransport, LlmError,
    ResponseFormat,
};
use crate::schedule::models::Schedule;
use crate::schedule::prompt_builder::SchedulePrompt;
use crate::schedule::validation::check_schedule;

const TEMPERATURE: f32 = 0.7;
const MAX_TOKENS: u32 = 4000;
const GENERATION_TIMEOUT: Duration = Duration::from_secs(60);
const MAX_PROMPT_LOG_CHARS: usize = 2_000;

#[derive(Clone)]
pub struct ScheduleClient {
    transport: Arc<dyn ChatTransport>,
    api_key: Option<String>,
    model: String,
    timeout: Duration,
}

impl ScheduleClient {
    pub fn new(transport: Arc<dyn ChatTransport>, api_key: Option<String>, model: String) -> Self {
        Self {
            transport,
            api_key,
            model,
            timeout: GENERATION_TIMEOUT,
        }
    }

    /// Returns the credential, or `Configuration` when none is set.
    pub fn ensure_configured(&self) -> Result<&str, AppError> {
        self.api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                AppError::Configuration("Please set GROQ_API_KEY in the environment".to_string())
            })
    }

    /// Sends the prompt and decodes the reply.
    ///
    /// Errors:
    /// - `Configuration` when no credential is set (no request is made)
    /// - `Upstream` for non-success status, transport failure or timeout
    /// - `Parse` when the content is not a schedule; carries the raw content
    pub async fn generate(
        &self,
        prompt: &SchedulePrompt,
        duration_weeks: u32,
    ) -> Result<Schedule, AppError> {
        let api_key = self.ensure_configured()?;

        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage::system(prompt.system.as_str()),
                ChatMessage::user(prompt.user.as_str()),
            ],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
            response_format: Some(ResponseFormat::json_object()),
        };

        info!(
            model = %self.model,
            system_len = prompt.system.len(),
            user_len = prompt.user.len(),
            "schedule request prepared"
        );
        if tracing::enabled!(tracing::Level::DEBUG) {
            debug!(
                user_prompt = %truncate_for_log(&prompt.user, MAX_PROMPT_LOG_CHARS),
                "schedule prompt"
            );
        }

        let content = tokio::time::timeout(
            self.timeout,
            self.transport.complete(api_key, &request, self.timeout),
        )
        .await
        .map_err(|_| LlmError::Timeout(self.timeout))??;

        info!(content_len = content.len(), "schedule content received");

        let schedule = parse_schedule(&content)?;

        let warnings = check_schedule(&schedule, duration_weeks).map_err(|violation| {
            AppError::Parse {
                message: violation.to_string(),
                raw: content.clone(),
            }
        })?;
        for warning in &warnings {
            warn!("Schedule structure: {warning}");
        }

        info!(
            weeks = schedule.weeks.len(),
            days = schedule.day_count(),
            warnings = warnings.len(),
            "schedule parsed"
        );
        Ok(schedule)
    }
}

/// Decodes provider content into a `Schedule`, tolerating markdown fences.
pub fn parse_schedule(content: &str) -> Result<Schedule, AppError> {
    serde_json::from_str(strip_json_fences(content)).map_err(|e| AppError::Parse {
        message: e.to_string(),
        raw: content.to_string(),
    })
}
