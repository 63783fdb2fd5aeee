//! Tutor — single-turn Q&A at a chosen explanation level.
//! Shares only the provider credential and transport with schedule generation.

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use crate::errors::AppError;
use crate::llm_client::{truncate_for_log, ChatMessage, ChatRequest, ChatTransport, LlmError};

pub mod handlers;
pub mod prompts;

const TEMPERATURE: f32 = 0.7;
const MAX_TOKENS: u32 = 500;
const CHAT_TIMEOUT: Duration = Duration::from_secs(30);

/// Explanation level requested by the learner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Difficulty {
    Child,
    #[default]
    HighSchool,
    College,
}

impl Difficulty {
    /// Maps a UI label to a level. Unknown labels get the most detailed tutor.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "child" => Difficulty::Child,
            "high school" | "high_school" | "highschool" => Difficulty::HighSchool,
            _ => Difficulty::College,
        }
    }

    pub fn system_prompt(self) -> &'static str {
        match self {
            Difficulty::Child => prompts::CHILD_SYSTEM,
            Difficulty::HighSchool => prompts::HIGH_SCHOOL_SYSTEM,
            Difficulty::College => prompts::COLLEGE_SYSTEM,
        }
    }
}

#[derive(Clone)]
pub struct TutorClient {
    transport: Arc<dyn ChatTransport>,
    api_key: Option<String>,
    model: String,
}

impl TutorClient {
    pub fn new(transport: Arc<dyn ChatTransport>, api_key: Option<String>, model: String) -> Self {
        Self {
            transport,
            api_key,
            model,
        }
    }

    /// Answers one question. No history is kept between calls.
    pub async fn ask(&self, question: &str, difficulty: Difficulty) -> Result<String, AppError> {
        let api_key = self
            .api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                AppError::Configuration("Please set GROQ_API_KEY in the environment".to_string())
            })?;

        let question = question.trim();
        if question.is_empty() {
            return Err(AppError::Validation("Please enter a question!".to_string()));
        }
        info!(difficulty = ?difficulty, question_len = question.len(), "tutor question");

        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage::system(difficulty.system_prompt()),
                ChatMessage::user(question),
            ],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
            response_format: None,
        };

        let answer = tokio::time::timeout(
            CHAT_TIMEOUT,
            self.transport.complete(api_key, &request, CHAT_TIMEOUT),
        )
        .await
        .map_err(|_| LlmError::Timeout(CHAT_TIMEOUT))??;

        info!(answer = %truncate_for_log(&answer, 100), "tutor answer generated");
        Ok(answer)
    }
}
