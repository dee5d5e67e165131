//! HTTP client for chat-completion summaries.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use bowling_core::error::DomainError;
use bowling_game::application::summarizer::{Summarizer, SummaryRequest, frame_breakdown};

use crate::SummaryError;

const SYSTEM_PROMPT: &str = "You are a bowling scorekeeper.";

/// Default endpoint for chat completions.
pub const DEFAULT_API_URL: &str = "https://api.openai.com/v1/chat/completions";
/// Default model name.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Connection settings for the summary service.
#[derive(Debug, Clone)]
pub struct SummaryConfig {
    /// Full URL of the chat-completions endpoint.
    pub api_url: String,
    /// Bearer token.
    pub api_key: String,
    /// Model name sent with every request.
    pub model: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl SummaryConfig {
    /// Config for the default endpoint and model.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_owned(),
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// `Summarizer` backed by an OpenAI-compatible chat-completions endpoint.
#[derive(Debug, Clone)]
pub struct ChatCompletionSummarizer {
    http: reqwest::Client,
    config: SummaryConfig,
}

impl ChatCompletionSummarizer {
    /// Builds the client.
    ///
    /// # Errors
    ///
    /// Returns `SummaryError::RequestFailed` if the HTTP client cannot be
    /// constructed.
    pub fn new(config: SummaryConfig) -> Result<Self, SummaryError> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { http, config })
    }

    /// The model this client requests.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.config.model
    }

    async fn complete(&self, prompt: String) -> Result<String, SummaryError> {
        let body = ChatRequest {
            model: &self.config.model,
            messages: vec![
                Message {
                    role: "system",
                    content: SYSTEM_PROMPT.to_owned(),
                },
                Message {
                    role: "user",
                    content: prompt,
                },
            ],
        };

        let response = self
            .http
            .post(&self.config.api_url)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(SummaryError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| SummaryError::ParseError(e.to_string()))?;

        let choice = parsed
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| SummaryError::ParseError("no completion choices".to_owned()))?;
        let content = choice.message.content.trim();
        if content.is_empty() {
            return Err(SummaryError::ParseError("empty completion".to_owned()));
        }
        Ok(content.to_owned())
    }
}

/// Builds the user prompt for a game.
#[must_use]
pub fn build_prompt(request: &SummaryRequest) -> String {
    let progress = if request.score.is_complete {
        "The game is complete."
    } else {
        "The game is still in progress."
    };
    format!(
        "Summarize this bowling game in two or three sentences. {progress} \
         Current total: {}. Rolls recorded: {}.\n{}",
        request.score.current_score,
        request.rolls.len(),
        frame_breakdown(&request.score)
    )
}

#[async_trait]
impl Summarizer for ChatCompletionSummarizer {
    async fn summarize(&self, request: &SummaryRequest) -> Result<String, DomainError> {
        debug!(game_id = %request.game_id, model = %self.config.model, "requesting summary");
        Ok(self.complete(build_prompt(request)).await?)
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<Message>,
}

#[derive(Serialize)]
struct Message {
    role: &'static str,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatMessage {
    content: String,
}
