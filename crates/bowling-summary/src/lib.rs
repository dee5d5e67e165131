//! Game summaries from an OpenAI-compatible chat-completions service.

pub mod client;

use thiserror::Error;

use bowling_core::error::DomainError;

pub use client::{ChatCompletionSummarizer, SummaryConfig};

/// Errors raised while talking to the summary service.
#[derive(Error, Debug)]
pub enum SummaryError {
    /// The request could not be sent or timed out.
    #[error("summary request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("summary service returned {status}: {message}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Response body, if any.
        message: String,
    },

    /// The response body did not contain a usable completion.
    #[error("unusable summary response: {0}")]
    ParseError(String),
}

impl From<SummaryError> for DomainError {
    fn from(err: SummaryError) -> Self {
        DomainError::ExternalService(err.to_string())
    }
}
