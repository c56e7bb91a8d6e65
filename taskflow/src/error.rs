use thiserror::Error;

use crate::validation::ValidationErrors;

/// Errors surfaced by task and AI operations.
///
/// None of these are retried; callers report the message and let the user try again.
#[derive(Debug, Error)]
pub enum TaskflowError {
    #[error("{call} failed: {message}")]
    Http { call: String, message: String },
    #[error("task not found: {0}")]
    NotFound(String),
    #[error("{0}")]
    Validation(ValidationErrors),
    #[error("AI is not configured: {0}")]
    AiNotConfigured(String),
    #[error("AI provider error: {0}")]
    AiProvider(String),
    #[error("could not understand the AI response, please try again")]
    AiMalformedResponse,
}

impl TaskflowError {
    pub fn http(call: impl Into<String>, message: impl ToString) -> Self {
        Self::Http {
            call: call.into(),
            message: message.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, TaskflowError>;
