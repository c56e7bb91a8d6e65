//! Task rewrite suggestions from Google's Gemini API.
//!
//! One request per suggestion: no retries, no streaming. The key is checked
//! before anything is sent, and a reply that is not the expected JSON becomes
//! [`TaskflowError::AiMalformedResponse`].

use std::time::Duration;

use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};

use crate::validation::{ValidationErrors, TITLE_MIN_CHARS};
use crate::{AiSuggestion, Result, TaskflowError};

mod prompt;
mod response;

pub use prompt::{build_prompt, EMPTY_DESCRIPTION};
pub use response::{parse_suggestion, strip_code_fences};

pub const DEFAULT_MODEL: &str = "gemini-2.5-pro";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

const API_KEY_PREFIX: &str = "AIza";
// Generation is slower than the task backend.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Clone)]
pub struct AiSettings {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for AiSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl AiSettings {
    /// Default settings with the key taken from `GEMINI_API_KEY`.
    pub fn from_env() -> Self {
        Self {
            api_key: std::env::var(API_KEY_ENV).ok(),
            ..Self::default()
        }
    }

    /// A key is usable when present and shaped like a Google API key.
    pub fn is_configured(&self) -> bool {
        self.api_key
            .as_deref()
            .is_some_and(|key| !key.is_empty() && key.starts_with(API_KEY_PREFIX))
    }
}

#[derive(Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'a str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ProviderError,
}

#[derive(Deserialize)]
struct ProviderError {
    message: String,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    details: Vec<serde_json::Value>,
}

impl ProviderError {
    fn is_invalid_key(&self) -> bool {
        self.message.contains("API_KEY_INVALID")
            || self
                .details
                .iter()
                .any(|detail| detail.get("reason").and_then(|r| r.as_str()) == Some("API_KEY_INVALID"))
    }
}

#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Client,
    settings: AiSettings,
}

impl GeminiClient {
    pub fn new(settings: AiSettings) -> Result<Self> {
        let client = Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|e| TaskflowError::AiProvider(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client, settings })
    }

    pub fn is_configured(&self) -> bool {
        self.settings.is_configured()
    }

    pub fn model(&self) -> &str {
        &self.settings.model
    }

    fn endpoint(&self) -> Result<Url> {
        let url = format!(
            "{}/models/{}:generateContent",
            self.settings.base_url.trim_end_matches('/'),
            self.settings.model
        );
        Url::parse(&url).map_err(|e| {
            TaskflowError::AiNotConfigured(format!("invalid Gemini URL {url}: {e}"))
        })
    }

    /// Asks the model for a better title and description.
    ///
    /// Fails without any network traffic when the title is shorter than three
    /// characters or the API key is missing or malformed.
    pub async fn suggest_improvements(&self, title: &str, description: &str) -> Result<AiSuggestion> {
        if title.trim().chars().count() < TITLE_MIN_CHARS {
            return Err(TaskflowError::Validation(ValidationErrors {
                title: Some(format!(
                    "Write a title of at least {TITLE_MIN_CHARS} characters so the AI can help"
                )),
                description: None,
            }));
        }

        let api_key = match self.settings.api_key.as_deref() {
            Some(key) if self.is_configured() => key,
            _ => {
                return Err(TaskflowError::AiNotConfigured(format!(
                    "set {API_KEY_ENV} to a valid Gemini API key"
                )))
            }
        };

        let prompt = build_prompt(title, description);
        let body = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![RequestPart { text: &prompt }],
            }],
        };

        tracing::debug!(model = %self.settings.model, "requesting task suggestion");

        let response = self
            .client
            .post(self.endpoint()?)
            .query(&[("key", api_key)])
            .json(&body)
            .send()
            .await
            .map_err(|e| TaskflowError::AiProvider(e.without_url().to_string()))?;

        let status = response.status();
        let raw = response
            .text()
            .await
            .map_err(|e| TaskflowError::AiProvider(e.without_url().to_string()))?;

        if !status.is_success() {
            return Err(provider_error(status, &raw));
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&raw).map_err(|e| {
            tracing::warn!(error = %e, "unexpected Gemini response shape");
            TaskflowError::AiMalformedResponse
        })?;

        let text: String = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect()
            })
            .unwrap_or_default();

        let suggestion = parse_suggestion(&text)?;
        tracing::info!(title = %suggestion.improved_title, "received task suggestion");
        Ok(suggestion)
    }
}

fn provider_error(status: reqwest::StatusCode, body: &str) -> TaskflowError {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) if envelope.error.is_invalid_key() => {
            TaskflowError::AiNotConfigured("the Gemini API key was rejected".to_string())
        }
        Ok(envelope) => {
            let message = match envelope.error.status {
                Some(code) => format!("{code}: {}", envelope.error.message),
                None => envelope.error.message,
            };
            tracing::warn!(%status, %message, "Gemini request failed");
            TaskflowError::AiProvider(message)
        }
        Err(_) => {
            let body = body.trim();
            let message = if body.is_empty() {
                status.to_string()
            } else {
                format!("{status}: {body}")
            };
            tracing::warn!(%status, %message, "Gemini request failed");
            TaskflowError::AiProvider(message)
        }
    }
}
