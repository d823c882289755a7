//! Chat completion providers.
//!
//! Supports the Google Gemini `generateContent` API behind an injectable
//! trait so the assistant can be tested against fake providers.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ChatError, Result};
use crate::message::{CompletionRequest, Role};

/// Trait for chat completion providers.
#[async_trait]
pub trait Completer: Send + Sync {
    /// Get the name of this provider.
    fn name(&self) -> &str;

    /// Check if the provider is available (API key set, etc.).
    fn is_available(&self) -> bool;

    /// Answer the request with a single response text.
    async fn complete(&self, request: CompletionRequest) -> Result<String>;
}

/// Google Gemini chat completion provider.
pub struct GeminiCompleter {
    /// API key.
    api_key: Option<String>,

    /// API base URL.
    base_url: String,

    /// HTTP client.
    client: reqwest::Client,

    /// Model name.
    model: String,

    /// Sampling temperature.
    temperature: f32,
}

impl GeminiCompleter {
    /// Create a new Gemini provider.
    pub fn new() -> Self {
        Self {
            api_key: std::env::var("GOOGLE_API_KEY").ok(),
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            client: reqwest::Client::new(),
            model: "gemini-2.5-flash".to_string(),
            temperature: 0.3,
        }
    }

    /// Set the API key.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the model name.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    fn endpoint(&self, api_key: &str) -> String {
        format!(
            "{}/models/{}:generateContent?key={api_key}",
            self.base_url, self.model
        )
    }
}

impl Default for GeminiCompleter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Completer for GeminiCompleter {
    fn name(&self) -> &str {
        "gemini"
    }

    fn is_available(&self) -> bool {
        self.api_key.is_some()
    }

    async fn complete(&self, request: CompletionRequest) -> Result<String> {
        let api_key = self
            .api_key
            .as_ref()
            .ok_or(ChatError::ProviderNotConfigured)?;

        debug!(
            "Requesting completion from {} with {} history turns",
            self.model,
            request.history.len()
        );

        // History maps to alternating user/model turns; the new question is
        // the final user turn.
        let mut contents: Vec<Content> = request
            .history
            .iter()
            .map(|message| Content {
                role: match message.role {
                    Role::User => "user".to_string(),
                    Role::Assistant => "model".to_string(),
                },
                parts: vec![Part {
                    text: message.content.clone(),
                }],
            })
            .collect();
        contents.push(Content {
            role: "user".to_string(),
            parts: vec![Part {
                text: request.user_message,
            }],
        });

        let body = GenerateContentRequest {
            system_instruction: SystemInstruction {
                parts: vec![Part {
                    text: request.system_prompt,
                }],
            },
            contents,
            generation_config: GenerationConfig {
                temperature: self.temperature,
            },
        };

        let response = self
            .client
            .post(self.endpoint(api_key))
            .json(&body)
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse().ok())
                .unwrap_or(60);

            return Err(ChatError::RateLimited {
                retry_after_secs: retry_after,
            });
        }

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(ChatError::ApiRequest(format!("API error: {error_text}")));
        }

        let result: GenerateContentResponse = response.json().await?;
        let text = result
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content.parts.into_iter().next())
            .map(|part| part.text)
            .ok_or_else(|| {
                ChatError::InvalidResponse("response carried no candidate text".to_string())
            })?;

        debug!("Received completion with {} characters", text.len());

        Ok(text)
    }
}

/// Gemini API request format.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    system_instruction: SystemInstruction,
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct SystemInstruction {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
}

/// Gemini API response format.
#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}
