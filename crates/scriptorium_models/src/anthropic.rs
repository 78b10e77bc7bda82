//! Anthropic messages-API client.

use async_trait::async_trait;
use reqwest::Client;
use scriptorium_core::TextRequest;
use scriptorium_error::{ModelError, ModelErrorKind, ScriptoriumResult};
use scriptorium_interface::LanguageDriver;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument};

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const SYSTEM_PROMPT: &str =
    "You are a professional writer. Produce creative, polished prose exactly as requested.";

/// Anthropic API client.
#[derive(Debug, Clone)]
pub struct AnthropicClient {
    client: Client,
    api_key: String,
    model: String,
}

impl AnthropicClient {
    /// Creates a new Anthropic client with an explicit API key.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        debug!("Creating new Anthropic client");
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: model.into(),
        }
    }

    /// Creates a client from the `ANTHROPIC_API_KEY` environment variable.
    ///
    /// # Errors
    ///
    /// Returns [`ModelErrorKind::Unavailable`] when the key is not set.
    pub fn from_env(model: impl Into<String>) -> ScriptoriumResult<Self> {
        let api_key = std::env::var("ANTHROPIC_API_KEY")
            .map_err(|_| ModelError::unavailable("ANTHROPIC_API_KEY not set"))?;
        Ok(Self::new(api_key, model))
    }
}

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    system: &'a str,
    messages: Vec<UserMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct UserMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: String,
}

#[async_trait]
impl LanguageDriver for AnthropicClient {
    #[instrument(skip(self, req), fields(model = %self.model, prompt_len = req.prompt.len()))]
    async fn generate(&self, req: &TextRequest) -> ScriptoriumResult<String> {
        let body = MessagesRequest {
            model: &self.model,
            max_tokens: req.max_tokens,
            temperature: req.temperature,
            system: SYSTEM_PROMPT,
            messages: vec![UserMessage {
                role: "user",
                content: &req.prompt,
            }],
        };

        let response = self
            .client
            .post(ANTHROPIC_API_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "Failed to send request to Anthropic API");
                ModelError::new(ModelErrorKind::Http(format!("request failed: {}", e)))
            })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            error!(status, body = %message, "Anthropic API returned error");
            return Err(ModelError::new(ModelErrorKind::Api { status, message }).into());
        }

        let parsed: MessagesResponse = response.json().await.map_err(|e| {
            ModelError::new(ModelErrorKind::MalformedResponse(format!(
                "failed to parse response: {}",
                e
            )))
        })?;

        parsed
            .content
            .into_iter()
            .next()
            .map(|block| block.text)
            .filter(|text| !text.is_empty())
            .ok_or_else(|| {
                ModelError::new(ModelErrorKind::MalformedResponse(
                    "response contained no text blocks".to_string(),
                ))
                .into()
            })
    }

    fn provider_name(&self) -> &'static str {
        "anthropic"
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
