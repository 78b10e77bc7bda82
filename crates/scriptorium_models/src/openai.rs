//! OpenAI chat-completions client.

use async_trait::async_trait;
use reqwest::Client;
use scriptorium_core::TextRequest;
use scriptorium_error::{ModelError, ModelErrorKind, ScriptoriumResult};
use scriptorium_interface::LanguageDriver;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument};

const OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";
const SYSTEM_PROMPT: &str =
    "You are a professional writer. Produce creative, polished prose exactly as requested.";

/// OpenAI API client.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    client: Client,
    api_key: String,
    model: String,
}

impl OpenAiClient {
    /// Creates a new OpenAI client with an explicit API key.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        debug!("Creating new OpenAI client");
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: model.into(),
        }
    }

    /// Creates a client from the `OPENAI_API_KEY` environment variable.
    ///
    /// # Errors
    ///
    /// Returns [`ModelErrorKind::Unavailable`] when the key is not set.
    pub fn from_env(model: impl Into<String>) -> ScriptoriumResult<Self> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| ModelError::unavailable("OPENAI_API_KEY not set"))?;
        Ok(Self::new(api_key, model))
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

#[async_trait]
impl LanguageDriver for OpenAiClient {
    #[instrument(skip(self, req), fields(model = %self.model, prompt_len = req.prompt.len()))]
    async fn generate(&self, req: &TextRequest) -> ScriptoriumResult<String> {
        let body = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: &req.prompt,
                },
            ],
            temperature: req.temperature,
            max_tokens: req.max_tokens,
        };

        let response = self
            .client
            .post(OPENAI_API_URL)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "Failed to send request to OpenAI API");
                ModelError::new(ModelErrorKind::Http(format!("request failed: {}", e)))
            })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            error!(status, body = %message, "OpenAI API returned error");
            return Err(ModelError::new(ModelErrorKind::Api { status, message }).into());
        }

        let parsed: ChatResponse = response.json().await.map_err(|e| {
            ModelError::new(ModelErrorKind::MalformedResponse(format!(
                "failed to parse response: {}",
                e
            )))
        })?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| {
                ModelError::new(ModelErrorKind::MalformedResponse(
                    "response contained no choices".to_string(),
                ))
                .into()
            })
    }

    fn provider_name(&self) -> &'static str {
        "openai"
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
