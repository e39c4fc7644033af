use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::debug;

use crate::{
    config::{AgentConfig, API_KEY_VAR},
    core::backend::{CompletionBackend, CompletionPrompt},
    error::{AgentError, Result},
};

const REFERER: &str = "https://github.com/ipatch/ipatch-agent";
const TITLE: &str = "ipatch-agent";

/// Chat-completion client for OpenRouter or any OpenAI-compatible gateway
#[derive(Clone, Debug)]
pub struct OpenRouterClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    model: String,
}

impl OpenRouterClient {
    pub fn new(
        api_key: Option<String>,
        base_url: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| AgentError::Config(format!("Failed to build HTTP client: {err}")))?;

        Ok(Self {
            client,
            api_key,
            base_url: base_url.into(),
            model: model.into(),
        })
    }

    pub fn from_config(config: &AgentConfig) -> Result<Self> {
        Self::new(
            config.api_key.clone(),
            config.base_url.clone(),
            config.model.clone(),
            config.completion_timeout,
        )
    }

    /// Send one request; no retries
    pub async fn chat_completion(&self, body: &Value) -> Result<Value> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(AgentError::MissingCredential(API_KEY_VAR))?;

        let request_url = build_chat_url(&self.base_url);
        debug!(url = %request_url, model = %self.model, "Sending chat completion request");

        let response = self
            .client
            .post(&request_url)
            .header("Authorization", format!("Bearer {}", api_key))
            .header("Content-Type", "application/json")
            .header("HTTP-Referer", REFERER)
            .header("X-Title", TITLE)
            .json(body)
            .send()
            .await
            .map_err(AgentError::from_transport)?;

        let status = response.status();
        let response_text = response
            .text()
            .await
            .map_err(AgentError::from_transport)?;

        if !status.is_success() {
            let api_message = serde_json::from_str::<Value>(&response_text)
                .ok()
                .and_then(|body| error_message(&body))
                .unwrap_or(response_text);

            return Err(AgentError::Api {
                status: status.as_u16(),
                message: api_message,
            });
        }

        let response_json: Value = serde_json::from_str(&response_text)
            .map_err(|err| AgentError::MalformedResponse(format!("Failed to parse JSON: {err}")))?;

        // OpenRouter reports some upstream failures inside a 200 body
        if let Some(message) = error_message(&response_json) {
            return Err(AgentError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response_json)
    }
}

#[async_trait]
impl CompletionBackend for OpenRouterClient {
    async fn complete(&self, prompt: &CompletionPrompt) -> Result<String> {
        let body = ChatCompletionRequest::new(&self.model, prompt).into_value();
        let response = self.chat_completion(&body).await?;
        first_choice_content(&response)
    }
}

fn build_chat_url(base_url: &str) -> String {
    let trimmed = base_url.trim_end_matches('/');
    if trimmed.ends_with("/chat/completions") {
        trimmed.to_string()
    } else {
        format!("{}/chat/completions", trimmed)
    }
}

fn error_message(body: &Value) -> Option<String> {
    let error = body.get("error")?;
    Some(
        error
            .get("message")
            .and_then(|value| value.as_str())
            .map(|s| s.to_string())
            .unwrap_or_else(|| error.to_string()),
    )
}

fn first_choice_content(response: &Value) -> Result<String> {
    response
        .pointer("/choices/0/message/content")
        .and_then(|value| value.as_str())
        .map(|s| s.to_string())
        .ok_or_else(|| {
            AgentError::MalformedResponse("response has no choices[0].message.content".to_string())
        })
}

/// Body of a single non-streaming, history-free chat completion
#[derive(Clone, Debug)]
pub struct ChatCompletionRequest {
    model: String,
    messages: Vec<Value>,
}

impl ChatCompletionRequest {
    pub fn new(model: impl Into<String>, prompt: &CompletionPrompt) -> Self {
        Self {
            model: model.into(),
            messages: vec![
                json!({ "role": "system", "content": prompt.system }),
                json!({ "role": "user", "content": prompt.user }),
            ],
        }
    }

    pub fn into_value(self) -> Value {
        json!({
            "model": self.model,
            "messages": self.messages,
            "stream": false,
        })
    }
}
