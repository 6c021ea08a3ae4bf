use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::{json, Value};
use tracing::debug;

use crate::{
    core::generator::{ChatMessage, GenerationRequest, TextGenerator},
    error::{Result, TravelError},
};

pub(crate) const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);
const DEFAULT_RETRY_AFTER_SECS: u64 = 1;

/// Chat-completion client for OpenAI-compatible endpoints (OpenAI, OpenRouter, ...)
#[derive(Clone, Debug)]
pub struct OpenAIClient {
    api_key: String,
    base_url: String,
    timeout: Duration,
}

impl OpenAIClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn chat_completion(&self, body: &Value) -> Result<Value> {
        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|err| {
                TravelError::Transport(format!("Failed to build HTTP client: {err}"))
            })?;

        let request_url = build_chat_url(&self.base_url);
        debug!(url = %request_url, "sending chat completion request");

        let response = client
            .post(&request_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .header("X-Title", "travel-agent-rs")
            .json(body)
            .send()
            .await
            .map_err(map_request_error)?;

        let status = response.status();
        let headers = response.headers().clone();
        let response_text = response.text().await.map_err(map_request_error)?;

        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = headers
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|value| value.to_str().ok())
                .and_then(|value| value.parse::<u64>().ok())
                .unwrap_or(DEFAULT_RETRY_AFTER_SECS);

            return Err(TravelError::RateLimit {
                retry_after: retry_after.max(1),
            });
        }

        let response_json: Option<Value> = serde_json::from_str(&response_text).ok();

        if !status.is_success() {
            let api_message = response_json
                .as_ref()
                .and_then(|body| body.get("error"))
                .and_then(|error| error.get("message"))
                .and_then(|value| value.as_str())
                .map(|s| s.to_string())
                .unwrap_or(response_text);

            return Err(TravelError::Transport(format!(
                "HTTP {} error: {}",
                status, api_message
            )));
        }

        let response_json = response_json.ok_or_else(|| {
            TravelError::Transport("Completion endpoint returned a non-JSON body".to_string())
        })?;

        if let Some(error) = response_json.get("error") {
            let error_message = error
                .get("message")
                .and_then(|value| value.as_str())
                .map(|s| s.to_string())
                .unwrap_or_else(|| error.to_string());
            return Err(TravelError::Transport(format!("API error: {}", error_message)));
        }

        Ok(response_json)
    }
}

#[async_trait]
impl TextGenerator for OpenAIClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<String> {
        let body = ChatCompletionRequest::from_generation(request).into_value();
        let response = self.chat_completion(&body).await?;
        extract_message_content(&response)
    }
}

fn map_request_error(err: reqwest::Error) -> TravelError {
    if err.is_timeout() {
        TravelError::Timeout(format!("Completion request timed out: {err}"))
    } else {
        TravelError::Transport(format!("HTTP request failed: {err}"))
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

/// Text of the first choice's assistant message
fn extract_message_content(response: &Value) -> Result<String> {
    let first_choice = response
        .get("choices")
        .and_then(|value| value.as_array())
        .and_then(|choices| choices.first())
        .ok_or_else(|| {
            TravelError::Transport("Completion response contained no choices".to_string())
        })?;

    first_choice
        .get("message")
        .and_then(|message| message.get("content"))
        .and_then(|content| content.as_str())
        .map(|content| content.to_string())
        .ok_or_else(|| {
            TravelError::Transport("Completion response missing assistant message".to_string())
        })
}

#[derive(Clone, Debug)]
pub struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: Option<f64>,
    max_tokens: Option<u32>,
}

impl ChatCompletionRequest {
    pub fn new(model: impl Into<String>, messages: Vec<ChatMessage>) -> Self {
        Self {
            model: model.into(),
            messages,
            temperature: None,
            max_tokens: None,
        }
    }

    pub fn from_generation(request: &GenerationRequest) -> Self {
        Self::new(request.model.clone(), request.messages.clone())
            .with_temperature(Some(request.temperature))
            .with_max_tokens(Some(request.max_tokens))
    }

    pub fn with_temperature(mut self, temperature: Option<f64>) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: Option<u32>) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn into_value(self) -> Value {
        let mut body = json!({
            "model": self.model,
            "messages": self.messages,
        });

        if let Some(temperature) = self.temperature {
            body["temperature"] = json!(temperature);
        }

        if let Some(max_tokens) = self.max_tokens {
            body["max_tokens"] = json!(max_tokens);
        }

        body
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::generator::ModelSettings;

    #[test]
    fn test_build_chat_url() {
        assert_eq!(
            build_chat_url("https://api.openai.com/v1/"),
            "https://api.openai.com/v1/chat/completions"
        );
        assert_eq!(
            build_chat_url("http://localhost:8080/v1/chat/completions"),
            "http://localhost:8080/v1/chat/completions"
        );
    }

    #[test]
    fn test_request_body() {
        let request = GenerationRequest::new(
            &ModelSettings::tips_defaults(),
            vec![ChatMessage::system("expert"), ChatMessage::user("tips")],
        );
        let body = ChatCompletionRequest::from_generation(&request).into_value();

        assert_eq!(body["model"], "gpt-3.5-turbo");
        assert_eq!(body["max_tokens"], 800);
        assert_eq!(body["temperature"], 0.5);
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["content"], "tips");
    }

    #[test]
    fn test_extract_message_content() {
        let response = json!({
            "choices": [{"message": {"role": "assistant", "content": "{\"itinerary\": []}"}}]
        });
        assert_eq!(
            extract_message_content(&response).unwrap(),
            "{\"itinerary\": []}"
        );

        let empty = json!({"choices": []});
        assert!(extract_message_content(&empty).unwrap_err().is_transport());
    }
}
