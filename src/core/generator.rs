use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Speaker of a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Model selection and sampling bounds for one kind of request
#[derive(Debug, Clone, PartialEq)]
pub struct ModelSettings {
    pub model: String,
    pub temperature: f64,
    pub max_tokens: u32,
}

impl ModelSettings {
    pub fn new(model: impl Into<String>, temperature: f64, max_tokens: u32) -> Self {
        Self {
            model: model.into(),
            temperature,
            max_tokens,
        }
    }

    /// Settings for full itinerary generation
    pub fn plan_defaults() -> Self {
        Self::new("gpt-4", 0.7, 2000)
    }

    /// Settings for the cheaper destination tips request
    pub fn tips_defaults() -> Self {
        Self::new("gpt-3.5-turbo", 0.5, 800)
    }
}

/// Single-turn request handed to a [`TextGenerator`]
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f64,
    pub max_tokens: u32,
}

impl GenerationRequest {
    pub fn new(settings: &ModelSettings, messages: Vec<ChatMessage>) -> Self {
        Self {
            model: settings.model.clone(),
            messages,
            temperature: settings.temperature,
            max_tokens: settings.max_tokens,
        }
    }
}

/// A text-generation service that turns chat messages into completion text.
///
/// [`crate::OpenAIClient`] talks to an OpenAI-compatible HTTP endpoint; tests plug
/// in their own implementations.
#[async_trait]
pub trait TextGenerator: Send + Sync + std::fmt::Debug {
    async fn generate(&self, request: &GenerationRequest) -> Result<String>;
}
