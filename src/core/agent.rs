use std::{sync::Arc, time::Duration};

use tracing::{debug, info, warn};

use crate::{
    core::generator::{GenerationRequest, ModelSettings, TextGenerator},
    error::{Result, TravelError},
    services::{
        openai_client::OpenAIClient,
        prompts::{parse_tips, plan_messages, tips_messages},
    },
    types::{parse_plan_response, TravelPlan, TravelPreferences},
};

/// Connection settings that take precedence over the environment
#[derive(Debug, Clone, Default)]
pub struct ConnectionOverrides {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub timeout: Option<Duration>,
}

/// Plan requester: turns validated preferences into a [`TravelPlan`] through a
/// text-generation service, and fetches destination tips.
#[derive(Debug, Clone)]
pub struct TravelAgent {
    generator: Arc<dyn TextGenerator>,
    plan_settings: ModelSettings,
    tips_settings: ModelSettings,
}

impl TravelAgent {
    /// Agent backed by the default OpenAI endpoint
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_generator(OpenAIClient::new(api_key))
    }

    pub fn with_generator(generator: impl TextGenerator + 'static) -> Self {
        Self::with_shared_generator(Arc::new(generator))
    }

    pub fn with_shared_generator(generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            generator,
            plan_settings: ModelSettings::plan_defaults(),
            tips_settings: ModelSettings::tips_defaults(),
        }
    }

    pub fn with_plan_settings(mut self, settings: ModelSettings) -> Self {
        self.plan_settings = settings;
        self
    }

    pub fn with_tips_settings(mut self, settings: ModelSettings) -> Self {
        self.tips_settings = settings;
        self
    }

    pub fn with_plan_model(mut self, model: impl Into<String>) -> Self {
        self.plan_settings.model = model.into();
        self
    }

    pub fn with_tips_model(mut self, model: impl Into<String>) -> Self {
        self.tips_settings.model = model.into();
        self
    }

    pub fn plan_settings(&self) -> &ModelSettings {
        &self.plan_settings
    }

    pub fn tips_settings(&self) -> &ModelSettings {
        &self.tips_settings
    }

    /// Build an agent from `OPENAI_API_KEY` and the optional base URL and model
    /// overrides in the environment.
    pub fn from_env() -> Result<Self> {
        Self::from_env_with_timeout(None)
    }

    pub fn from_env_with_timeout(timeout: Option<Duration>) -> Result<Self> {
        Self::from_env_with_overrides(ConnectionOverrides {
            timeout,
            ..Default::default()
        })
    }

    /// Same as [`TravelAgent::from_env`], with explicit settings taking
    /// precedence over their environment variables.
    pub fn from_env_with_overrides(overrides: ConnectionOverrides) -> Result<Self> {
        let api_key = overrides
            .api_key
            .or_else(|| std::env::var("OPENAI_API_KEY").ok())
            .ok_or_else(|| {
                TravelError::Config(
                    "OPENAI_API_KEY environment variable must be set before creating a TravelAgent"
                        .to_string(),
                )
            })?;

        let mut client = OpenAIClient::new(api_key);
        if let Some(base_url) = overrides.base_url.or_else(|| {
            std::env::var("OPENAI_BASE_URL")
                .or_else(|_| std::env::var("OPENROUTER_BASE_URL"))
                .ok()
        }) {
            client = client.with_base_url(base_url);
        }
        if let Some(timeout) = overrides.timeout {
            client = client.with_timeout(timeout);
        }
        debug!(base_url = %client.base_url(), "configured completion endpoint");

        let mut agent = Self::with_generator(client);
        if let Ok(model) = std::env::var("TRAVEL_PLAN_MODEL") {
            agent = agent.with_plan_model(model);
        }
        if let Ok(model) = std::env::var("TRAVEL_TIPS_MODEL") {
            agent = agent.with_tips_model(model);
        }
        Ok(agent)
    }

    /// Check preferences against today's date; an empty list means valid
    pub fn validate(&self, preferences: &TravelPreferences) -> Vec<String> {
        preferences.validate()
    }

    /// Validate the preferences, then ask the model for a full plan.
    ///
    /// Invalid preferences fail with [`TravelError::Validation`] before any request
    /// is made. Output that is not a JSON object fails with [`TravelError::Parse`];
    /// the caller decides whether to ask again.
    pub async fn generate_plan(&self, preferences: &TravelPreferences) -> Result<TravelPlan> {
        let violations = self.validate(preferences);
        if !violations.is_empty() {
            debug!(?violations, "rejecting travel preferences");
            return Err(TravelError::Validation(violations));
        }

        let duration_days = preferences
            .duration_days()
            .ok_or_else(|| TravelError::invalid("Please use YYYY-MM-DD format for dates"))?;

        let request = GenerationRequest::new(
            &self.plan_settings,
            plan_messages(preferences, duration_days),
        );
        info!(
            destination = %preferences.destination.trim(),
            duration_days,
            model = %request.model,
            "requesting travel plan"
        );
        if let Some(prompt) = request.messages.last() {
            debug!(prompt = %prompt.content, "plan prompt");
        }

        let content = self.generator.generate(&request).await?;
        let response = parse_plan_response(&content).map_err(|err| {
            warn!(error = %err, "model returned an unreadable plan");
            err
        })?;

        let plan = TravelPlan::from_response(preferences.destination.trim(), response);
        info!(
            days = plan.duration_days(),
            estimated_cost = plan.estimated_cost,
            "travel plan generated"
        );
        Ok(plan)
    }

    /// Ask for ten destination tips, one per entry.
    ///
    /// Failures come back as a single explanatory entry instead of an error.
    pub async fn get_tips(&self, destination: &str) -> Vec<String> {
        let request = GenerationRequest::new(&self.tips_settings, tips_messages(destination));

        match self.generator.generate(&request).await {
            Ok(content) => parse_tips(&content),
            Err(err) => {
                warn!(error = %err, destination, "travel tips request failed");
                vec![format!("Error getting travel tips: {err}")]
            }
        }
    }
}
