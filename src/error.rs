use thiserror::Error;

/// Main error type for the travel planner
#[derive(Error, Debug)]
pub enum TravelError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation errors: {}", .0.join(", "))]
    Validation(Vec<String>),

    #[error("Generation service error: {0}")]
    Transport(String),

    #[error("Timeout error: {0}")]
    Timeout(String),

    #[error("Rate limit exceeded: retry after {retry_after}s")]
    RateLimit { retry_after: u64 },

    #[error("Failed to parse travel plan: {0}. Please try again.")]
    Parse(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("No items to book")]
    EmptyCart,

    #[error("No travel plan has been generated for this session")]
    NoPlan,

    #[error("Not found: {0}")]
    NotFound(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, TravelError>;

impl TravelError {
    /// Build a validation error from a single message
    pub fn invalid(message: impl Into<String>) -> Self {
        TravelError::Validation(vec![message.into()])
    }

    /// Check if re-issuing the same request might succeed
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            TravelError::Transport(_)
                | TravelError::Timeout(_)
                | TravelError::RateLimit { .. }
                | TravelError::Parse(_)
        )
    }

    /// True for failures raised by the generation service transport
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            TravelError::Transport(_) | TravelError::Timeout(_) | TravelError::RateLimit { .. }
        )
    }

    /// Violations carried by a validation error, empty for every other kind
    pub fn violations(&self) -> &[String] {
        match self {
            TravelError::Validation(violations) => violations,
            _ => &[],
        }
    }

    /// Get the error code for structured responses
    pub fn error_code(&self) -> &'static str {
        match self {
            TravelError::Config(_) => "CONFIG_ERROR",
            TravelError::Validation(_) => "VALIDATION_ERROR",
            TravelError::Transport(_) => "TRANSPORT_ERROR",
            TravelError::Timeout(_) => "TIMEOUT_ERROR",
            TravelError::RateLimit { .. } => "RATE_LIMIT_ERROR",
            TravelError::Parse(_) => "PARSE_ERROR",
            TravelError::Serialization(_) => "SERIALIZATION_ERROR",
            TravelError::EmptyCart => "EMPTY_CART",
            TravelError::NoPlan => "NO_PLAN",
            TravelError::NotFound(_) => "NOT_FOUND",
        }
    }

    /// Convert to a structured error payload
    pub fn to_error_payload(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "code": self.error_code(),
                "message": self.to_string(),
                "retryable": self.is_retryable()
            }
        })
    }
}
