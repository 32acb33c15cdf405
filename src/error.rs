use thiserror::Error;

/// Main error type for the itinerary service
#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Rate limit exceeded: retry after {retry_after}s")]
    RateLimit { retry_after: u64 },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid function call: {0}")]
    InvalidFunctionCall(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("No structured payload returned for `{0}`")]
    EmptyCompletion(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, PlannerError>;

impl PlannerError {
    /// Check if this error is retryable
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            PlannerError::Provider(_)
                | PlannerError::RateLimit { .. }
                | PlannerError::EmptyCompletion(_)
        )
    }

    /// Get the error code for structured responses
    pub fn error_code(&self) -> &'static str {
        match self {
            PlannerError::Config(_) => "CONFIG_ERROR",
            PlannerError::Provider(_) => "PROVIDER_ERROR",
            PlannerError::RateLimit { .. } => "RATE_LIMIT_ERROR",
            PlannerError::Serialization(_) => "SERIALIZATION_ERROR",
            PlannerError::InvalidFunctionCall(_) => "INVALID_FUNCTION_CALL",
            PlannerError::Validation(_) => "VALIDATION_ERROR",
            PlannerError::EmptyCompletion(_) => "EMPTY_COMPLETION",
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
