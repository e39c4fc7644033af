use thiserror::Error;

/// Main error type for the agent
#[derive(Error, Debug)]
pub enum AgentError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Missing credential: {0} is not set")]
    MissingCredential(&'static str),

    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("Timeout error: {0}")]
    Timeout(String),

    #[error("HTTP {status} error: {message}")]
    Api { status: u16, message: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, AgentError>;

impl AgentError {
    /// Classify a reqwest failure, keeping timeouts distinct
    pub(crate) fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AgentError::Timeout(err.to_string())
        } else {
            AgentError::Http(err.to_string())
        }
    }

    /// Whether the provider rejected the credential
    pub fn is_auth_failure(&self) -> bool {
        match self {
            AgentError::MissingCredential(_) => true,
            AgentError::Api { status, .. } => *status == 401 || *status == 403,
            _ => false,
        }
    }

    /// Get the error code for structured responses
    pub fn error_code(&self) -> &'static str {
        match self {
            AgentError::Config(_) => "CONFIG_ERROR",
            AgentError::MissingCredential(_) => "MISSING_CREDENTIAL",
            AgentError::Http(_) => "HTTP_ERROR",
            AgentError::Timeout(_) => "TIMEOUT_ERROR",
            AgentError::Api { .. } => "API_ERROR",
            AgentError::MalformedResponse(_) => "MALFORMED_RESPONSE",
        }
    }

    /// Short, user-safe description of the failure category
    pub fn summary(&self) -> &'static str {
        match self {
            AgentError::Config(_) => "the agent is misconfigured",
            AgentError::MissingCredential(_) => "no OpenRouter API key is configured",
            AgentError::Http(_) => "the completion service could not be reached",
            AgentError::Timeout(_) => "the completion service took too long to answer",
            AgentError::Api { status: 401 | 403, .. } => "the OpenRouter API key was rejected",
            AgentError::Api { status: 402 | 429, .. } => {
                "the OpenRouter credit or rate limit was exhausted"
            }
            AgentError::Api { .. } => "the completion service returned an error",
            AgentError::MalformedResponse(_) => {
                "the completion service returned an unreadable response"
            }
        }
    }

    /// Convert to a structured error payload
    pub fn to_error_payload(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "code": self.error_code(),
                "message": self.to_string(),
            }
        })
    }
}
