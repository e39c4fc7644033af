use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";
pub const DEFAULT_MODEL: &str = "meta-llama/llama-3-8b-instruct";
pub const DEFAULT_VALIDATE_URL: &str = "https://www.yardcode.ng/api/validate";

pub const API_KEY_VAR: &str = "OPENROUTER_API_KEY";
pub const BASE_URL_VAR: &str = "OPENROUTER_BASE_URL";
pub const MODEL_VAR: &str = "IPATCH_MODEL";
pub const VALIDATE_URL_VAR: &str = "YARDCODE_VALIDATE_URL";

/// Settings resolved once at startup and handed to the agent.
///
/// A missing API key is not an error here; the completion client reports
/// it when a request is actually attempted.
#[derive(Clone, Debug)]
pub struct AgentConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub completion_timeout: Duration,
    pub validate_url: String,
    pub validation_timeout: Duration,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            completion_timeout: Duration::from_secs(45),
            validate_url: DEFAULT_VALIDATE_URL.to_string(),
            validation_timeout: Duration::from_secs(5),
        }
    }
}

impl AgentConfig {
    /// Build from the process environment. Call `dotenvy::dotenv()` first
    /// if a `.env` file should be honoured.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let defaults = Self::default();

        Self {
            api_key: non_empty(API_KEY_VAR),
            base_url: non_empty(BASE_URL_VAR).unwrap_or(defaults.base_url),
            model: non_empty(MODEL_VAR).unwrap_or(defaults.model),
            validate_url: non_empty(VALIDATE_URL_VAR).unwrap_or(defaults.validate_url),
            ..defaults
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_completion_timeout(mut self, timeout: Duration) -> Self {
        self.completion_timeout = timeout;
        self
    }

    pub fn with_validate_url(mut self, validate_url: impl Into<String>) -> Self {
        self.validate_url = validate_url.into();
        self
    }

    pub fn with_validation_timeout(mut self, timeout: Duration) -> Self {
        self.validation_timeout = timeout;
        self
    }
}
