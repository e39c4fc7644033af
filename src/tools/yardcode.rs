use super::AddressValidator;
use crate::{config::AgentConfig, AgentError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::{fmt, time::Duration};
use tracing::{debug, warn};

/// What the YardCode service said about a code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ValidationOutcome {
    /// The service confirmed the code; holds the code as the caller gave it
    Success { code: String },
    /// The service answered but did not confirm the format
    Rejected,
    /// Transport failure, bad status or unreadable body
    ConnectionError { detail: String },
    /// Nothing left to validate once whitespace was removed
    EmptyInput,
}

impl ValidationOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ValidationOutcome::Success { .. })
    }
}

impl fmt::Display for ValidationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationOutcome::Success { code } => write!(
                f,
                "Validation SUCCESS: YardCode '{}' is correctly formatted and confirmed by YardCode API. Dispatch Ready.",
                code
            ),
            ValidationOutcome::Rejected => {
                write!(f, "Validation FAILED: API could not confirm the YardCode format.")
            }
            ValidationOutcome::ConnectionError { detail } => write!(
                f,
                "YardCode API Connection Error: Could not reach server. Details: {}",
                detail
            ),
            ValidationOutcome::EmptyInput => write!(f, "ERROR: YardCode cannot be empty."),
        }
    }
}

/// Client for the free YardCode format-validation endpoint
#[derive(Debug, Clone)]
pub struct YardCodeTool {
    client: Client,
    validate_url: String,
}

impl YardCodeTool {
    pub fn new(validate_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| AgentError::Config(format!("Failed to build HTTP client: {err}")))?;

        Ok(Self {
            client,
            validate_url: validate_url.into(),
        })
    }

    pub fn from_config(config: &AgentConfig) -> Result<Self> {
        Self::new(config.validate_url.clone(), config.validation_timeout)
    }

    async fn fetch(&self, yard_code: &str) -> std::result::Result<Value, String> {
        let response = self
            .client
            .get(&self.validate_url)
            .query(&[("yard_code", yard_code)])
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|err| err.to_string())?;

        response
            .json::<Value>()
            .await
            .map_err(|err| format!("Failed to parse YardCode response: {err}"))
    }
}

#[async_trait]
impl AddressValidator for YardCodeTool {
    fn name(&self) -> &'static str {
        "validate_yardcode"
    }

    async fn validate(&self, yard_code: &str) -> ValidationOutcome {
        let contiguous = strip_whitespace(yard_code);
        if contiguous.is_empty() {
            return ValidationOutcome::EmptyInput;
        }

        debug!(url = %self.validate_url, yard_code = %contiguous, "Calling YardCode API");

        match self.fetch(&contiguous).await {
            Ok(body) if is_success_body(&body) => ValidationOutcome::Success {
                code: yard_code.to_string(),
            },
            Ok(body) => {
                debug!(%body, "YardCode API did not confirm the code");
                ValidationOutcome::Rejected
            }
            Err(detail) => {
                warn!(%detail, "YardCode API call failed");
                ValidationOutcome::ConnectionError { detail }
            }
        }
    }
}

fn strip_whitespace(yard_code: &str) -> String {
    yard_code.chars().filter(|c| !c.is_whitespace()).collect()
}

fn is_success_body(body: &Value) -> bool {
    body.get("status").and_then(Value::as_str) == Some("success")
}
