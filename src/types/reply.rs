use crate::error::{AgentError, Result};
use std::fmt;

/// Final answer of one agent run
#[derive(Debug)]
pub enum AgentReply {
    /// Text produced by the completion service
    Completion(String),
    /// The completion call failed; the error is kept for callers that care
    Failed(AgentError),
}

impl AgentReply {
    pub fn is_success(&self) -> bool {
        matches!(self, AgentReply::Completion(_))
    }

    pub fn error(&self) -> Option<&AgentError> {
        match self {
            AgentReply::Completion(_) => None,
            AgentReply::Failed(err) => Some(err),
        }
    }

    /// Text to show the customer. Failures name the category and error
    /// code; transport detail stays in the logs.
    pub fn text(&self) -> String {
        match self {
            AgentReply::Completion(text) => text.clone(),
            AgentReply::Failed(err) => format!(
                "Sorry, I couldn't get a response right now because {}. Please check your network connection or OpenRouter credit limit and try again. [{}]",
                err.summary(),
                err.error_code()
            ),
        }
    }

    pub fn into_result(self) -> Result<String> {
        match self {
            AgentReply::Completion(text) => Ok(text),
            AgentReply::Failed(err) => Err(err),
        }
    }
}

impl From<Result<String>> for AgentReply {
    fn from(result: Result<String>) -> Self {
        match result {
            Ok(text) => AgentReply::Completion(text),
            Err(err) => AgentReply::Failed(err),
        }
    }
}

impl fmt::Display for AgentReply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}
