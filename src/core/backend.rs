use crate::error::Result;
use async_trait::async_trait;

/// The two messages sent to the model for a single turn
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionPrompt {
    pub system: String,
    pub user: String,
}

impl CompletionPrompt {
    pub fn new(system: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            user: user.into(),
        }
    }
}

/// A remote text-completion service
#[async_trait]
pub trait CompletionBackend: Send + Sync + std::fmt::Debug {
    /// Return the text of the first completion choice
    async fn complete(&self, prompt: &CompletionPrompt) -> Result<String>;
}
