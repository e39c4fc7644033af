//! ipatch-agent: a small CRM agent for 'The Stylist' tailor shop
//!
//! The agent answers order-status questions through an OpenRouter-hosted
//! model. When a customer asks for dispatch it first checks the order's
//! delivery code with the YardCode validation API and hands the result to
//! the model.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use ipatch_agent::{Agent, AgentConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     dotenvy::dotenv().ok();
//!     let agent = Agent::new(&AgentConfig::from_env())?;
//!
//!     let reply = agent.run("What is the status of my order 001?").await;
//!     println!("{}", reply);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod orders;
pub(crate) mod services;
pub mod tools;
pub mod types;

pub use config::AgentConfig;
pub use core::{
    classify, Agent, AgentPlan, CompletionBackend, CompletionPrompt, Intent, DISPATCH_ORDER_ID,
    STATUS_ORDER_ID,
};
pub use error::{AgentError, Result};
pub use orders::{OrderDatabase, OrderRecord};
pub use services::openai_client::OpenRouterClient;
pub use tools::{AddressValidator, ValidationOutcome, YardCodeTool};
pub use types::AgentReply;

#[cfg(feature = "cli")]
pub mod cli;
