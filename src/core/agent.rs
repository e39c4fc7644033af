use crate::{
    config::AgentConfig,
    core::{
        backend::{CompletionBackend, CompletionPrompt},
        intent::{classify, Intent},
        prompt::{dispatch_prompt, status_prompt},
    },
    error::Result,
    orders::OrderDatabase,
    services::openai_client::OpenRouterClient,
    tools::{AddressValidator, ValidationOutcome, YardCodeTool},
    types::AgentReply,
};
use tracing::{error, info};

/// Order whose status answers a plain status question
pub const STATUS_ORDER_ID: &str = "001";
/// Order whose delivery code is verified before dispatch
pub const DISPATCH_ORDER_ID: &str = "002";

/// Everything decided before the completion call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentPlan {
    pub intent: Intent,
    pub validation: Option<ValidationOutcome>,
    pub prompt: CompletionPrompt,
}

/// CRM agent for the tailor shop.
///
/// Holds no per-conversation state: every call to [`Agent::run`] starts
/// from the same fixture and the same backends.
#[derive(Debug)]
pub struct Agent {
    completion: Box<dyn CompletionBackend>,
    validator: Box<dyn AddressValidator>,
    orders: OrderDatabase,
}

impl Agent {
    /// Wire up the OpenRouter and YardCode clients from resolved settings
    pub fn new(config: &AgentConfig) -> Result<Self> {
        Ok(Self::with_backends(
            OpenRouterClient::from_config(config)?,
            YardCodeTool::from_config(config)?,
        ))
    }

    pub fn with_backends<C, V>(completion: C, validator: V) -> Self
    where
        C: CompletionBackend + 'static,
        V: AddressValidator + 'static,
    {
        Self {
            completion: Box::new(completion),
            validator: Box::new(validator),
            orders: OrderDatabase::fixture(),
        }
    }

    pub fn with_orders(mut self, orders: OrderDatabase) -> Self {
        self.orders = orders;
        self
    }

    /// Classify the query and build the system instruction, calling the
    /// validator first when the query asks for dispatch.
    pub async fn plan(&self, user_input: &str) -> AgentPlan {
        let intent = classify(user_input);

        let (validation, system) = match intent {
            Intent::DispatchVerification => {
                let yard_code = self.orders.delivery_code_of(DISPATCH_ORDER_ID);
                info!(
                    tool = self.validator.name(),
                    yard_code,
                    "Query needs external verification, calling tool"
                );

                let outcome = self.validator.validate(yard_code).await;
                info!(%outcome, "Tool returned");

                let system = dispatch_prompt(DISPATCH_ORDER_ID, &outcome);
                (Some(outcome), system)
            }
            Intent::StatusInquiry => {
                let status = self.orders.status_of(STATUS_ORDER_ID);
                (None, status_prompt(STATUS_ORDER_ID, status))
            }
        };

        AgentPlan {
            intent,
            validation,
            prompt: CompletionPrompt::new(system, user_input),
        }
    }

    /// Answer one customer query. Completion failures come back as
    /// [`AgentReply::Failed`] rather than an `Err`.
    pub async fn run(&self, user_input: &str) -> AgentReply {
        info!(query = user_input, "Received user query");

        let plan = self.plan(user_input).await;
        let reply = AgentReply::from(self.completion.complete(&plan.prompt).await);

        if let Some(err) = reply.error() {
            error!(code = err.error_code(), error = %err, "Completion request failed");
        }
        reply
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AgentError;
    use async_trait::async_trait;
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    };

    #[derive(Debug, Default, Clone)]
    struct RecordingBackend {
        prompts: Arc<Mutex<Vec<CompletionPrompt>>>,
    }

    #[async_trait]
    impl CompletionBackend for RecordingBackend {
        async fn complete(&self, prompt: &CompletionPrompt) -> Result<String> {
            self.prompts.lock().unwrap().push(prompt.clone());
            Ok("ok".to_string())
        }
    }

    #[derive(Debug)]
    struct FailingBackend;

    #[async_trait]
    impl CompletionBackend for FailingBackend {
        async fn complete(&self, _prompt: &CompletionPrompt) -> Result<String> {
            Err(AgentError::Api {
                status: 401,
                message: "No auth credentials found".into(),
            })
        }
    }

    #[derive(Debug, Default, Clone)]
    struct CountingValidator {
        calls: Arc<AtomicUsize>,
        seen: Arc<Mutex<Vec<String>>>,
    }

    #[async_trait]
    impl AddressValidator for CountingValidator {
        fn name(&self) -> &'static str {
            "counting"
        }

        async fn validate(&self, yard_code: &str) -> ValidationOutcome {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.seen.lock().unwrap().push(yard_code.to_string());
            ValidationOutcome::Rejected
        }
    }

    #[tokio::test]
    async fn dispatch_plan_validates_order_002_code() {
        let validator = CountingValidator::default();
        let agent = Agent::with_backends(RecordingBackend::default(), validator.clone());

        let plan = agent.plan("Please verify address before shipping").await;

        assert_eq!(plan.intent, Intent::DispatchVerification);
        assert_eq!(plan.validation, Some(ValidationOutcome::Rejected));
        assert_eq!(validator.calls.load(Ordering::SeqCst), 1);
        assert_eq!(validator.seen.lock().unwrap().as_slice(), ["GQ9U88levi"]);
        assert!(plan
            .prompt
            .system
            .contains(&ValidationOutcome::Rejected.to_string()));
    }

    #[tokio::test]
    async fn status_plan_skips_validator() {
        let validator = CountingValidator::default();
        let agent = Agent::with_backends(RecordingBackend::default(), validator.clone());

        let plan = agent.plan("Is my suit ready?").await;

        assert_eq!(plan.intent, Intent::StatusInquiry);
        assert!(plan.validation.is_none());
        assert_eq!(validator.calls.load(Ordering::SeqCst), 0);
        assert_eq!(plan.prompt.user, "Is my suit ready?");
    }

    #[tokio::test]
    async fn empty_fixture_degrades_to_placeholders() {
        let backend = RecordingBackend::default();
        let validator = CountingValidator::default();
        let agent = Agent::with_backends(backend.clone(), validator.clone())
            .with_orders(OrderDatabase::default());

        agent.run("status please").await;
        agent.run("dispatch it").await;

        let prompts = backend.prompts.lock().unwrap();
        assert!(prompts[0].system.contains("'Not Found'"));
        assert_eq!(validator.seen.lock().unwrap().as_slice(), ["ERROR"]);
    }

    #[tokio::test]
    async fn completion_failure_becomes_reply() {
        let agent = Agent::with_backends(FailingBackend, CountingValidator::default());

        let reply = agent.run("What is the status of my order 001?").await;

        assert!(!reply.is_success());
        assert!(reply.error().unwrap().is_auth_failure());
        assert!(reply.text().contains("API_ERROR"));
    }
}
