pub mod agent;
pub mod backend;
pub mod intent;
pub mod prompt;

pub use agent::{Agent, AgentPlan, DISPATCH_ORDER_ID, STATUS_ORDER_ID};
pub use backend::{CompletionBackend, CompletionPrompt};
pub use intent::{classify, Intent};
