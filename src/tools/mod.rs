//! External tools the agent can call on its own initiative

pub mod yardcode;

use async_trait::async_trait;

pub use yardcode::{ValidationOutcome, YardCodeTool};

/// Checks a delivery-address code against an outside service.
///
/// Implementations never fail: every problem is folded into the returned
/// outcome so it can be shown to the model as-is.
#[async_trait]
pub trait AddressValidator: Send + Sync + std::fmt::Debug {
    /// Name used when logging the call
    fn name(&self) -> &'static str;

    async fn validate(&self, yard_code: &str) -> ValidationOutcome;
}
