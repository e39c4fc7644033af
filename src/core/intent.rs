use serde::{Deserialize, Serialize};

const DISPATCH_TRIGGERS: [&str; 2] = ["dispatch", "verify address"];

/// Which response path a query takes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    /// Answer from the stored order status; no tool call
    StatusInquiry,
    /// Verify the delivery code with YardCode, then confirm dispatch
    DispatchVerification,
}

/// Pick the response path from the raw user text. Matching is a
/// case-insensitive substring test.
pub fn classify(user_input: &str) -> Intent {
    let lowered = user_input.to_lowercase();
    if DISPATCH_TRIGGERS
        .iter()
        .any(|trigger| lowered.contains(trigger))
    {
        Intent::DispatchVerification
    } else {
        Intent::StatusInquiry
    }
}
