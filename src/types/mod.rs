pub mod reply;

pub use reply::AgentReply;
