pub mod engine;
pub mod topic;

pub use engine::TopicRegistry;
pub use topic::{Callback, MatchMode, Subscription, Token, Topic};
