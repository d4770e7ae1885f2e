//! # pubsub-registry
//!
//! `pubsub_registry` is an in-process publish/subscribe registry. Callers
//! subscribe callbacks to named topics and publish events with arbitrary
//! payloads; matching callbacks run synchronously on the publishing thread.
//!
//! Topics are namespaced with dots. Publishing to `"news"` also reaches the
//! subscribers of `"news.sports"`, but only when `"news"` itself has been
//! subscribed to. Publishing to `"news.sports"` never reaches `"news"`.
//!
//! ```
//! use std::sync::{Arc, Mutex};
//! use pubsub_registry::TopicRegistry;
//!
//! let registry: TopicRegistry<String> = TopicRegistry::new();
//! let seen = Arc::new(Mutex::new(Vec::new()));
//!
//! let sink = Arc::clone(&seen);
//! let token = registry.subscribe("news", move |topic: &str, payload: &String| {
//!     sink.lock().unwrap().push(format!("{topic}: {payload}"));
//! });
//! assert_eq!(token, "pubsub_uuid_0");
//!
//! assert!(registry.publish("news", "hello".to_string()));
//! assert_eq!(*seen.lock().unwrap(), vec!["news: hello".to_string()]);
//!
//! assert!(registry.unsubscribe(token.as_str()));
//! ```
//!
//! ## Core Modules
//!
//! - `broker`: the `TopicRegistry` engine, topics, tokens and namespace matching.
//! - `config`: loading registry and logging settings from files and environment.
//! - `utils`: the shared error type and logging initialization.

pub mod broker;
pub mod config;
pub mod utils;

pub use broker::{Callback, MatchMode, Subscription, Token, Topic, TopicRegistry};
pub use utils::error::{RegistryError, Result};
