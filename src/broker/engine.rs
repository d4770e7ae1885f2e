//! Registry engine
//!
//! This module contains the in-memory topic registry responsible for:
//! - managing topics and their ordered subscription lists
//! - minting subscription tokens
//! - delivering published events to the exact topic and its namespace
//!   descendants
//!
//! Concurrency and usage notes:
//! - All state sits behind a single mutex, so a registry can be shared
//!   across threads (for example in an `Arc<TopicRegistry>`).
//! - Delivery never holds the lock. `publish` snapshots the matched
//!   subscriptions, releases the lock and only then invokes callbacks, so a
//!   callback may subscribe, unsubscribe or publish on the same registry.
//!   Changes it makes do not affect the snapshot already being delivered.
//! - A panicking callback unwinds through `publish` and skips the remaining
//!   subscribers. The registry is left intact.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, trace};

use crate::broker::topic::{Callback, Subscription, Token, Topic};
use crate::config::RegistrySettings;
use crate::utils::error::{RegistryError, Result};

#[derive(Debug)]
struct RegistryState<P> {
    topics: HashMap<String, Topic<P>>,
    /// Number of tokens minted so far; the next token uses this value.
    next_token: u64,
}

impl<P> Default for RegistryState<P> {
    fn default() -> Self {
        Self {
            topics: HashMap::new(),
            next_token: 0,
        }
    }
}

/// Process-local publish/subscribe registry with dot-namespaced topics.
///
/// `P` is the payload type handed to every callback. It defaults to a JSON
/// value for callers that want an untyped payload.
#[derive(Debug)]
pub struct TopicRegistry<P = serde_json::Value> {
    state: Mutex<RegistryState<P>>,
    settings: RegistrySettings,
}

impl<P> Default for TopicRegistry<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> TopicRegistry<P> {
    pub fn new() -> Self {
        Self::with_settings(RegistrySettings::default())
    }

    pub fn with_settings(settings: RegistrySettings) -> Self {
        Self {
            state: Mutex::new(RegistryState::default()),
            settings,
        }
    }

    pub fn settings(&self) -> &RegistrySettings {
        &self.settings
    }

    fn lock(&self) -> MutexGuard<'_, RegistryState<P>> {
        // Callbacks never run under the lock, so poisoned state is still consistent.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register `callback` under `topic_name` and return its token.
    ///
    /// The topic is created on first use. No validation is performed; see
    /// [`TopicRegistry::try_subscribe`] for the checked variant.
    pub fn subscribe<F>(&self, topic_name: &str, callback: F) -> Token
    where
        F: Fn(&str, &P) + Send + Sync + 'static,
    {
        self.subscribe_callback(topic_name, Arc::new(callback))
    }

    /// Like [`TopicRegistry::subscribe`], but rejects an empty topic name
    /// without minting a token.
    pub fn try_subscribe<F>(&self, topic_name: &str, callback: F) -> Result<Token>
    where
        F: Fn(&str, &P) + Send + Sync + 'static,
    {
        if topic_name.is_empty() {
            return Err(RegistryError::InvalidArgument(
                "topic name must not be empty".to_string(),
            ));
        }
        Ok(self.subscribe(topic_name, callback))
    }

    /// Register an already shared callback under `topic_name`.
    pub fn subscribe_callback(&self, topic_name: &str, callback: Callback<P>) -> Token {
        let mut state = self.lock();

        let token = Token::mint(state.next_token);
        state.next_token += 1;

        state
            .topics
            .entry(topic_name.to_string())
            .or_insert_with(|| Topic::new(topic_name))
            .subscribe(Subscription::new(token.clone(), callback));

        debug!(topic = topic_name, %token, "subscribed");
        token
    }

    /// Publish `payload` under `topic_name`. Always returns `true`.
    pub fn publish(&self, topic_name: &str, payload: P) -> bool {
        self.deliver(topic_name, &payload);
        true
    }

    /// Deliver `payload` to every matched subscription and return how many
    /// callbacks ran.
    ///
    /// Nothing is delivered unless `topic_name` is itself a live key, even if
    /// namespaced children of it exist. Every callback receives the name as
    /// published, not the name of the topic it subscribed to.
    pub fn deliver(&self, topic_name: &str, payload: &P) -> usize {
        let matched = self.matched_subscriptions(topic_name);

        trace!(
            topic = topic_name,
            subscribers = matched.len(),
            "delivering event"
        );

        for subscription in &matched {
            (subscription.callback)(topic_name, payload);
        }
        matched.len()
    }

    /// Snapshot of the subscriptions a publish to `topic_name` reaches, in
    /// delivery order: the exact topic first, then matched topics by name.
    fn matched_subscriptions(&self, topic_name: &str) -> Vec<Subscription<P>> {
        let state = self.lock();

        let Some(exact) = state.topics.get(topic_name) else {
            return Vec::new();
        };

        let mode = self.settings.match_mode;
        let mut descendants: Vec<&Topic<P>> = state
            .topics
            .values()
            .filter(|topic| topic.name != topic_name && mode.matches(&topic.name, topic_name))
            .collect();
        descendants.sort_by(|a, b| a.name.cmp(&b.name));

        let matched = std::iter::once(exact)
            .chain(descendants)
            .flat_map(|topic| topic.subscriptions.iter().cloned())
            .collect();
        matched
    }

    /// Remove a whole topic if `value` names one, otherwise the subscription
    /// whose token is `value`.
    pub fn unsubscribe(&self, value: &str) -> bool {
        self.unsubscribe_topic(value) || self.unsubscribe_token(value)
    }

    /// Remove `topic_name` and every subscription under it.
    pub fn unsubscribe_topic(&self, topic_name: &str) -> bool {
        let removed = self.lock().topics.remove(topic_name);
        match removed {
            Some(topic) => {
                debug!(
                    topic = topic_name,
                    subscriptions = topic.len(),
                    "removed topic"
                );
                true
            }
            None => false,
        }
    }

    /// Remove the single subscription holding `token`.
    ///
    /// The owning topic is kept even if it ends up with no subscriptions.
    pub fn unsubscribe_token(&self, token: &str) -> bool {
        let mut state = self.lock();
        for topic in state.topics.values_mut() {
            if topic.unsubscribe(token) {
                debug!(topic = %topic.name, token, "unsubscribed");
                return true;
            }
        }
        false
    }

    /// Drop every topic. The token counter keeps counting.
    pub fn clear(&self) {
        let mut state = self.lock();
        let count = state.topics.len();
        state.topics.clear();
        debug!(topics = count, "cleared registry");
    }

    pub fn has_topic(&self, topic_name: &str) -> bool {
        self.lock().topics.contains_key(topic_name)
    }

    /// Live topic names, sorted.
    pub fn topic_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.lock().topics.keys().cloned().collect();
        names.sort();
        names
    }

    /// Number of subscriptions under `topic_name`, or `None` if it is not a key.
    pub fn subscriber_count(&self, topic_name: &str) -> Option<usize> {
        self.lock().topics.get(topic_name).map(Topic::len)
    }

    /// Total live subscriptions across all topics.
    pub fn len(&self) -> usize {
        self.lock().topics.values().map(Topic::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
