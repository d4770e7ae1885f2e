//! Topic management
//!
//! A `Topic` holds the ordered list of subscriptions registered under one
//! topic name. Order is insertion order and is the delivery order within the
//! topic; the same callback may be subscribed more than once and each
//! subscription gets its own token.
//!
//! Concurrency note: callers must synchronize access to `Topic` (the
//! registry keeps every topic behind its lock).

use std::fmt;
use std::sync::Arc;

use serde::Deserialize;

/// Prefix of every minted subscription token.
pub const TOKEN_PREFIX: &str = "pubsub_uuid_";

/// Subscriber callback. Receives the name the event was published under and
/// a reference to the payload.
pub type Callback<P> = Arc<dyn Fn(&str, &P) + Send + Sync>;

/// Opaque handle identifying one subscription.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token(String);

impl Token {
    /// Mint the token for the `n`-th subscription of a registry.
    pub(crate) fn mint(n: u64) -> Self {
        Self(format!("{TOKEN_PREFIX}{n}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Token {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for Token {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Token {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl From<Token> for String {
    fn from(token: Token) -> Self {
        token.0
    }
}

/// A token paired with the callback it was registered with.
pub struct Subscription<P> {
    pub token: Token,
    pub callback: Callback<P>,
}

impl<P> Subscription<P> {
    pub fn new(token: Token, callback: Callback<P>) -> Self {
        Self { token, callback }
    }
}

// Manual impl: deriving would require `P: Clone`.
impl<P> Clone for Subscription<P> {
    fn clone(&self) -> Self {
        Self {
            token: self.token.clone(),
            callback: Arc::clone(&self.callback),
        }
    }
}

impl<P> fmt::Debug for Subscription<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("token", &self.token)
            .field("callback", &"Fn(&str, &P)")
            .finish()
    }
}

#[derive(Debug)]
pub struct Topic<P> {
    pub name: String,
    pub subscriptions: Vec<Subscription<P>>,
}

impl<P> Topic<P> {
    /// Create an empty topic with the given name.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            subscriptions: Vec::new(),
        }
    }

    /// Append a subscription. Later subscriptions are delivered after earlier ones.
    pub fn subscribe(&mut self, subscription: Subscription<P>) {
        self.subscriptions.push(subscription);
    }

    /// Remove the subscription holding `token`. Returns whether one was found.
    ///
    /// The topic itself stays alive even when this empties it.
    pub fn unsubscribe(&mut self, token: &str) -> bool {
        match self.subscriptions.iter().position(|s| s.token == token) {
            Some(idx) => {
                self.subscriptions.remove(idx);
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }
}

/// How a published name selects topics other than its exact key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// `key` matches when it contains `published + "."` anywhere, so
    /// `"xnews.sports"` matches a publish to `"news"`.
    #[default]
    Substring,
    /// `key` matches only when its dot-separated segments start with all of
    /// the published name's segments.
    Segment,
}

impl MatchMode {
    /// Whether topic `key` receives an event published to `published`.
    ///
    /// Only meaningful once `published` itself is known to be a live key.
    pub fn matches(self, key: &str, published: &str) -> bool {
        if key == published {
            return true;
        }
        match self {
            MatchMode::Substring => key.contains(&format!("{published}.")),
            MatchMode::Segment => {
                let mut key_segments = key.split('.');
                published
                    .split('.')
                    .all(|segment| key_segments.next() == Some(segment))
            }
        }
    }
}
