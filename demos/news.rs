//! Small walkthrough of the registry: loads settings, initializes logging and
//! shows how namespaced topics receive events.
//!
//! Run with `cargo run --example news`, optionally with
//! `PUBSUB__REGISTRY__MATCH_MODE=segment` or `RUST_LOG=debug`.

use pubsub_registry::config::load_config;
use pubsub_registry::utils::logging;
use pubsub_registry::TopicRegistry;
use serde_json::{json, Value};
use tracing::{error, info};

fn main() {
    let settings = match load_config() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            return;
        }
    };
    logging::init(&settings.logging.level);

    let registry: TopicRegistry<Value> = TopicRegistry::with_settings(settings.registry);

    let all_news = registry.subscribe("news", |topic: &str, payload: &Value| {
        info!(topic, %payload, "news desk");
    });
    registry.subscribe("news.sports", |topic: &str, payload: &Value| {
        info!(topic, %payload, "sports desk");
    });

    // Both desks see this one.
    registry.publish("news", json!({ "headline": "Registry ships" }));
    // Only the sports desk sees this one.
    registry.publish("news.sports", json!({ "score": "2-1" }));

    if !registry.unsubscribe(all_news.as_str()) {
        error!(token = %all_news, "token was not registered");
    }
    info!(topics = ?registry.topic_names(), live = registry.len(), "done");
}
