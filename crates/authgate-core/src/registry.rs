//! The event registry: immutable config plus both callback tables.

use crate::config::ServerConfig;
use crate::events::{InterceptEvents, UseEvents};
use crate::policy::DisclosurePolicy;

/// Everything a method pipeline consumes: the defaulted config and the two
/// exhaustive callback tables.
///
/// Construction seeds every declared event with its default, so a partial
/// table never exists. Registration mutates single entries through `&mut`
/// access; by contract that happens at startup, before the registry is
/// shared with live traffic.
pub struct EventRegistry {
    pub config: ServerConfig,
    pub use_events: UseEvents,
    pub intercept_events: InterceptEvents,
}

impl EventRegistry {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config,
            use_events: UseEvents::unregistered(),
            intercept_events: InterceptEvents::permissive(),
        }
    }

    /// The disclosure policy derived from the config's sensitive block.
    pub fn policy(&self) -> DisclosurePolicy {
        DisclosurePolicy::new(&self.config.sensitive)
    }
}
