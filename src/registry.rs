//! Fixed-membership registries of named endpoints.
//!
//! A [`Registry`] is the user-defined bundle of notifiers a producer
//! broadcasts to. Membership is decided once through [`RegistryBuilder`] and
//! immutable afterwards; there is no runtime register or unregister. Clones
//! share the same membership and may be read concurrently.

use crate::config::Config;
use crate::dispatch::{Dispatch, DispatchGroup};
use crate::error::DispatchError;
use crate::message::Message;
use crate::notifier::Endpoint;
use crate::severity::SeveritySet;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

#[derive(Clone)]
struct Entry {
    endpoint: Endpoint,
    // The endpoint's own suppression set, possibly widened by configuration
    // at build time. Fixed afterwards.
    suppressed: SeveritySet,
}

/// A fixed, ordered set of named endpoints.
#[derive(Clone, Default)]
pub struct Registry {
    entries: Arc<Vec<Entry>>,
}

impl Registry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered endpoint names, in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.endpoint.name())
    }

    /// Looks up an endpoint by its registered name.
    pub fn get(&self, name: &str) -> Option<&Endpoint> {
        self.entries
            .iter()
            .find(|e| e.endpoint.name() == name)
            .map(|e| &e.endpoint)
    }

    /// Broadcasts a message to every registered endpoint.
    ///
    /// Endpoints whose effective suppression set contains the message's
    /// severity are skipped silently, as in a multi-target send. Unit order
    /// follows registration order.
    pub fn to_all(&self, msg: Message) -> DispatchGroup {
        let severity = msg.severity();
        let units = self
            .entries
            .iter()
            .filter(|entry| !entry.suppressed.contains(severity))
            .map(|entry| Dispatch::new(msg.clone(), entry.endpoint.clone()))
            .collect();
        DispatchGroup::new(units)
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

/// Builds a [`Registry`] from an ordered list of endpoints.
#[derive(Default)]
pub struct RegistryBuilder {
    endpoints: Vec<Endpoint>,
    config: Config,
}

impl RegistryBuilder {
    /// Appends an endpoint. Its name becomes the registry key.
    #[must_use]
    pub fn with(mut self, endpoint: Endpoint) -> Self {
        self.endpoints.push(endpoint);
        self
    }

    /// Applies configuration at build time: disabled endpoints are dropped
    /// and configured `suppress` lists widen each endpoint's own set.
    #[must_use]
    pub fn configured(mut self, config: &Config) -> Self {
        self.config = config.clone();
        self
    }

    /// Finalizes membership. Fails when two endpoints share a name.
    pub fn build(self) -> Result<Registry, DispatchError> {
        let mut seen = HashSet::new();
        let mut entries = Vec::with_capacity(self.endpoints.len());

        for endpoint in self.endpoints {
            let name = endpoint.name().to_string();
            if !seen.insert(name.clone()) {
                return Err(DispatchError::Duplicate(name));
            }

            let mut suppressed = endpoint.suppressed();
            if let Some(overrides) = self.config.notifiers.get(&name) {
                if !overrides.enabled {
                    debug!(notifier = %name, "endpoint disabled by configuration");
                    continue;
                }
                suppressed = suppressed.union(overrides.suppress_set());
            }
            entries.push(Entry {
                endpoint,
                suppressed,
            });
        }

        for name in self.config.notifiers.keys() {
            if !seen.contains(name) {
                warn!(notifier = %name, "configuration references an unregistered endpoint");
            }
        }

        Ok(Registry {
            entries: Arc::new(entries),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NotifierConfig;
    use crate::severity::Severity;
    use crate::test_utils::RecordingSink;

    #[test]
    fn test_membership_order_and_lookup() {
        let registry = Registry::builder()
            .with(Endpoint::new(RecordingSink::new("log")))
            .with(Endpoint::new(RecordingSink::new("chat")))
            .build()
            .unwrap();

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["log", "chat"]);
        assert!(registry.get("chat").is_some());
        assert!(registry.get("mail").is_none());
    }

    #[test]
    fn test_duplicate_names_are_rejected() {
        let result = Registry::builder()
            .with(Endpoint::new(RecordingSink::new("log")))
            .with(Endpoint::new(RecordingSink::new("log")))
            .build();

        assert!(matches!(result, Err(DispatchError::Duplicate(name)) if name == "log"));
    }

    #[test]
    fn test_to_all_filters_suppressed_endpoints() {
        let eager = RecordingSink::new("eager");
        let muted = RecordingSink::suppressing("muted", SeveritySet::of([Severity::Warning]));
        let registry = Registry::builder()
            .with(Endpoint::new(eager.clone()))
            .with(Endpoint::new(muted.clone()))
            .build()
            .unwrap();

        registry.to_all(Message::warning("low disk")).send();

        assert_eq!(eager.texts(), vec!["low disk"]);
        assert!(muted.texts().is_empty());
    }

    #[test]
    fn test_configuration_disables_and_widens() {
        let mut config = Config::default();
        config
            .notifiers
            .insert("chat".to_string(), NotifierConfig {
                enabled: false,
                suppress: Vec::new(),
            });
        config
            .notifiers
            .insert("log".to_string(), NotifierConfig {
                enabled: true,
                suppress: vec![Severity::Debug],
            });

        let log = RecordingSink::new("log");
        let chat = RecordingSink::new("chat");
        let registry = Registry::builder()
            .with(Endpoint::new(log.clone()))
            .with(Endpoint::new(chat.clone()))
            .configured(&config)
            .build()
            .unwrap();

        assert_eq!(registry.len(), 1);

        registry.to_all(Message::debug("probe")).send();
        registry.to_all(Message::info("up")).send();

        // Debug got widened into log's suppression set; chat is gone.
        assert_eq!(log.texts(), vec!["up"]);
        assert!(chat.texts().is_empty());
    }

    #[test]
    fn test_empty_registry_broadcast_is_a_no_op() {
        let registry = Registry::builder().build().unwrap();
        let group = registry.to_all(Message::info("nobody home"));
        assert!(group.is_empty());
        group.send();
    }
}
