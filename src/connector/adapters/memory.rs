//! In-memory connector registry adapter.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::connector::domain::ConnectorDefinition;
use crate::connector::ports::{ConnectorRegistry, RegistryError, RegistryResult};

/// What [`InMemoryConnectorRegistry::register`] does with a name that is
/// already taken.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// The later registration replaces the earlier one.
    #[default]
    Replace,
    /// The later registration fails with
    /// [`RegistryError::DuplicateConnector`].
    Reject,
}

/// Typed handle returned by a successful registration.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConnectorHandle {
    name: String,
    replaced: bool,
}

impl ConnectorHandle {
    /// Registry name of the connector.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the registration replaced an earlier definition.
    #[must_use]
    pub const fn replaced(&self) -> bool {
        self.replaced
    }
}

/// In-memory registry of connector definitions.
///
/// Registration takes `&mut self`, so the registry is populated before it
/// is shared and is read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct InMemoryConnectorRegistry {
    connectors: HashMap<String, Arc<ConnectorDefinition>>,
    policy: DuplicatePolicy,
}

impl InMemoryConnectorRegistry {
    /// Creates an empty registry that replaces duplicate names.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty registry with the given duplicate policy.
    #[must_use]
    pub fn with_policy(policy: DuplicatePolicy) -> Self {
        Self {
            connectors: HashMap::new(),
            policy,
        }
    }

    /// Returns the duplicate policy.
    #[must_use]
    pub const fn policy(&self) -> DuplicatePolicy {
        self.policy
    }

    /// Registers a definition under its name.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateConnector`] when the name is taken
    /// and the policy is [`DuplicatePolicy::Reject`].
    pub fn register(
        &mut self,
        definition: ConnectorDefinition,
    ) -> RegistryResult<ConnectorHandle> {
        let name = definition.name().to_owned();
        let taken = self.connectors.contains_key(&name);

        if taken {
            match self.policy {
                DuplicatePolicy::Reject => return Err(RegistryError::DuplicateConnector(name)),
                DuplicatePolicy::Replace => {
                    warn!(connector = %name, "replacing previously registered connector");
                }
            }
        }

        debug!(
            connector = %name,
            submodules = definition.submodule_keys().count(),
            "registered connector"
        );
        self.connectors.insert(name.clone(), Arc::new(definition));
        Ok(ConnectorHandle {
            name,
            replaced: taken,
        })
    }

    /// Number of registered connectors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.connectors.len()
    }

    /// Returns `true` when nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.connectors.is_empty()
    }
}

impl ConnectorRegistry for InMemoryConnectorRegistry {
    fn find_by_name(&self, name: &str) -> RegistryResult<Option<Arc<ConnectorDefinition>>> {
        Ok(self.connectors.get(name).cloned())
    }

    fn list_names(&self) -> RegistryResult<Vec<String>> {
        let mut names: Vec<_> = self.connectors.keys().cloned().collect();
        names.sort();
        Ok(names)
    }
}
