//! Connector catalog service: the describe and invoke call shapes.

use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

use crate::connector::domain::{
    ConnectorDefinition, ConnectorDescriptor, ConnectorError, ConnectorInstance, OverrideBag,
};
use crate::connector::ports::ConnectorRegistry;

/// Result of a successful invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvocationOutput {
    /// Handler output, unchanged.
    pub result: String,
}

/// Service that describes and invokes connectors from a registry.
#[derive(Clone)]
pub struct ConnectorCatalogService<R>
where
    R: ConnectorRegistry,
{
    registry: Arc<R>,
}

impl<R> ConnectorCatalogService<R>
where
    R: ConnectorRegistry,
{
    /// Creates a new catalog service.
    #[must_use]
    pub const fn new(registry: Arc<R>) -> Self {
        Self { registry }
    }

    /// Lists registered connector names in ascending order.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectorError::Registry`] when the registry fails.
    pub fn list(&self) -> Result<Vec<String>, ConnectorError> {
        self.registry
            .list_names()
            .map_err(|error| ConnectorError::Registry(error.to_string()))
    }

    /// Describes one connector without invoking any handler.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectorError::UnknownConnector`] when `name` is not
    /// registered, or [`ConnectorError::Registry`] when the registry fails.
    pub fn describe(&self, name: &str) -> Result<ConnectorDescriptor, ConnectorError> {
        let definition = self.lookup(name)?;
        Ok(ConnectorDescriptor::from(definition.as_ref()))
    }

    /// Describes every registered connector, ordered by name.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectorError`] when the registry fails.
    pub fn describe_all(&self) -> Result<Vec<ConnectorDescriptor>, ConnectorError> {
        self.list()?
            .iter()
            .map(|name| self.describe(name))
            .collect()
    }

    /// Invokes submodule `key` of connector `name` with a flat value map.
    ///
    /// Values naming global fields bind a fresh instance and the rest become
    /// call-time overrides, so callers need not know which keys are global.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectorError::UnknownConnector`] or
    /// [`ConnectorError::UnknownSubmodule`] before any handler runs,
    /// resolution errors for unusable values, and
    /// [`ConnectorError::Handler`] for handler failures.
    pub fn invoke(
        &self,
        name: &str,
        key: &str,
        field_values: &BTreeMap<String, String>,
    ) -> Result<InvocationOutput, ConnectorError> {
        let definition = self.lookup(name)?;
        if definition.submodule(key).is_none() {
            return Err(ConnectorError::UnknownSubmodule {
                connector: name.to_owned(),
                submodule: key.to_owned(),
            });
        }

        let (globals, overrides) =
            OverrideBag::from_raw(field_values).split_globals(definition.global_schema());
        debug!(
            connector = name,
            submodule = key,
            globals = globals.len(),
            overrides = overrides.len(),
            "invoking connector"
        );

        let instance = ConnectorInstance::new(&definition, globals)?;
        let result = instance.run_submodule(key, &overrides)?;
        Ok(InvocationOutput { result })
    }

    fn lookup(&self, name: &str) -> Result<Arc<ConnectorDefinition>, ConnectorError> {
        self.registry
            .find_by_name(name)
            .map_err(|error| ConnectorError::Registry(error.to_string()))?
            .ok_or_else(|| ConnectorError::UnknownConnector(name.to_owned()))
    }
}
