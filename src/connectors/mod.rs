//! Built-in connector catalog.
//!
//! Connectors are registered by an explicit bootstrap call rather than as a
//! side effect of being declared, so load order is visible and testable.

pub mod bloodhound;
pub mod delegations;
pub mod demo;
pub mod smb;

use thiserror::Error;
use tracing::info;

use crate::config::SyntacConfig;
use crate::connector::adapters::memory::{ConnectorHandle, InMemoryConnectorRegistry};
use crate::connector::domain::{ConnectorDefinition, SchemaError};
use crate::connector::ports::RegistryError;

/// Errors raised while populating a registry with built-in connectors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BootstrapError {
    /// A built-in definition failed schema capture.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// The registry refused a definition.
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Configuration enables a connector that is not built in.
    #[error("connector '{0}' is enabled but not built in")]
    UnknownConnector(String),
}

/// Connectors registered when configuration does not name any. `Demo` is
/// built in but only registered on request.
pub const DEFAULT_ENABLED: &[&str] = &[smb::NAME, bloodhound::NAME, delegations::NAME];

/// Builds every built-in connector definition.
///
/// # Errors
///
/// Returns [`SchemaError`] if a built-in declaration is malformed.
pub fn builtin_definitions() -> Result<Vec<ConnectorDefinition>, SchemaError> {
    Ok(vec![
        smb::definition()?,
        bloodhound::definition()?,
        delegations::definition()?,
        demo::definition()?,
    ])
}

/// Registers built-in connectors into `registry`.
///
/// With `enabled` set, only the named connectors are registered; otherwise
/// the [`DEFAULT_ENABLED`] set is.
///
/// # Errors
///
/// Returns [`BootstrapError`] when a definition is malformed, an enabled
/// name is not built in, or the registry rejects a definition.
pub fn bootstrap(
    registry: &mut InMemoryConnectorRegistry,
    enabled: Option<&[String]>,
) -> Result<Vec<ConnectorHandle>, BootstrapError> {
    let definitions = builtin_definitions()?;

    let unknown = enabled.and_then(|names| {
        names
            .iter()
            .find(|name| !definitions.iter().any(|definition| definition.name() == name.as_str()))
    });
    if let Some(name) = unknown {
        return Err(BootstrapError::UnknownConnector(name.clone()));
    }

    let handles = definitions
        .into_iter()
        .filter(|definition| match enabled {
            Some(names) => names.iter().any(|name| name == definition.name()),
            None => DEFAULT_ENABLED.contains(&definition.name()),
        })
        .map(|definition| registry.register(definition).map_err(BootstrapError::from))
        .collect::<Result<Vec<_>, _>>()?;

    info!(registered = handles.len(), "bootstrapped built-in connectors");
    Ok(handles)
}

/// Creates a registry configured by `config` and populated with the enabled
/// built-in connectors.
///
/// # Errors
///
/// Returns [`BootstrapError`] when bootstrapping fails.
pub fn registry_from_config(
    config: &SyntacConfig,
) -> Result<InMemoryConnectorRegistry, BootstrapError> {
    let mut registry = InMemoryConnectorRegistry::with_policy(config.registry.duplicate_policy);
    bootstrap(&mut registry, config.connectors.enabled.as_deref())?;
    Ok(registry)
}
