//! Connector registry port.
//!
//! The registry port provides connector definitions to the catalog service.

use std::sync::Arc;
use thiserror::Error;

use crate::connector::domain::ConnectorDefinition;

/// Result type for connector registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Port for looking up registered connector definitions.
#[cfg_attr(test, mockall::automock)]
pub trait ConnectorRegistry: Send + Sync {
    /// Finds a connector definition by its registry name.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] when registry access fails.
    fn find_by_name(&self, name: &str) -> RegistryResult<Option<Arc<ConnectorDefinition>>>;

    /// Lists registered connector names in ascending order.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] when registry access fails.
    fn list_names(&self) -> RegistryResult<Vec<String>>;
}

impl<R> ConnectorRegistry for &R
where
    R: ConnectorRegistry + ?Sized,
{
    fn find_by_name(&self, name: &str) -> RegistryResult<Option<Arc<ConnectorDefinition>>> {
        (**self).find_by_name(name)
    }

    fn list_names(&self) -> RegistryResult<Vec<String>> {
        (**self).list_names()
    }
}

/// Errors for connector registry operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// A connector with the same name is already registered and the
    /// registry rejects duplicates.
    #[error("duplicate connector name: {0}")]
    DuplicateConnector(String),

    /// General storage or adapter failure.
    #[error("connector registry unavailable: {0}")]
    Unavailable(String),
}
