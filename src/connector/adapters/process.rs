//! Process-wide connector registry.
//!
//! The registry is populated exactly once. Concurrent first callers block on
//! the same initialization and all observe the fully populated table.

use once_cell::sync::OnceCell;
use tracing::info;

use super::memory::InMemoryConnectorRegistry;

/// A registry slot that is filled at most once.
#[derive(Debug, Default)]
pub struct RegistryCell {
    cell: OnceCell<InMemoryConnectorRegistry>,
}

impl RegistryCell {
    /// Creates an empty slot.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cell: OnceCell::new(),
        }
    }

    /// Returns the registry, running `bootstrap` if the slot is empty.
    ///
    /// Only one caller runs `bootstrap`; others wait for it. When bootstrap
    /// fails the slot stays empty and a later call may retry.
    ///
    /// # Errors
    ///
    /// Returns the bootstrap error unchanged.
    pub fn get_or_init<F, E>(&self, bootstrap: F) -> Result<&InMemoryConnectorRegistry, E>
    where
        F: FnOnce() -> Result<InMemoryConnectorRegistry, E>,
    {
        self.cell.get_or_try_init(|| {
            let registry = bootstrap()?;
            info!(connectors = registry.len(), "connector registry initialized");
            Ok(registry)
        })
    }

    /// Returns the registry if it has been initialized.
    #[must_use]
    pub fn get(&self) -> Option<&InMemoryConnectorRegistry> {
        self.cell.get()
    }
}

static PROCESS_REGISTRY: RegistryCell = RegistryCell::new();

/// Returns the process-wide registry, initializing it with `bootstrap` on
/// first use.
///
/// # Errors
///
/// Returns the bootstrap error unchanged.
pub fn global_registry<F, E>(bootstrap: F) -> Result<&'static InMemoryConnectorRegistry, E>
where
    F: FnOnce() -> Result<InMemoryConnectorRegistry, E>,
{
    PROCESS_REGISTRY.get_or_init(bootstrap)
}
