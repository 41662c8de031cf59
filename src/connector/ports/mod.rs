//! Port contracts for connector lookup.

pub mod registry;

pub use registry::{ConnectorRegistry, RegistryError, RegistryResult};
