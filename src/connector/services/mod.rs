//! Orchestration services for connector description and invocation.

mod catalog;

pub use catalog::{ConnectorCatalogService, InvocationOutput};
