//! Connector registration, parameter resolution, and invocation.
//!
//! The module follows hexagonal architecture:
//!
//! - Domain types, schema capture, and the resolution engine in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
