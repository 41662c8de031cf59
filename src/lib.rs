//! Syntac: a catalog of command-line tool connectors.
//!
//! A connector wraps an external command-line tool. It declares global
//! fields shared by its submodules, and each submodule declares its own
//! parameter schema and a handler that synthesizes a command string.
//!
//! # Architecture
//!
//! Syntac follows hexagonal architecture principles:
//!
//! - **Domain**: schemas, definitions, instances, and the resolution engine
//! - **Ports**: the registry lookup contract
//! - **Adapters**: in-memory and process-wide registries
//! - **Services**: the describe and invoke call shapes
//!
//! # Modules
//!
//! - [`connector`]: Registration, parameter resolution, and invocation
//! - [`connectors`]: Built-in connector catalog and bootstrap
//! - [`config`]: TOML configuration

pub mod config;
pub mod connector;
pub mod connectors;
