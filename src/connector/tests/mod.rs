//! Unit tests for connector schemas, resolution, registries, and services.

mod resolution_tests;
mod service_tests;
