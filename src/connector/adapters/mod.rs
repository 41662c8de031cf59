//! Adapter implementations for connector ports.

pub mod memory;
pub mod process;
