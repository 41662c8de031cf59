//! Connector domain model.
//!
//! Definitions, schemas, and instances are plain values; the resolution
//! engine lives on [`ConnectorInstance`].

mod definition;
mod descriptor;
mod error;
mod instance;
mod resolution;
mod schema;
mod submodule;
mod template;
mod value;

pub use definition::{ConnectorBuilder, ConnectorDefinition};
pub use descriptor::{CatalogReport, ConnectorDescriptor, FieldDescriptor, SubmoduleDescriptor};
pub use error::{ConnectorError, ErrorKind, HandlerError, SchemaError};
pub use instance::{ConnectorInstance, OverrideBag};
pub use resolution::ResolvedParameters;
pub use schema::{ParameterSchema, ParameterSpec};
pub use submodule::{NativeHandler, SubmoduleBuilder, SubmoduleDefinition, SubmoduleHandler};
pub use template::{CONNECTOR_VARIABLE, CommandTemplate, shell_quote};
pub use value::{ParameterType, ParameterValue};
