//! Error types for connector definition, resolution, and invocation.

use thiserror::Error;

use super::ParameterType;

/// Opaque failure raised by a connector's own handler logic.
///
/// The engine never inspects or rewrites these; they reach the caller with
/// the message the handler produced.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct HandlerError {
    message: String,
}

impl HandlerError {
    /// Creates a handler error carrying the given message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Returns the handler's message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Errors raised while a connector definition is being built.
///
/// All of these surface at definition time so that a malformed connector
/// never reaches the registry.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SchemaError {
    /// Connector name is empty after trimming.
    #[error("connector name must not be empty")]
    EmptyConnectorName,

    /// A parameter was declared without a name.
    #[error("parameter declared on '{owner}' has an empty name")]
    EmptyParameterName {
        /// Connector or submodule declaring the parameter.
        owner: String,
    },

    /// The same parameter name was declared twice in one schema.
    #[error("duplicate parameter '{parameter}' declared on '{owner}'")]
    DuplicateParameter {
        /// Connector or submodule declaring the parameter.
        owner: String,
        /// Duplicated parameter name.
        parameter: String,
    },

    /// A declared default cannot be represented as the declared type.
    #[error("default for parameter '{parameter}' on '{owner}' is not a valid {expected}")]
    DefaultTypeMismatch {
        /// Connector or submodule declaring the parameter.
        owner: String,
        /// Parameter name.
        parameter: String,
        /// Declared parameter type.
        expected: ParameterType,
    },

    /// Submodule key is empty after trimming.
    #[error("submodule declared on connector '{connector}' has an empty key")]
    EmptySubmoduleKey {
        /// Owning connector name.
        connector: String,
    },

    /// Two submodules of one connector share a key.
    #[error("duplicate submodule '{submodule}' on connector '{connector}'")]
    DuplicateSubmodule {
        /// Owning connector name.
        connector: String,
        /// Duplicated submodule key.
        submodule: String,
    },

    /// Submodule was declared without a handler.
    #[error("submodule '{submodule}' has no handler")]
    MissingHandler {
        /// Submodule key.
        submodule: String,
    },

    /// Template source failed to compile.
    #[error("template for submodule '{submodule}' is invalid: {reason}")]
    InvalidTemplate {
        /// Submodule key.
        submodule: String,
        /// Compiler message.
        reason: String,
    },

    /// Template references a variable the schema does not declare.
    #[error("template for submodule '{submodule}' references undeclared variable '{variable}'")]
    UndeclaredTemplateVariable {
        /// Submodule key.
        submodule: String,
        /// Variable name.
        variable: String,
    },
}

/// Caller-facing classification of a [`ConnectorError`].
///
/// Transport adapters map these onto their own status vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The named connector or submodule does not exist.
    NotFound,
    /// The supplied values cannot satisfy the submodule schema.
    BadRequest,
    /// The handler or the registry failed.
    Internal,
}

/// Errors for connector lookup, parameter resolution, and invocation.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConnectorError {
    /// Connector is not known to the registry.
    #[error("connector '{0}' was not found")]
    UnknownConnector(String),

    /// Submodule key is not declared by the connector.
    #[error("connector '{connector}' has no submodule '{submodule}'")]
    UnknownSubmodule {
        /// Connector name.
        connector: String,
        /// Requested submodule key.
        submodule: String,
    },

    /// No override, global, or default supplies a required parameter.
    #[error("submodule '{submodule}' is missing required parameter '{parameter}'")]
    MissingRequiredParameter {
        /// Submodule key.
        submodule: String,
        /// Missing parameter name.
        parameter: String,
    },

    /// A supplied value cannot be converted to the declared type.
    #[error("invalid value for parameter '{parameter}': {reason}")]
    InvalidParameterValue {
        /// Parameter name.
        parameter: String,
        /// Conversion failure reason.
        reason: String,
    },

    /// An instance was created with a field the global schema lacks.
    #[error("connector '{connector}' has no global field '{field}'")]
    UnexpectedGlobalField {
        /// Connector name.
        connector: String,
        /// Unexpected field name.
        field: String,
    },

    /// The submodule handler failed.
    #[error(transparent)]
    Handler(#[from] HandlerError),

    /// Registry access failed.
    #[error("connector registry error: {0}")]
    Registry(String),
}

impl ConnectorError {
    /// Returns the caller-facing classification of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::UnknownConnector(_) | Self::UnknownSubmodule { .. } => ErrorKind::NotFound,
            Self::MissingRequiredParameter { .. }
            | Self::InvalidParameterValue { .. }
            | Self::UnexpectedGlobalField { .. } => ErrorKind::BadRequest,
            Self::Handler(_) | Self::Registry(_) => ErrorKind::Internal,
        }
    }
}
