//! Submodule definitions and the builder that captures their schemas.

use std::fmt;
use std::sync::Arc;

use super::{
    CommandTemplate, ConnectorInstance, HandlerError, ParameterSchema, ParameterSpec,
    ResolvedParameters, SchemaError,
};

/// Native handler signature.
///
/// The handler receives the connector instance it runs on and exactly the
/// parameters its schema declares.
pub type NativeHandler = Arc<
    dyn Fn(&ConnectorInstance<'_>, &ResolvedParameters) -> Result<String, HandlerError>
        + Send
        + Sync,
>;

/// The code a submodule runs once its parameters are resolved.
#[derive(Clone)]
pub enum SubmoduleHandler {
    /// A Rust closure.
    Native(NativeHandler),
    /// A command template.
    Template(CommandTemplate),
}

impl SubmoduleHandler {
    pub(crate) fn call(
        &self,
        instance: &ConnectorInstance<'_>,
        parameters: &ResolvedParameters,
    ) -> Result<String, HandlerError> {
        match self {
            Self::Native(handler) => handler(instance, parameters),
            Self::Template(template) => template.render(instance.name(), parameters),
        }
    }
}

impl fmt::Debug for SubmoduleHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Native(_) => f.write_str("Native(..)"),
            Self::Template(template) => f.debug_tuple("Template").field(template).finish(),
        }
    }
}

/// One invocation variant of a connector.
#[derive(Debug, Clone)]
pub struct SubmoduleDefinition {
    key: String,
    schema: ParameterSchema,
    handler: SubmoduleHandler,
    doc: Option<String>,
}

impl SubmoduleDefinition {
    /// Human-readable key, unique within the owning connector.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Parameter schema captured when the submodule was built.
    #[must_use]
    pub const fn schema(&self) -> &ParameterSchema {
        &self.schema
    }

    /// The submodule's handler.
    #[must_use]
    pub const fn handler(&self) -> &SubmoduleHandler {
        &self.handler
    }

    /// Documentation text, if any.
    #[must_use]
    pub fn doc(&self) -> Option<&str> {
        self.doc.as_deref()
    }
}

enum PendingHandler {
    Native(NativeHandler),
    Template(String),
}

/// Declares a submodule: key, parameters, documentation, and handler.
///
/// The schema is captured once by [`SubmoduleBuilder::build`], which the
/// connector builder calls at definition time.
pub struct SubmoduleBuilder {
    key: String,
    parameters: Vec<ParameterSpec>,
    doc: Option<String>,
    handler: Option<PendingHandler>,
}

impl SubmoduleBuilder {
    /// Starts a submodule declaration.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            parameters: Vec::new(),
            doc: None,
            handler: None,
        }
    }

    /// Appends a parameter declaration.
    #[must_use]
    pub fn parameter(mut self, spec: ParameterSpec) -> Self {
        self.parameters.push(spec);
        self
    }

    /// Attaches documentation text.
    #[must_use]
    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// Uses a Rust closure as the handler.
    #[must_use]
    pub fn handler<F>(mut self, handler: F) -> Self
    where
        F: Fn(&ConnectorInstance<'_>, &ResolvedParameters) -> Result<String, HandlerError>
            + Send
            + Sync
            + 'static,
    {
        self.handler = Some(PendingHandler::Native(Arc::new(handler)));
        self
    }

    /// Uses a command template as the handler.
    #[must_use]
    pub fn template(mut self, source: impl Into<String>) -> Self {
        self.handler = Some(PendingHandler::Template(source.into()));
        self
    }

    /// Returns the submodule key being declared.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Captures the schema and finalizes the submodule.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError`] when the key is empty, the parameters do not
    /// form a valid schema, no handler was supplied, or the template fails
    /// its checks.
    pub fn build(self, connector: &str) -> Result<SubmoduleDefinition, SchemaError> {
        let Self {
            key,
            parameters,
            doc,
            handler: pending,
        } = self;

        if key.trim().is_empty() {
            return Err(SchemaError::EmptySubmoduleKey {
                connector: connector.to_owned(),
            });
        }

        let schema = ParameterSchema::capture(&key, parameters)?;
        let handler = match pending {
            Some(PendingHandler::Native(native)) => SubmoduleHandler::Native(native),
            Some(PendingHandler::Template(source)) => {
                SubmoduleHandler::Template(CommandTemplate::compile(&key, source, &schema)?)
            }
            None => return Err(SchemaError::MissingHandler { submodule: key }),
        };

        Ok(SubmoduleDefinition {
            key,
            schema,
            handler,
            doc: doc
                .map(|text| text.trim().to_owned())
                .filter(|text| !text.is_empty()),
        })
    }
}
