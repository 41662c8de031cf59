//! Command templates rendered with resolved submodule parameters.
//!
//! Templates use `minijinja` syntax. The render context holds every
//! resolved parameter plus the reserved `connector` variable naming the
//! owning connector. The `shell_quote` filter wraps a value for safe
//! inclusion in a POSIX shell command.

use minijinja::{Environment, UndefinedBehavior};
use serde_json::{Map, Value};

use super::{HandlerError, ParameterSchema, ResolvedParameters, SchemaError};

/// Context variable holding the connector name.
pub const CONNECTOR_VARIABLE: &str = "connector";

/// A compiled-and-checked command template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandTemplate {
    source: String,
}

impl CommandTemplate {
    /// Checks `source` against `schema` and wraps it.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::InvalidTemplate`] when the source does not
    /// compile, or [`SchemaError::UndeclaredTemplateVariable`] when it reads a
    /// variable that is neither a schema parameter nor `connector`.
    pub fn compile(
        submodule: &str,
        source: impl Into<String>,
        schema: &ParameterSchema,
    ) -> Result<Self, SchemaError> {
        let owned = source.into();
        let environment = environment();
        let template =
            environment
                .template_from_str(&owned)
                .map_err(|error| SchemaError::InvalidTemplate {
                    submodule: submodule.to_owned(),
                    reason: error.to_string(),
                })?;

        let mut undeclared: Vec<String> = template
            .undeclared_variables(false)
            .into_iter()
            .filter(|variable| variable != CONNECTOR_VARIABLE && !schema.contains(variable))
            .collect();
        undeclared.sort();
        if let Some(variable) = undeclared.into_iter().next() {
            return Err(SchemaError::UndeclaredTemplateVariable {
                submodule: submodule.to_owned(),
                variable,
            });
        }

        Ok(Self { source: owned })
    }

    /// Returns the template source.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Renders the template, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`HandlerError`] when rendering fails.
    pub fn render(
        &self,
        connector: &str,
        parameters: &ResolvedParameters,
    ) -> Result<String, HandlerError> {
        let context = build_template_context(connector, parameters);
        environment()
            .render_str(&self.source, context)
            .map(|rendered| rendered.trim().to_owned())
            .map_err(|error| HandlerError::new(format!("template rendering failed: {error}")))
    }
}

fn environment<'source>() -> Environment<'source> {
    let mut environment = Environment::new();
    environment.set_undefined_behavior(UndefinedBehavior::Strict);
    environment.add_filter("shell_quote", shell_quote);
    environment
}

fn build_template_context(connector: &str, parameters: &ResolvedParameters) -> Map<String, Value> {
    let mut context = Map::new();
    context.insert(
        CONNECTOR_VARIABLE.to_owned(),
        Value::String(connector.to_owned()),
    );
    for (name, value) in parameters.iter() {
        context.insert(name.to_owned(), value.to_json());
    }
    context
}

/// Wraps a value in single quotes for a POSIX shell, closing and reopening
/// the quotes around each embedded `'`.
#[must_use]
pub fn shell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}
