//! Connector definitions: global fields plus keyed submodules.

use std::collections::HashSet;

use super::{ParameterSchema, ParameterSpec, SchemaError, SubmoduleBuilder, SubmoduleDefinition};

/// The static shape of a connector.
///
/// Definitions are immutable once built. The registry shares them behind
/// `Arc`, and instances borrow them for the duration of one call.
#[derive(Debug, Clone)]
pub struct ConnectorDefinition {
    name: String,
    description: String,
    global_schema: ParameterSchema,
    submodules: Vec<SubmoduleDefinition>,
}

impl ConnectorDefinition {
    /// Starts a connector declaration.
    #[must_use]
    pub fn builder(name: impl Into<String>, description: impl Into<String>) -> ConnectorBuilder {
        ConnectorBuilder {
            name: name.into(),
            description: description.into(),
            globals: Vec::new(),
            submodules: Vec::new(),
        }
    }

    /// Registry key of the connector.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Human-readable description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Schema of the fields shared by all submodules.
    #[must_use]
    pub const fn global_schema(&self) -> &ParameterSchema {
        &self.global_schema
    }

    /// Finds a submodule by key.
    #[must_use]
    pub fn submodule(&self, key: &str) -> Option<&SubmoduleDefinition> {
        self.submodules
            .iter()
            .find(|submodule| submodule.key() == key)
    }

    /// Iterates submodules in declaration order.
    pub fn submodules(&self) -> impl Iterator<Item = &SubmoduleDefinition> {
        self.submodules.iter()
    }

    /// Iterates submodule keys in declaration order.
    pub fn submodule_keys(&self) -> impl Iterator<Item = &str> {
        self.submodules.iter().map(SubmoduleDefinition::key)
    }
}

/// Builder for [`ConnectorDefinition`].
pub struct ConnectorBuilder {
    name: String,
    description: String,
    globals: Vec<ParameterSpec>,
    submodules: Vec<SubmoduleBuilder>,
}

impl ConnectorBuilder {
    /// Declares a global field.
    #[must_use]
    pub fn global(mut self, spec: ParameterSpec) -> Self {
        self.globals.push(spec);
        self
    }

    /// Declares a submodule.
    #[must_use]
    pub fn submodule(mut self, submodule: SubmoduleBuilder) -> Self {
        self.submodules.push(submodule);
        self
    }

    /// Captures every schema and finalizes the definition.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError`] when the name is empty, two submodules share a
    /// key, or any global or submodule schema is invalid.
    pub fn build(self) -> Result<ConnectorDefinition, SchemaError> {
        let Self {
            name,
            description,
            globals,
            submodules: pending,
        } = self;

        if name.trim().is_empty() {
            return Err(SchemaError::EmptyConnectorName);
        }

        let global_schema = ParameterSchema::capture(&name, globals)?;

        let mut keys = HashSet::new();
        let mut submodules = Vec::with_capacity(pending.len());
        for builder in pending {
            if !keys.insert(builder.key().to_owned()) {
                return Err(SchemaError::DuplicateSubmodule {
                    connector: name,
                    submodule: builder.key().to_owned(),
                });
            }
            submodules.push(builder.build(&name)?);
        }

        Ok(ConnectorDefinition {
            name,
            description,
            global_schema,
            submodules,
        })
    }
}
