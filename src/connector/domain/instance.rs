//! Request-scoped connector instances and the override bag fed to them.

use std::collections::BTreeMap;

use super::{ConnectorDefinition, ConnectorError, ParameterSchema, ParameterValue};

/// Caller-supplied values keyed by parameter name.
///
/// A bag may carry keys that no schema declares; resolution filters them
/// out instead of rejecting them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverrideBag {
    values: BTreeMap<String, ParameterValue>,
}

impl OverrideBag {
    /// Creates an empty bag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a bag from a flat string mapping, such as submitted form data.
    #[must_use]
    pub fn from_raw(values: &BTreeMap<String, String>) -> Self {
        values
            .iter()
            .map(|(name, raw)| (name.clone(), ParameterValue::String(raw.clone())))
            .collect()
    }

    /// Adds a value, replacing any previous value for `name`.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<ParameterValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Inserts a value, returning the one it replaced.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        value: impl Into<ParameterValue>,
    ) -> Option<ParameterValue> {
        self.values.insert(name.into(), value.into())
    }

    /// Returns the value for `name`, if supplied.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ParameterValue> {
        self.values.get(name)
    }

    /// Returns `true` when `name` was supplied.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Iterates supplied values ordered by name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParameterValue)> {
        self.values.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Number of supplied values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` when nothing was supplied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Partitions the bag into values for global fields and everything else.
    #[must_use]
    pub fn split_globals(self, schema: &ParameterSchema) -> (Self, Self) {
        let (globals, rest): (BTreeMap<_, _>, BTreeMap<_, _>) = self
            .values
            .into_iter()
            .partition(|(name, _)| schema.contains(name));
        (Self { values: globals }, Self { values: rest })
    }
}

impl FromIterator<(String, ParameterValue)> for OverrideBag {
    fn from_iter<I: IntoIterator<Item = (String, ParameterValue)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

/// A connector definition bound to concrete global field values.
///
/// Instances live for a single call and are never shared between callers.
#[derive(Debug, Clone)]
pub struct ConnectorInstance<'a> {
    definition: &'a ConnectorDefinition,
    globals: BTreeMap<String, ParameterValue>,
}

impl<'a> ConnectorInstance<'a> {
    /// Binds each global field to its supplied value or its default.
    ///
    /// Supplied values are stored as given. They are converted only when a
    /// submodule that declares the field resolves them, so a value no
    /// submodule reads never fails a call. Global fields with neither a
    /// value nor a default stay unbound.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectorError::UnexpectedGlobalField`] when `globals`
    /// names a field the global schema lacks.
    pub fn new(
        definition: &'a ConnectorDefinition,
        globals: OverrideBag,
    ) -> Result<Self, ConnectorError> {
        let schema = definition.global_schema();
        if let Some((field, _)) = globals.iter().find(|(name, _)| !schema.contains(name)) {
            return Err(ConnectorError::UnexpectedGlobalField {
                connector: definition.name().to_owned(),
                field: field.to_owned(),
            });
        }

        let mut supplied = globals.values;
        let mut bound = BTreeMap::new();
        for spec in schema {
            if let Some(value) = supplied.remove(&spec.name).or_else(|| spec.default.clone()) {
                bound.insert(spec.name.clone(), value);
            }
        }

        Ok(Self {
            definition,
            globals: bound,
        })
    }

    /// Binds every global field to its default.
    #[must_use]
    pub fn with_defaults(definition: &'a ConnectorDefinition) -> Self {
        let globals = definition
            .global_schema()
            .iter()
            .filter_map(|spec| {
                spec.default
                    .clone()
                    .map(|default| (spec.name.clone(), default))
            })
            .collect();
        Self {
            definition,
            globals,
        }
    }

    /// Connector name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.definition.name()
    }

    /// The definition this instance binds.
    #[must_use]
    pub const fn definition(&self) -> &'a ConnectorDefinition {
        self.definition
    }

    /// Bound value of a global field.
    #[must_use]
    pub fn global(&self, name: &str) -> Option<&ParameterValue> {
        self.globals.get(name)
    }

    /// Iterates bound global values ordered by name.
    pub fn globals(&self) -> impl Iterator<Item = (&str, &ParameterValue)> {
        self.globals
            .iter()
            .map(|(name, value)| (name.as_str(), value))
    }
}
