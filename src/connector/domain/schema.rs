//! Parameter schemas captured at definition time.

use serde::Serialize;
use std::collections::HashSet;

use super::{ParameterType, ParameterValue, SchemaError};

/// Declaration of a single parameter: name, type, and optional default.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParameterSpec {
    /// Parameter name.
    pub name: String,
    /// Declared type.
    #[serde(rename = "type")]
    pub parameter_type: ParameterType,
    /// Declared default; `None` marks the parameter as required.
    pub default: Option<ParameterValue>,
}

impl ParameterSpec {
    /// Declares a parameter with no default.
    #[must_use]
    pub fn required(name: impl Into<String>, parameter_type: ParameterType) -> Self {
        Self {
            name: name.into(),
            parameter_type,
            default: None,
        }
    }

    /// Declares a parameter with a default.
    #[must_use]
    pub fn optional(
        name: impl Into<String>,
        parameter_type: ParameterType,
        default: impl Into<ParameterValue>,
    ) -> Self {
        Self {
            name: name.into(),
            parameter_type,
            default: Some(default.into()),
        }
    }

    /// Declares a text parameter with a default.
    #[must_use]
    pub fn text(name: impl Into<String>, default: &str) -> Self {
        Self::optional(name, ParameterType::String, default)
    }

    /// Declares a boolean parameter with a default.
    #[must_use]
    pub fn flag(name: impl Into<String>, default: bool) -> Self {
        Self::optional(name, ParameterType::Boolean, default)
    }

    /// Returns `true` when no default is declared.
    #[must_use]
    pub const fn is_required(&self) -> bool {
        self.default.is_none()
    }
}

/// Ordered parameter schema with unique names.
///
/// Schemas are built once through [`ParameterSchema::capture`] and never
/// change afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ParameterSchema {
    parameters: Vec<ParameterSpec>,
}

impl ParameterSchema {
    /// Captures a schema from parameter declarations, preserving their order.
    ///
    /// Defaults are normalized to the declared type, so a float parameter
    /// declared with an integer default stores the widened float.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError`] when a name is empty or repeated, or when a
    /// default cannot be represented as its declared type. `owner` names the
    /// connector or submodule in the error.
    pub fn capture(
        owner: &str,
        declarations: impl IntoIterator<Item = ParameterSpec>,
    ) -> Result<Self, SchemaError> {
        let mut names = HashSet::new();
        let mut parameters = Vec::new();

        for mut spec in declarations {
            if spec.name.trim().is_empty() {
                return Err(SchemaError::EmptyParameterName {
                    owner: owner.to_owned(),
                });
            }
            if !names.insert(spec.name.clone()) {
                return Err(SchemaError::DuplicateParameter {
                    owner: owner.to_owned(),
                    parameter: spec.name,
                });
            }
            if let Some(default) = spec.default.take() {
                let normalized = default
                    .coerce(&spec.name, spec.parameter_type)
                    .map_err(|_| SchemaError::DefaultTypeMismatch {
                        owner: owner.to_owned(),
                        parameter: spec.name.clone(),
                        expected: spec.parameter_type,
                    })?;
                spec.default = Some(normalized);
            }
            parameters.push(spec);
        }

        Ok(Self { parameters })
    }

    /// Returns the declaration for `name`, if any.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ParameterSpec> {
        self.parameters.iter().find(|spec| spec.name == name)
    }

    /// Returns `true` when the schema declares `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Iterates declarations in declared order.
    pub fn iter(&self) -> impl Iterator<Item = &ParameterSpec> {
        self.parameters.iter()
    }

    /// Iterates parameter names in declared order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.parameters.iter().map(|spec| spec.name.as_str())
    }

    /// Number of declared parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    /// Returns `true` when no parameters are declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }
}

impl<'a> IntoIterator for &'a ParameterSchema {
    type Item = &'a ParameterSpec;
    type IntoIter = std::slice::Iter<'a, ParameterSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.parameters.iter()
    }
}
