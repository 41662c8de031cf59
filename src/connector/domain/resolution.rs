//! Parameter resolution and submodule invocation.
//!
//! A submodule parameter takes the first value found in this order:
//!
//! 1. the call-time override,
//! 2. the instance's global field value,
//! 3. the submodule's declared default.
//!
//! Parameters with none of these fail with
//! [`ConnectorError::MissingRequiredParameter`]. Override keys the schema
//! does not declare are filtered out.

use serde::{Serialize, Serializer};
use tracing::debug;

use super::{
    ConnectorError, ConnectorInstance, HandlerError, OverrideBag, ParameterType, ParameterValue,
    SubmoduleDefinition,
};

/// The argument set passed to a handler, in schema order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedParameters {
    values: Vec<(String, ParameterValue)>,
}

impl ResolvedParameters {
    /// Returns the value bound to `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ParameterValue> {
        self.values
            .iter()
            .find(|(bound, _)| bound == name)
            .map(|(_, value)| value)
    }

    /// Iterates bindings in schema order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParameterValue)> {
        self.values
            .iter()
            .map(|(name, value)| (name.as_str(), value))
    }

    /// Number of bound parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` when nothing is bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns a text parameter.
    ///
    /// # Errors
    ///
    /// Returns [`HandlerError`] when the parameter is absent or not text.
    pub fn text(&self, name: &str) -> Result<&str, HandlerError> {
        match self.require(name)? {
            ParameterValue::String(text) => Ok(text),
            other => Err(type_mismatch(name, ParameterType::String, other)),
        }
    }

    /// Returns a boolean parameter.
    ///
    /// # Errors
    ///
    /// Returns [`HandlerError`] when the parameter is absent or not boolean.
    pub fn flag(&self, name: &str) -> Result<bool, HandlerError> {
        match self.require(name)? {
            ParameterValue::Boolean(flag) => Ok(*flag),
            other => Err(type_mismatch(name, ParameterType::Boolean, other)),
        }
    }

    /// Returns an integer parameter.
    ///
    /// # Errors
    ///
    /// Returns [`HandlerError`] when the parameter is absent or not an integer.
    pub fn integer(&self, name: &str) -> Result<i64, HandlerError> {
        match self.require(name)? {
            ParameterValue::Integer(number) => Ok(*number),
            other => Err(type_mismatch(name, ParameterType::Integer, other)),
        }
    }

    /// Returns a float parameter.
    ///
    /// # Errors
    ///
    /// Returns [`HandlerError`] when the parameter is absent or not a float.
    pub fn float(&self, name: &str) -> Result<f64, HandlerError> {
        match self.require(name)? {
            ParameterValue::Float(number) => Ok(*number),
            other => Err(type_mismatch(name, ParameterType::Float, other)),
        }
    }

    /// Returns a string-list parameter.
    ///
    /// # Errors
    ///
    /// Returns [`HandlerError`] when the parameter is absent or not a list.
    pub fn list(&self, name: &str) -> Result<&[String], HandlerError> {
        match self.require(name)? {
            ParameterValue::StringList(items) => Ok(items),
            other => Err(type_mismatch(name, ParameterType::StringList, other)),
        }
    }

    fn require(&self, name: &str) -> Result<&ParameterValue, HandlerError> {
        self.get(name)
            .ok_or_else(|| HandlerError::new(format!("parameter '{name}' is not bound")))
    }
}

fn type_mismatch(name: &str, expected: ParameterType, found: &ParameterValue) -> HandlerError {
    HandlerError::new(format!(
        "parameter '{name}' is {}, expected {expected}",
        found.parameter_type()
    ))
}

impl Serialize for ResolvedParameters {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.values.iter().map(|(name, value)| (name, value)))
    }
}

impl ConnectorInstance<'_> {
    /// Resolves the argument set for submodule `key`.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectorError::UnknownSubmodule`] when the connector has no
    /// submodule `key`, [`ConnectorError::MissingRequiredParameter`] when a
    /// parameter has no value at any layer, or
    /// [`ConnectorError::InvalidParameterValue`] when a supplied value does
    /// not fit the parameter's type.
    pub fn resolve(
        &self,
        key: &str,
        overrides: &OverrideBag,
    ) -> Result<ResolvedParameters, ConnectorError> {
        let submodule = self.lookup_submodule(key)?;
        self.resolve_for(submodule, overrides)
    }

    /// Resolves parameters for submodule `key` and invokes its handler.
    ///
    /// The handler's output is returned unchanged.
    ///
    /// # Errors
    ///
    /// Returns the resolution errors of [`ConnectorInstance::resolve`], or
    /// [`ConnectorError::Handler`] carrying the handler's own failure.
    pub fn run_submodule(
        &self,
        key: &str,
        overrides: &OverrideBag,
    ) -> Result<String, ConnectorError> {
        let submodule = self.lookup_submodule(key)?;
        let parameters = self.resolve_for(submodule, overrides)?;
        debug!(
            connector = self.name(),
            submodule = key,
            parameters = parameters.len(),
            ignored = overrides
                .iter()
                .filter(|(name, _)| !submodule.schema().contains(name))
                .count(),
            "invoking submodule handler"
        );
        submodule
            .handler()
            .call(self, &parameters)
            .map_err(ConnectorError::from)
    }

    fn lookup_submodule(&self, key: &str) -> Result<&SubmoduleDefinition, ConnectorError> {
        self.definition()
            .submodule(key)
            .ok_or_else(|| ConnectorError::UnknownSubmodule {
                connector: self.name().to_owned(),
                submodule: key.to_owned(),
            })
    }

    fn resolve_for(
        &self,
        submodule: &SubmoduleDefinition,
        overrides: &OverrideBag,
    ) -> Result<ResolvedParameters, ConnectorError> {
        let mut values = Vec::with_capacity(submodule.schema().len());
        for spec in submodule.schema() {
            let candidate = overrides
                .get(&spec.name)
                .or_else(|| self.global(&spec.name));
            let value = match (candidate, &spec.default) {
                (Some(supplied), _) => supplied.clone().coerce(&spec.name, spec.parameter_type)?,
                (None, Some(default)) => default.clone(),
                (None, None) => {
                    return Err(ConnectorError::MissingRequiredParameter {
                        submodule: submodule.key().to_owned(),
                        parameter: spec.name.clone(),
                    });
                }
            };
            values.push((spec.name.clone(), value));
        }
        Ok(ResolvedParameters { values })
    }
}
