//! Parameter type tags and the values bound to them.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use super::ConnectorError;

/// Declared type of a connector parameter.
///
/// Parameters declared without a type are treated as [`ParameterType::String`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterType {
    /// Free-form text.
    #[default]
    String,
    /// Signed integer.
    Integer,
    /// Floating-point number.
    Float,
    /// `true` or `false`.
    Boolean,
    /// Ordered list of strings.
    StringList,
    /// Any JSON value.
    Other,
}

impl ParameterType {
    /// Returns the wire name of the type tag.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Boolean => "boolean",
            Self::StringList => "string_list",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for ParameterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A concrete parameter value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ParameterValue {
    /// Text value.
    String(String),
    /// Integer value.
    Integer(i64),
    /// Floating-point value.
    Float(f64),
    /// Boolean value.
    Boolean(bool),
    /// List of strings.
    StringList(Vec<String>),
    /// Arbitrary JSON for [`ParameterType::Other`] parameters.
    Json(Value),
}

impl ParameterValue {
    /// Returns the type tag this value carries.
    #[must_use]
    pub const fn parameter_type(&self) -> ParameterType {
        match self {
            Self::String(_) => ParameterType::String,
            Self::Integer(_) => ParameterType::Integer,
            Self::Float(_) => ParameterType::Float,
            Self::Boolean(_) => ParameterType::Boolean,
            Self::StringList(_) => ParameterType::StringList,
            Self::Json(_) => ParameterType::Other,
        }
    }

    /// Converts the value to `target`.
    ///
    /// Values already of the target type pass unchanged, integers widen to
    /// floats, and text is parsed into the target type. `Other` accepts any
    /// value; text bound to it is read as JSON when it parses.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectorError::InvalidParameterValue`] naming `parameter`
    /// when the value cannot be represented as `target`.
    pub fn coerce(self, parameter: &str, target: ParameterType) -> Result<Self, ConnectorError> {
        if self.parameter_type() == target {
            return Ok(self);
        }

        match (self, target) {
            (Self::String(raw), _) => parse_text(parameter, &raw, target),
            (Self::Integer(number), ParameterType::Float) => Ok(Self::Float(widen(number))),
            (Self::Json(Value::String(raw)), _) => parse_text(parameter, &raw, target),
            (value, ParameterType::Other) => Ok(Self::Json(value.to_json())),
            (value, _) => Err(ConnectorError::InvalidParameterValue {
                parameter: parameter.to_owned(),
                reason: format!("expected {target}, got {}", value.parameter_type()),
            }),
        }
    }

    /// Returns the value as JSON.
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::String(text) => Value::String(text.clone()),
            Self::Integer(number) => Value::from(*number),
            Self::Float(number) => Value::from(*number),
            Self::Boolean(flag) => Value::Bool(*flag),
            Self::StringList(items) => Value::from(items.clone()),
            Self::Json(value) => value.clone(),
        }
    }
}

#[expect(
    clippy::cast_precision_loss,
    reason = "integer parameters bound to float slots accept the nearest representable value"
)]
const fn widen(number: i64) -> f64 {
    number as f64
}

fn parse_text(
    parameter: &str,
    raw: &str,
    target: ParameterType,
) -> Result<ParameterValue, ConnectorError> {
    let invalid = |reason: &str| ConnectorError::InvalidParameterValue {
        parameter: parameter.to_owned(),
        reason: reason.to_owned(),
    };

    match target {
        ParameterType::String => Ok(ParameterValue::String(raw.to_owned())),
        ParameterType::Integer => raw
            .trim()
            .parse::<i64>()
            .map(ParameterValue::Integer)
            .map_err(|_| invalid("expected an integer")),
        ParameterType::Float => raw
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|number| number.is_finite())
            .map(ParameterValue::Float)
            .ok_or_else(|| invalid("expected a finite number")),
        // Unchecked form checkboxes arrive as empty strings.
        ParameterType::Boolean => match raw.trim().to_ascii_lowercase().as_str() {
            "true" => Ok(ParameterValue::Boolean(true)),
            "false" | "" => Ok(ParameterValue::Boolean(false)),
            _ => Err(invalid("expected true or false")),
        },
        ParameterType::StringList => Ok(ParameterValue::StringList(
            raw.split(',')
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(ToOwned::to_owned)
                .collect(),
        )),
        ParameterType::Other => Ok(ParameterValue::Json(
            serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_owned())),
        )),
    }
}

impl From<&str> for ParameterValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for ParameterValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<i64> for ParameterValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for ParameterValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for ParameterValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<Vec<String>> for ParameterValue {
    fn from(value: Vec<String>) -> Self {
        Self::StringList(value)
    }
}

impl From<Value> for ParameterValue {
    fn from(value: Value) -> Self {
        Self::Json(value)
    }
}
