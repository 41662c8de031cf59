//! Presentation-oriented projection of connector definitions.
//!
//! Descriptors carry everything a form renderer needs and nothing that can
//! run: building one never touches a handler.

use serde::Serialize;
use serde_json::Value;
use std::collections::HashSet;
use std::fmt;

use super::{ConnectorDefinition, ParameterSpec, ParameterType};

/// One renderable input field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldDescriptor {
    /// Parameter name.
    pub name: String,
    /// Declared type.
    #[serde(rename = "type")]
    pub parameter_type: ParameterType,
    /// Declared default, or the empty string when none is declared.
    pub default: Value,
    /// Whether the parameter has no declared default.
    pub required: bool,
}

impl From<&ParameterSpec> for FieldDescriptor {
    fn from(spec: &ParameterSpec) -> Self {
        Self {
            name: spec.name.clone(),
            parameter_type: spec.parameter_type,
            default: spec
                .default
                .as_ref()
                .map_or_else(|| Value::String(String::new()), |value| value.to_json()),
            required: spec.is_required(),
        }
    }
}

/// A submodule's key, its fields beyond the connector globals, and its docs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmoduleDescriptor {
    /// Submodule key.
    pub key: String,
    /// Parameters not already covered by a global field.
    pub extras: Vec<FieldDescriptor>,
    /// Documentation text.
    pub doc: Option<String>,
}

/// Describe-shaped view of a connector.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConnectorDescriptor {
    /// Connector name.
    pub name: String,
    /// Connector description.
    pub description: String,
    /// Global fields in declaration order.
    pub globals: Vec<FieldDescriptor>,
    /// Submodules in declaration order.
    pub submodules: Vec<SubmoduleDescriptor>,
}

impl From<&ConnectorDefinition> for ConnectorDescriptor {
    fn from(definition: &ConnectorDefinition) -> Self {
        let global_schema = definition.global_schema();
        let global_names: HashSet<&str> = global_schema.names().collect();

        let submodules = definition
            .submodules()
            .map(|submodule| SubmoduleDescriptor {
                key: submodule.key().to_owned(),
                extras: submodule
                    .schema()
                    .iter()
                    .filter(|spec| !global_names.contains(spec.name.as_str()))
                    .map(FieldDescriptor::from)
                    .collect(),
                doc: submodule.doc().map(ToOwned::to_owned),
            })
            .collect();

        Self {
            name: definition.name().to_owned(),
            description: definition.description().to_owned(),
            globals: global_schema.iter().map(FieldDescriptor::from).collect(),
            submodules,
        }
    }
}

/// Plain-text tree listing of connectors, their globals, and submodule extras.
///
/// ```text
/// ┌─ Connector: SMB
/// │  Global fields:
/// │    - host: string (default: "")
/// │  Submodules:
/// │    - List Shares (NetExec):
/// │      - is_ntlm: boolean (default: false)
/// └────────────────────────────────────────
/// ```
pub struct CatalogReport<'a>(pub &'a [ConnectorDescriptor]);

impl fmt::Display for CatalogReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for connector in self.0 {
            writeln!(f, "┌─ Connector: {}", connector.name)?;
            if !connector.description.is_empty() {
                writeln!(f, "│  {}", connector.description)?;
            }

            writeln!(f, "│  Global fields:")?;
            if connector.globals.is_empty() {
                writeln!(f, "│    - None")?;
            }
            for field in &connector.globals {
                writeln!(f, "│    - {}", FieldLine(field))?;
            }

            writeln!(f, "│  Submodules:")?;
            if connector.submodules.is_empty() {
                writeln!(f, "│    - None")?;
            }
            for submodule in &connector.submodules {
                writeln!(f, "│    - {}:", submodule.key)?;
                if submodule.extras.is_empty() {
                    writeln!(f, "│        (No parameters)")?;
                }
                for field in &submodule.extras {
                    writeln!(f, "│      - {}", FieldLine(field))?;
                }
            }
            writeln!(f, "└{}", "─".repeat(40))?;
        }
        Ok(())
    }
}

struct FieldLine<'a>(&'a FieldDescriptor);

impl fmt::Display for FieldLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let field = self.0;
        write!(f, "{}: {} (default: ", field.name, field.parameter_type)?;
        if field.required {
            f.write_str("<not specified>")?;
        } else {
            match &field.default {
                Value::String(text) if text.is_empty() => f.write_str("\"\"")?,
                Value::String(text) => f.write_str(text)?,
                other => write!(f, "{other}")?,
            }
        }
        f.write_str(")")
    }
}
