//! Demonstration connector exercising each parameter type.

use crate::connector::domain::{
    ConnectorDefinition, ConnectorInstance, HandlerError, ParameterSpec, ParameterType,
    ResolvedParameters, SchemaError, SubmoduleBuilder,
};

/// Registry name.
pub const NAME: &str = "Demo";

/// Builds the Demo connector.
///
/// # Errors
///
/// Returns [`SchemaError`] if a declaration is malformed.
pub fn definition() -> Result<ConnectorDefinition, SchemaError> {
    ConnectorDefinition::builder(NAME, "Examples of submodule declarations")
        .submodule(
            SubmoduleBuilder::new("Example Submodule")
                .doc(
                    "This is an example submodule.\n\n\
                     It demonstrates **bold** text, *italic* text, and \
                     [links](https://example.com).",
                )
                .template("Example submodule executed."),
        )
        .submodule(
            SubmoduleBuilder::new("Python - Hello World")
                .parameter(ParameterSpec::text("code", "Hello, World!"))
                .doc("Prints a given string in Python.")
                .template("print(\"{{ code }}\")"),
        )
        .submodule(
            SubmoduleBuilder::new("Python - Add Numbers (Integers)")
                .parameter(ParameterSpec::optional("a", ParameterType::Integer, 1_i64))
                .parameter(ParameterSpec::optional("b", ParameterType::Integer, 1_i64))
                .doc("Adds two integers.")
                .template("{{ a + b }}"),
        )
        .submodule(
            SubmoduleBuilder::new("Python - Add Numbers (Floats)")
                .parameter(ParameterSpec::optional("a", ParameterType::Float, 1.0))
                .parameter(ParameterSpec::optional("b", ParameterType::Float, 1.0))
                .doc("Adds two floating-point numbers.")
                .template("{{ a + b }}"),
        )
        .submodule(
            SubmoduleBuilder::new("rot13")
                .parameter(ParameterSpec::text("text", "Hello, World!"))
                .doc("Rotates the letters of a string by 13 positions in the alphabet.")
                .handler(rot13),
        )
        .build()
}

fn rot13(
    _instance: &ConnectorInstance<'_>,
    parameters: &ResolvedParameters,
) -> Result<String, HandlerError> {
    Ok(parameters
        .text("text")?
        .chars()
        .map(|ch| match ch {
            'a'..='m' | 'A'..='M' => char::from_u32(u32::from(ch) + 13).unwrap_or(ch),
            'n'..='z' | 'N'..='Z' => char::from_u32(u32::from(ch) - 13).unwrap_or(ch),
            other => other,
        })
        .collect())
}
