//! BloodHound data collection.

use crate::connector::domain::{
    ConnectorDefinition, ConnectorInstance, HandlerError, ParameterSpec, ResolvedParameters,
    SchemaError, SubmoduleBuilder, shell_quote,
};

/// Registry name.
pub const NAME: &str = "BloodHound";

const COLLECT_NETEXEC: &str = concat!(
    "nxc ldap {{ domain | shell_quote }} -u {{ username | shell_quote }}",
    "{% if kerberos %} -k{% else %} -p {{ password | shell_quote }}{% endif %}",
    " --bloodhound --collection All",
);

const COLLECT_SHARPHOUND: &str =
    "SharpHound.exe --CollectionMethods All --ZipFileName {{ (output ~ '.zip') | shell_quote }}";

/// Builds the BloodHound connector.
///
/// # Errors
///
/// Returns [`SchemaError`] if a declaration is malformed.
pub fn definition() -> Result<ConnectorDefinition, SchemaError> {
    ConnectorDefinition::builder(NAME, "Active Directory collection for BloodHound")
        .global(ParameterSpec::text("domain", ""))
        .global(ParameterSpec::text("username", ""))
        .global(ParameterSpec::text("password", ""))
        .global(ParameterSpec::flag("kerberos", false))
        .submodule(
            SubmoduleBuilder::new("Collection (BloodHound.py)")
                .parameter(ParameterSpec::text("domain", ""))
                .parameter(ParameterSpec::text("username", ""))
                .parameter(ParameterSpec::text("password", ""))
                .parameter(ParameterSpec::text("nameserver", ""))
                .parameter(ParameterSpec::flag("kerberos", false))
                .parameter(ParameterSpec::flag("verbose", false))
                .doc(
                    "Collects BloodHound (Legacy) data using bloodhound-python \
                     (https://github.com/dirkjanm/BloodHound.py).",
                )
                .handler(collect_bloodhound_py),
        )
        .submodule(
            SubmoduleBuilder::new("Collection (NetExec)")
                .parameter(ParameterSpec::text("domain", ""))
                .parameter(ParameterSpec::text("username", ""))
                .parameter(ParameterSpec::text("password", ""))
                .parameter(ParameterSpec::flag("kerberos", false))
                .template(COLLECT_NETEXEC),
        )
        .submodule(
            SubmoduleBuilder::new("Collection (SharpHound)")
                .parameter(ParameterSpec::text("output", ""))
                .doc("Runs SharpHound on a domain-joined host and zips the results as `output`.zip.")
                .template(COLLECT_SHARPHOUND),
        )
        .build()
}

fn collect_bloodhound_py(
    _instance: &ConnectorInstance<'_>,
    parameters: &ResolvedParameters,
) -> Result<String, HandlerError> {
    let domain = parameters.text("domain")?;
    let username = shell_quote(parameters.text("username")?);
    let mut command = if parameters.flag("kerberos")? {
        format!(
            "bloodhound-python -u {username} -d {} -k -c all",
            shell_quote(domain)
        )
    } else {
        format!(
            "bloodhound-python -u {username} -p {} -d {} -c all",
            shell_quote(parameters.text("password")?),
            shell_quote(domain)
        )
    };

    let nameserver = parameters.text("nameserver")?;
    if !nameserver.is_empty() {
        command.push_str(" -ns ");
        command.push_str(&shell_quote(nameserver));
    }
    if parameters.flag("verbose")? {
        command.push_str(" -v");
    }
    Ok(command)
}
