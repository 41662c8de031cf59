//! Kerberos delegation discovery.

use crate::connector::domain::{
    ConnectorDefinition, ParameterSpec, SchemaError, SubmoduleBuilder,
};

/// Registry name.
pub const NAME: &str = "Delegations";

const FIND_NETEXEC: &str = concat!(
    "nxc ldap {{ dc_host | shell_quote }} -u {{ username | shell_quote }}",
    "{% if is_ntlm %} -H {% else %} -p {% endif %}",
    "{{ password | shell_quote }} --find-delegation",
);

const FIND_IMPACKET: &str = concat!(
    "{% if is_ntlm %}",
    "findDelegation.py {{ domain | shell_quote }}/{{ username | shell_quote }}",
    " -hashes {{ (':' ~ password) | shell_quote }}",
    "{% else %}",
    "findDelegation.py {{ domain | shell_quote }}/{{ username | shell_quote }}:{{ password | shell_quote }}",
    "{% endif %}",
);

/// Builds the Delegations connector.
///
/// # Errors
///
/// Returns [`SchemaError`] if a declaration is malformed.
pub fn definition() -> Result<ConnectorDefinition, SchemaError> {
    ConnectorDefinition::builder(NAME, "Finding unconstrained and constrained delegation")
        .global(ParameterSpec::text("dc_host", ""))
        .global(ParameterSpec::text("domain", ""))
        .global(ParameterSpec::text("username", ""))
        .global(ParameterSpec::text("password", ""))
        .global(ParameterSpec::flag("is_ntlm", false))
        .submodule(
            SubmoduleBuilder::new("Find Delegations (NetExec)")
                .parameter(ParameterSpec::text("dc_host", ""))
                .parameter(ParameterSpec::text("username", ""))
                .parameter(ParameterSpec::text("password", ""))
                .parameter(ParameterSpec::flag("is_ntlm", false))
                .template(FIND_NETEXEC),
        )
        .submodule(
            SubmoduleBuilder::new("Find Delegations (findDelegation.py)")
                .parameter(ParameterSpec::text("domain", ""))
                .parameter(ParameterSpec::text("username", ""))
                .parameter(ParameterSpec::text("password", ""))
                .parameter(ParameterSpec::flag("is_ntlm", false))
                .template(FIND_IMPACKET),
        )
        .build()
}
