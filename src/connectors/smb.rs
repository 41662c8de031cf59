//! SMB share enumeration.

use crate::connector::domain::{
    ConnectorDefinition, ParameterSpec, SchemaError, SubmoduleBuilder,
};

/// Registry name.
pub const NAME: &str = "SMB";

const LIST_SHARES_NETEXEC: &str = concat!(
    "{% if kerberos and is_ntlm %}",
    "nxc smb {{ host | shell_quote }} -u {{ username | shell_quote }}",
    " -H {{ password | shell_quote }} --kerberos --shares",
    "{% elif kerberos %}",
    "nxc smb {{ host | shell_quote }} --use-kcache --shares",
    "{% elif is_ntlm %}",
    "nxc smb {{ host | shell_quote }} -u {{ username | shell_quote }}",
    " -H {{ password | shell_quote }} --shares",
    "{% else %}",
    "nxc smb {{ host | shell_quote }} -u {{ username | shell_quote }}",
    " -p {{ password | shell_quote }} --shares",
    "{% endif %}",
);

const LIST_SHARES_SMBCLIENT: &str = concat!(
    "{% if not username and not password %}",
    "smbclient -L {{ host | shell_quote }} -N",
    "{% elif not password %}",
    "smbclient -L {{ host | shell_quote }} -U {{ (username ~ '%') | shell_quote }}",
    "{% else %}",
    "smbclient -L {{ host | shell_quote }} -U {{ (username ~ '%' ~ password) | shell_quote }}",
    "{% endif %}",
);

/// Builds the SMB connector.
///
/// # Errors
///
/// Returns [`SchemaError`] if a declaration is malformed.
pub fn definition() -> Result<ConnectorDefinition, SchemaError> {
    ConnectorDefinition::builder(NAME, "Enumerating and mapping the SMB protocol")
        .global(ParameterSpec::text("host", ""))
        .global(ParameterSpec::text("username", ""))
        .global(ParameterSpec::text("password", ""))
        .submodule(
            SubmoduleBuilder::new("List Shares (NetExec)")
                .parameter(ParameterSpec::text("host", ""))
                .parameter(ParameterSpec::text("username", ""))
                .parameter(ParameterSpec::text("password", ""))
                .parameter(ParameterSpec::flag("is_ntlm", false))
                .parameter(ParameterSpec::flag("kerberos", false))
                .doc(
                    "Lists SMB shares using NetExec. With `is_ntlm` the password is sent as \
                     an NT hash; with `kerberos` alone the ticket cache is used.\n\n\
                     Reference: https://www.netexec.wiki/smb-protocol/authentication/checking-credentials-domain",
                )
                .template(LIST_SHARES_NETEXEC),
        )
        .submodule(
            SubmoduleBuilder::new("List Shares (SMBClient)")
                .parameter(ParameterSpec::text("host", ""))
                .parameter(ParameterSpec::text("username", ""))
                .parameter(ParameterSpec::text("password", ""))
                .template(LIST_SHARES_SMBCLIENT),
        )
        .build()
}
