//! Tests for the catalog service's describe and invoke call shapes.

use std::collections::BTreeMap;
use std::sync::Arc;

use rstest::{fixture, rstest};

use super::fixtures::{EXPORT, LIST_SHARES, smb};
use crate::connector::adapters::memory::InMemoryConnectorRegistry;
use crate::connector::domain::{
    ConnectorDefinition, ConnectorError, ErrorKind, ParameterSpec, SubmoduleBuilder,
};
use crate::connector::ports::RegistryError;
use crate::connector::ports::registry::MockConnectorRegistry;
use crate::connector::services::{ConnectorCatalogService, InvocationOutput};

#[fixture]
fn service(smb: ConnectorDefinition) -> ConnectorCatalogService<InMemoryConnectorRegistry> {
    let mut registry = InMemoryConnectorRegistry::new();
    registry.register(smb).expect("registration should succeed");
    registry
        .register(
            ConnectorDefinition::builder("Demo", "")
                .submodule(SubmoduleBuilder::new("Example").template("Example submodule executed."))
                .build()
                .expect("definition should build"),
        )
        .expect("registration should succeed");
    ConnectorCatalogService::new(Arc::new(registry))
}

fn values(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
        .collect()
}

#[rstest]
fn invoke_routes_flat_values_to_globals_and_overrides(
    service: ConnectorCatalogService<InMemoryConnectorRegistry>,
) {
    let output = service
        .invoke(
            "SMB",
            LIST_SHARES,
            &values(&[
                ("host", "dc01"),
                ("username", "u"),
                ("password", "p"),
                ("is_ntlm", "true"),
                ("unused", "ignored"),
            ]),
        )
        .expect("invocation should succeed");

    assert_eq!(
        output,
        InvocationOutput {
            result: "SMB dc01 u true false".to_owned(),
        }
    );
}

#[rstest]
fn invoke_reports_unknown_connector(service: ConnectorCatalogService<InMemoryConnectorRegistry>) {
    let error = service
        .invoke("LDAP", LIST_SHARES, &BTreeMap::new())
        .expect_err("unknown connector should fail");

    assert_eq!(error, ConnectorError::UnknownConnector("LDAP".to_owned()));
    assert_eq!(error.kind(), ErrorKind::NotFound);
}

#[rstest]
fn invoke_checks_submodule_before_binding_values(
    service: ConnectorCatalogService<InMemoryConnectorRegistry>,
) {
    let error = service
        .invoke("SMB", "Missing", &values(&[("is_ntlm", "maybe")]))
        .expect_err("unknown submodule should fail");

    assert_eq!(
        error,
        ConnectorError::UnknownSubmodule {
            connector: "SMB".to_owned(),
            submodule: "Missing".to_owned(),
        }
    );
}

#[rstest]
fn invoke_reports_missing_required_value(
    service: ConnectorCatalogService<InMemoryConnectorRegistry>,
) {
    let error = service
        .invoke("SMB", EXPORT, &values(&[("host", "dc01")]))
        .expect_err("missing output should fail");

    assert_eq!(
        error,
        ConnectorError::MissingRequiredParameter {
            submodule: EXPORT.to_owned(),
            parameter: "output".to_owned(),
        }
    );
    assert_eq!(error.kind(), ErrorKind::BadRequest);
}

#[rstest]
fn invoke_rejects_unparseable_values(service: ConnectorCatalogService<InMemoryConnectorRegistry>) {
    let error = service
        .invoke("SMB", LIST_SHARES, &values(&[("kerberos", "maybe")]))
        .expect_err("invalid boolean should fail");

    assert!(matches!(
        error,
        ConnectorError::InvalidParameterValue { ref parameter, .. } if parameter == "kerberos"
    ));
    assert_eq!(error.kind(), ErrorKind::BadRequest);
}

#[rstest]
fn describe_all_follows_name_order(service: ConnectorCatalogService<InMemoryConnectorRegistry>) {
    let names: Vec<_> = service
        .describe_all()
        .expect("describe should succeed")
        .into_iter()
        .map(|descriptor| descriptor.name)
        .collect();

    assert_eq!(names, ["Demo", "SMB"]);
    assert_eq!(service.list().expect("list should succeed"), names);
}

#[rstest]
fn describe_reports_unknown_connector(service: ConnectorCatalogService<InMemoryConnectorRegistry>) {
    assert_eq!(
        service.describe("LDAP"),
        Err(ConnectorError::UnknownConnector("LDAP".to_owned()))
    );
}

#[rstest]
fn registry_failures_surface_as_internal_errors() {
    let mut registry = MockConnectorRegistry::new();
    registry
        .expect_find_by_name()
        .returning(|_| Err(RegistryError::Unavailable("offline".to_owned())));
    registry
        .expect_list_names()
        .returning(|| Err(RegistryError::Unavailable("offline".to_owned())));
    let service = ConnectorCatalogService::new(Arc::new(registry));

    let invoke_error = service
        .invoke("SMB", LIST_SHARES, &BTreeMap::new())
        .expect_err("registry failure should surface");
    let list_error = service.list().expect_err("registry failure should surface");

    assert_eq!(
        invoke_error,
        ConnectorError::Registry("connector registry unavailable: offline".to_owned())
    );
    assert_eq!(invoke_error.kind(), ErrorKind::Internal);
    assert_eq!(list_error, invoke_error);
}

#[rstest]
fn service_reads_definitions_through_the_port(smb: ConnectorDefinition) {
    let definition = Arc::new(smb);
    let mut registry = MockConnectorRegistry::new();
    registry
        .expect_find_by_name()
        .times(1)
        .returning(move |_| Ok(Some(Arc::clone(&definition))));
    let service = ConnectorCatalogService::new(Arc::new(registry));

    let output = service
        .invoke("SMB", EXPORT, &values(&[("output", "a b")]))
        .expect("invocation should succeed");

    assert_eq!(output.result, "export 'a b'");
}

fn collector() -> ConnectorDefinition {
    ConnectorDefinition::builder("BloodHound", "")
        .global(ParameterSpec::text("domain", ""))
        .global(ParameterSpec::flag("kerberos", false))
        .submodule(
            SubmoduleBuilder::new("Collect")
                .parameter(ParameterSpec::text("domain", ""))
                .parameter(ParameterSpec::flag("kerberos", false))
                .template("collect {{ domain }}{% if kerberos %} -k{% endif %}"),
        )
        .submodule(
            SubmoduleBuilder::new("Archive")
                .parameter(ParameterSpec::text("output", ""))
                .template("archive {{ output | shell_quote }}"),
        )
        .build()
        .expect("definition should build")
}

#[rstest]
fn malformed_global_is_ignored_by_submodules_that_do_not_declare_it() {
    let mut registry = InMemoryConnectorRegistry::new();
    registry
        .register(collector())
        .expect("registration should succeed");
    let service = ConnectorCatalogService::new(Arc::new(registry));

    let clean = service.invoke("BloodHound", "Archive", &values(&[("output", "loot")]));
    let noisy = service.invoke(
        "BloodHound",
        "Archive",
        &values(&[("output", "loot"), ("kerberos", "yes")]),
    );

    assert_eq!(
        clean,
        Ok(InvocationOutput {
            result: "archive 'loot'".to_owned(),
        })
    );
    assert_eq!(clean, noisy);
}

#[rstest]
fn malformed_global_fails_submodules_that_declare_it() {
    let mut registry = InMemoryConnectorRegistry::new();
    registry
        .register(collector())
        .expect("registration should succeed");
    let service = ConnectorCatalogService::new(Arc::new(registry));

    let error = service
        .invoke("BloodHound", "Collect", &values(&[("kerberos", "yes")]))
        .expect_err("malformed flag should fail");

    assert!(matches!(
        error,
        ConnectorError::InvalidParameterValue { ref parameter, .. } if parameter == "kerberos"
    ));
    assert_eq!(
        service.invoke(
            "BloodHound",
            "Collect",
            &values(&[("domain", "corp"), ("kerberos", "TRUE")])
        ),
        Ok(InvocationOutput {
            result: "collect corp -k".to_owned(),
        })
    );
}
