//! Tests for parameter resolution precedence and submodule invocation.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use rstest::rstest;

use super::fixtures::{EXCLUSIVE, EXPORT, LIST_SHARES, smb, smb_with_counter};
use crate::connector::domain::{
    ConnectorDefinition, ConnectorError, ConnectorInstance, HandlerError, OverrideBag,
    ParameterSpec, ParameterValue, SubmoduleBuilder,
};

fn dc01_instance(definition: &ConnectorDefinition) -> ConnectorInstance<'_> {
    ConnectorInstance::new(
        definition,
        OverrideBag::new()
            .with("host", "dc01")
            .with("username", "u")
            .with("password", "p"),
    )
    .expect("instance should bind")
}

fn resolved_pairs(
    instance: &ConnectorInstance<'_>,
    key: &str,
    overrides: &OverrideBag,
) -> Vec<(String, ParameterValue)> {
    instance
        .resolve(key, overrides)
        .expect("resolution should succeed")
        .iter()
        .map(|(name, value)| (name.to_owned(), value.clone()))
        .collect()
}

fn pair(name: &str, value: impl Into<ParameterValue>) -> (String, ParameterValue) {
    (name.to_owned(), value.into())
}

#[rstest]
fn override_fills_submodule_parameter_alongside_globals(smb: ConnectorDefinition) {
    let instance = dc01_instance(&smb);

    let resolved = resolved_pairs(
        &instance,
        LIST_SHARES,
        &OverrideBag::new().with("is_ntlm", true),
    );

    assert_eq!(
        resolved,
        vec![
            pair("host", "dc01"),
            pair("username", "u"),
            pair("password", "p"),
            pair("is_ntlm", true),
            pair("kerberos", false),
        ]
    );
}

#[rstest]
fn override_wins_over_instance_global(smb: ConnectorDefinition) {
    let instance = dc01_instance(&smb);

    let resolved = instance
        .resolve(LIST_SHARES, &OverrideBag::new().with("host", "dc02"))
        .expect("resolution should succeed");

    assert_eq!(resolved.text("host"), Ok("dc02"));
    assert_eq!(instance.global("host"), Some(&ParameterValue::from("dc01")));
}

#[rstest]
fn instance_global_wins_over_submodule_default() {
    let definition = ConnectorDefinition::builder("BloodHound", "")
        .global(ParameterSpec::flag("kerberos", false))
        .submodule(
            SubmoduleBuilder::new("collect")
                .parameter(ParameterSpec::flag("kerberos", false))
                .template("{{ kerberos }}"),
        )
        .build()
        .expect("definition should build");
    let instance = ConnectorInstance::new(&definition, OverrideBag::new().with("kerberos", true))
        .expect("instance should bind");

    let output = instance
        .run_submodule("collect", &OverrideBag::new())
        .expect("invocation should succeed");

    assert_eq!(output, "true");
}

#[rstest]
fn submodule_default_applies_when_nothing_is_supplied(smb: ConnectorDefinition) {
    let instance = ConnectorInstance::with_defaults(&smb);

    let resolved = instance
        .resolve(LIST_SHARES, &OverrideBag::new())
        .expect("resolution should succeed");

    assert_eq!(resolved.text("host"), Ok(""));
    assert_eq!(resolved.flag("kerberos"), Ok(false));
}

#[rstest]
fn missing_required_parameter_is_reported(smb: ConnectorDefinition) {
    let instance = dc01_instance(&smb);

    let error = instance
        .resolve(EXPORT, &OverrideBag::new())
        .expect_err("resolution should fail");

    assert_eq!(
        error,
        ConnectorError::MissingRequiredParameter {
            submodule: EXPORT.to_owned(),
            parameter: "output".to_owned(),
        }
    );
}

#[rstest]
fn required_parameter_is_satisfied_by_override(smb: ConnectorDefinition) {
    let instance = dc01_instance(&smb);

    let output = instance
        .run_submodule(EXPORT, &OverrideBag::new().with("output", "loot"))
        .expect("invocation should succeed");

    assert_eq!(output, "export 'loot'");
}

#[rstest]
#[case(OverrideBag::new())]
#[case(OverrideBag::new().with("unrelated", "value"))]
#[case(OverrideBag::new().with("host", "dc02").with("is_ntlm", true))]
fn unknown_submodule_is_reported_regardless_of_overrides(
    smb: ConnectorDefinition,
    #[case] overrides: OverrideBag,
) {
    let instance = dc01_instance(&smb);

    let error = instance
        .run_submodule("Missing", &overrides)
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
fn extra_override_keys_are_ignored(smb: ConnectorDefinition) {
    let instance = dc01_instance(&smb);
    let plain = OverrideBag::new().with("is_ntlm", true);
    let noisy = plain
        .clone()
        .with("domain", "corp.local")
        .with("nameserver", ParameterValue::Integer(53));

    assert_eq!(
        instance.resolve(LIST_SHARES, &plain),
        instance.resolve(LIST_SHARES, &noisy)
    );
}

#[rstest]
fn handler_receives_instance_and_returns_verbatim(smb: ConnectorDefinition) {
    let instance = dc01_instance(&smb);

    let output = instance
        .run_submodule(LIST_SHARES, &OverrideBag::new().with("kerberos", "true"))
        .expect("invocation should succeed");

    assert_eq!(output, "SMB dc01 u false true");
}

#[rstest]
fn handler_error_is_passed_through_unchanged(smb: ConnectorDefinition) {
    let instance = ConnectorInstance::with_defaults(&smb);

    let error = instance
        .run_submodule(
            EXCLUSIVE,
            &OverrideBag::new().with("is_ntlm", true).with("kerberos", true),
        )
        .expect_err("handler should fail");

    assert_eq!(
        error,
        ConnectorError::Handler(HandlerError::new(
            "is_ntlm and kerberos are mutually exclusive"
        ))
    );
}

#[rstest]
fn resolution_failures_never_reach_the_handler() {
    let calls = Arc::new(AtomicUsize::new(0));
    let definition = smb_with_counter(Arc::clone(&calls));
    let instance = ConnectorInstance::with_defaults(&definition);

    let invalid = instance.run_submodule(LIST_SHARES, &OverrideBag::new().with("is_ntlm", "maybe"));
    let unknown = instance.run_submodule("Missing", &OverrideBag::new());

    assert!(matches!(
        invalid,
        Err(ConnectorError::InvalidParameterValue { parameter, .. }) if parameter == "is_ntlm"
    ));
    assert!(matches!(unknown, Err(ConnectorError::UnknownSubmodule { .. })));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[rstest]
fn instance_rejects_fields_outside_global_schema(smb: ConnectorDefinition) {
    let error = ConnectorInstance::new(&smb, OverrideBag::new().with("is_ntlm", true))
        .expect_err("unexpected field should be rejected");

    assert_eq!(
        error,
        ConnectorError::UnexpectedGlobalField {
            connector: "SMB".to_owned(),
            field: "is_ntlm".to_owned(),
        }
    );
}

#[rstest]
fn split_globals_routes_flat_values(smb: ConnectorDefinition) {
    let bag = OverrideBag::new()
        .with("host", "dc01")
        .with("is_ntlm", "true")
        .with("stray", "x");

    let (globals, rest) = bag.split_globals(smb.global_schema());

    assert!(globals.contains("host"));
    assert_eq!(globals.len(), 1);
    assert!(rest.contains("is_ntlm") && rest.contains("stray"));
    assert_eq!(rest.len(), 2);
}

#[rstest]
fn malformed_global_is_checked_only_by_submodules_that_read_it() {
    let definition = ConnectorDefinition::builder("BloodHound", "")
        .global(ParameterSpec::flag("kerberos", false))
        .submodule(
            SubmoduleBuilder::new("collect")
                .parameter(ParameterSpec::flag("kerberos", false))
                .template("{{ kerberos }}"),
        )
        .submodule(SubmoduleBuilder::new("archive").template("archive"))
        .build()
        .expect("definition should build");

    let instance = ConnectorInstance::new(&definition, OverrideBag::new().with("kerberos", "yes"))
        .expect("instance should bind without checking types");

    assert_eq!(
        instance.run_submodule("archive", &OverrideBag::new()),
        Ok("archive".to_owned())
    );
    assert!(matches!(
        instance.run_submodule("collect", &OverrideBag::new()),
        Err(ConnectorError::InvalidParameterValue { parameter, .. }) if parameter == "kerberos"
    ));
}
