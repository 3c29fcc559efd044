//! Behaviour of `InstanceProvisioner::provision` against a real `Stack`.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use webhost_cli::application::services::provision::InstanceProvisioner;
use webhost_cli::domain::error::{NetworkError, ProvisionError};
use webhost_cli::domain::{Resource, Stack, SubnetType};

use crate::helpers::{FixedScript, MissingScript, SCRIPT, instance_config};

fn construct_ids(stack: &Stack) -> Vec<&str> {
    stack.constructs().iter().map(|c| c.id()).collect()
}

#[test]
fn test_provision_dev_declares_three_constructs() {
    let mut stack = Stack::new("WebServerStack");
    let handle = InstanceProvisioner::new(FixedScript(SCRIPT))
        .provision(&mut stack, "Dev", &instance_config())
        .expect("provision");

    assert_eq!(construct_ids(&stack), ["Dev-Role", "Dev-SecurityGroup", "Dev-Instance"]);
    assert_eq!(handle.construct_id(), "Dev-Instance");
    assert_eq!(Some(handle.logical_id()), stack.logical_id_of("Dev-Instance"));
}

#[test]
fn test_provision_prod_east_tags_and_instance_shape() {
    let mut stack = Stack::new("WebServerStack");
    InstanceProvisioner::new(FixedScript(SCRIPT))
        .provision(&mut stack, "Prod-East", &instance_config())
        .expect("provision");

    let Some(Resource::Instance(instance)) =
        stack.get("Prod-East-Instance").map(|c| c.resource())
    else {
        panic!("instance not registered");
    };
    assert_eq!(instance.instance_type.to_string(), "t2.micro");
    assert_eq!(instance.key_name, "web-key");
    assert_eq!(instance.subnet.kind, SubnetType::Public);
    assert_eq!(instance.subnet.id, "subnet-22222222");
    assert_eq!(instance.tags.get("application-name"), Some("Prod-East-App"));
    assert_eq!(instance.tags.get("stage"), Some("Prod-East"));
    assert_eq!(
        instance.image.ssm_parameter_name(),
        "/aws/service/ami-amazon-linux-latest/amzn2-ami-hvm-x86_64-gp2"
    );
}

#[test]
fn test_provision_user_data_is_script_after_shebang() {
    let mut stack = Stack::new("WebServerStack");
    InstanceProvisioner::new(FixedScript(SCRIPT))
        .provision(&mut stack, "Dev", &instance_config())
        .expect("provision");
    let Some(Resource::Instance(instance)) = stack.get("Dev-Instance").map(|c| c.resource())
    else {
        panic!("instance not registered");
    };
    assert_eq!(instance.user_data.render(), format!("#!/bin/bash\n{SCRIPT}"));
}

#[test]
fn test_provision_crlf_script_with_trailing_blank_lines_kept_verbatim() {
    const CRLF_SCRIPT: &str = "yum update -y\r\nyum install -y httpd\r\n\r\n\n\n";
    let mut stack = Stack::new("WebServerStack");
    InstanceProvisioner::new(FixedScript(CRLF_SCRIPT))
        .provision(&mut stack, "Dev", &instance_config())
        .expect("provision");
    let Some(Resource::Instance(instance)) = stack.get("Dev-Instance").map(|c| c.resource())
    else {
        panic!("instance not registered");
    };
    assert_eq!(
        instance.user_data.render(),
        format!("#!/bin/bash\n{CRLF_SCRIPT}")
    );
}

#[test]
fn test_provision_empty_id_rejected() {
    let mut stack = Stack::new("WebServerStack");
    let err = InstanceProvisioner::new(FixedScript(SCRIPT))
        .provision(&mut stack, "", &instance_config())
        .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ProvisionError>(),
        Some(ProvisionError::EmptyIdentifier)
    ));
    assert!(stack.constructs().is_empty());
}

#[test]
fn test_provision_missing_script_leaves_stack_unchanged() {
    let mut stack = Stack::new("WebServerStack");
    let err = InstanceProvisioner::new(MissingScript)
        .provision(&mut stack, "Dev", &instance_config())
        .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ProvisionError>(),
        Some(ProvisionError::BootstrapScript { .. })
    ));
    assert!(stack.constructs().is_empty());
}

#[test]
fn test_provision_same_id_twice_fails_and_keeps_first() {
    let mut stack = Stack::new("WebServerStack");
    let provisioner = InstanceProvisioner::new(FixedScript(SCRIPT));
    provisioner
        .provision(&mut stack, "Dev", &instance_config())
        .expect("first provision");

    let err = provisioner
        .provision(&mut stack, "Dev", &instance_config())
        .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ProvisionError>(),
        Some(ProvisionError::DuplicateConstruct { .. })
    ));
    assert_eq!(stack.constructs().len(), 3);
}

#[test]
fn test_provision_two_ids_coexist() {
    let mut stack = Stack::new("WebServerStack");
    let provisioner = InstanceProvisioner::new(FixedScript(SCRIPT));
    provisioner
        .provision(&mut stack, "Dev", &instance_config())
        .expect("dev");
    provisioner
        .provision(&mut stack, "Prod", &instance_config())
        .expect("prod");
    assert_eq!(stack.constructs().len(), 6);
}

#[test]
fn test_provision_without_public_subnet_fails() {
    let mut config = instance_config();
    config.network.subnets.retain(|s| s.kind != SubnetType::Public);
    let mut stack = Stack::new("WebServerStack");
    let err = InstanceProvisioner::new(FixedScript(SCRIPT))
        .provision(&mut stack, "Dev", &config)
        .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<NetworkError>(),
        Some(NetworkError::NoSubnets { .. })
    ));
    assert!(stack.constructs().is_empty());
}

#[test]
fn test_provision_invalid_vpc_id_fails() {
    let mut config = instance_config();
    config.network.vpc_id = "not-a-vpc".to_string();
    let mut stack = Stack::new("WebServerStack");
    let err = InstanceProvisioner::new(FixedScript(SCRIPT))
        .provision(&mut stack, "Dev", &config)
        .unwrap_err();
    assert!(err.downcast_ref::<NetworkError>().is_some(), "got: {err:#}");
    assert!(stack.constructs().is_empty());
}
