//! Web server provisioning: declares the role, security group and instance.
//!
//! `InstanceProvisioner::provision` builds every resource first and only
//! then registers them into the stack in one batch, so any failure leaves
//! the stack untouched.

use std::path::Path;

use anyhow::{Result, anyhow};

use crate::application::ports::ScriptSource;
use crate::domain::constants::{
    APPLICATION_NAME_SUFFIX, APPLICATION_NAME_TAG, BOOTSTRAP_SCRIPT_PATH, EC2_SERVICE_PRINCIPAL,
    INSTANCE_SUFFIX, ROLE_SUFFIX, SECURITY_GROUP_SUFFIX, STAGE_TAG, WEB_IMAGE_CPU,
    WEB_IMAGE_GENERATION, WEB_INGRESS_RULES, WEB_INSTANCE_CLASS, WEB_INSTANCE_SIZE,
    WEB_SECURITY_GROUP_DESCRIPTION, WEB_SECURITY_GROUP_NAME, WEB_SERVER_MANAGED_POLICIES,
};
use crate::domain::error::ProvisionError;
use crate::domain::iam::{AccessIdentity, ManagedPolicy, ServicePrincipal};
use crate::domain::image::MachineImageRef;
use crate::domain::instance::{InstanceDescriptor, InstanceType, Tags, UserData};
use crate::domain::network::{NetworkContext, SubnetSelection};
use crate::domain::security_group::{AccessGroup, Peer, Port};
use crate::domain::stack::{InstanceHandle, Resource, Stack};

/// Inputs for one web server instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceConfig {
    pub network: NetworkContext,
    /// Existing EC2 key pair; not checked here.
    pub key_name: String,
}

/// Declares web server instances, reading bootstrap scripts through `S`.
pub struct InstanceProvisioner<S: ScriptSource> {
    scripts: S,
}

impl<S: ScriptSource> InstanceProvisioner<S> {
    #[must_use]
    pub fn new(scripts: S) -> Self {
        Self { scripts }
    }

    /// Declare `<id>-Role`, `<id>-SecurityGroup` and `<id>-Instance` in `stack`.
    ///
    /// # Errors
    ///
    /// - [`ProvisionError::EmptyIdentifier`] if `id` is empty.
    /// - [`NetworkError`](crate::domain::error::NetworkError) if the network is malformed or has no public subnet.
    /// - [`ProvisionError::BootstrapScript`] if the script cannot be read.
    /// - [`ProvisionError::DuplicateConstruct`] if `id` was already provisioned
    ///   into this stack.
    ///
    /// On error nothing is registered.
    pub fn provision(
        &self,
        stack: &mut Stack,
        id: &str,
        config: &InstanceConfig,
    ) -> Result<InstanceHandle> {
        if id.is_empty() {
            return Err(ProvisionError::EmptyIdentifier.into());
        }
        config.network.validate()?;

        let role_id = format!("{id}{ROLE_SUFFIX}");
        let group_id = format!("{id}{SECURITY_GROUP_SUFFIX}");
        let instance_id = format!("{id}{INSTANCE_SUFFIX}");

        let role = web_server_role();
        tracing::debug!(construct = %role_id, "declared role");

        let group = web_security_group(&config.network);
        tracing::debug!(construct = %group_id, ports = ?group.ingress_ports(), "declared security group");

        let image = MachineImageRef::amazon_linux(WEB_IMAGE_GENERATION, WEB_IMAGE_CPU);

        let subnet = config
            .network
            .select_subnet(SubnetSelection::PUBLIC)?
            .clone();

        let script = self.scripts.load(Path::new(BOOTSTRAP_SCRIPT_PATH))?;
        tracing::debug!(path = %script.path().display(), bytes = script.text().len(), "loaded bootstrap script");
        let mut user_data = UserData::for_linux();
        user_data.add_commands(script.text());

        let tags = web_server_tags(id);

        let instance = InstanceDescriptor {
            instance_type: InstanceType::of(WEB_INSTANCE_CLASS, WEB_INSTANCE_SIZE),
            image,
            subnet,
            key_name: config.key_name.clone(),
            role: role_id.clone(),
            security_group: group_id.clone(),
            user_data,
            tags,
        };
        tracing::debug!(
            construct = %instance_id,
            instance_type = %instance.instance_type,
            subnet = %instance.subnet.id,
            "declared instance"
        );

        stack.register_all(vec![
            (role_id, Resource::Role(role)),
            (group_id, Resource::SecurityGroup(group)),
            (instance_id.clone(), Resource::Instance(Box::new(instance))),
        ])?;

        stack
            .instance_handle(&instance_id)
            .ok_or_else(|| anyhow!("instance '{instance_id}' missing after registration"))
    }
}

fn web_server_role() -> AccessIdentity {
    let mut role = AccessIdentity::new(ServicePrincipal::new(EC2_SERVICE_PRINCIPAL));
    for name in WEB_SERVER_MANAGED_POLICIES {
        role.add_managed_policy(ManagedPolicy::from_aws_managed_policy_name(name));
    }
    role
}

fn web_security_group(network: &NetworkContext) -> AccessGroup {
    let mut group = AccessGroup::new(
        WEB_SECURITY_GROUP_NAME,
        WEB_SECURITY_GROUP_DESCRIPTION,
        &network.vpc_id,
        true,
    );
    for (port, description) in WEB_INGRESS_RULES {
        group.add_ingress_rule(Peer::any_ipv4(), Port::tcp(port), description);
    }
    group
}

fn web_server_tags(id: &str) -> Tags {
    let mut tags = Tags::default();
    tags.add(APPLICATION_NAME_TAG, &format!("{id}{APPLICATION_NAME_SUFFIX}"));
    tags.add(STAGE_TAG, id);
    tags
}
