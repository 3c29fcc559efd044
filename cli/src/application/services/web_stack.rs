//! Web server stack assembly: one provisioned instance plus its outputs.

use std::collections::BTreeMap;

use anyhow::{Result, anyhow};
use serde::Serialize;

use crate::application::ports::ScriptSource;
use crate::application::services::provision::{InstanceConfig, InstanceProvisioner};
use crate::domain::config::StackSettings;
use crate::domain::stack::{InstanceHandle, Resource, Stack};
use crate::domain::template::{Template, synthesize};

/// A declared web server stack.
#[derive(Debug, Clone)]
pub struct WebStack {
    pub stack: Stack,
    pub instance: InstanceHandle,
}

impl WebStack {
    #[must_use]
    pub fn synthesize(&self) -> Template {
        synthesize(&self.stack)
    }
}

/// Declare the web server and its `InstanceId` / `PublicIp` outputs.
///
/// # Errors
///
/// Propagates any provisioning error; see `InstanceProvisioner::provision`.
pub fn build_web_stack(settings: &StackSettings, scripts: impl ScriptSource) -> Result<WebStack> {
    let mut stack = Stack::new(&settings.stack_name);
    if let Some(description) = &settings.description {
        stack = stack.with_description(description);
    }
    let config = InstanceConfig {
        network: settings.network.clone(),
        key_name: settings.key_name.clone(),
    };
    let instance =
        InstanceProvisioner::new(scripts).provision(&mut stack, &settings.identifier, &config)?;
    stack.add_output(
        "InstanceId",
        instance.instance_id(),
        Some("ID of the web server instance"),
    )?;
    stack.add_output(
        "PublicIp",
        instance.public_ip(),
        Some("Public IPv4 address of the web server"),
    )?;
    tracing::info!(stack = %stack.name(), instance = %instance.logical_id(), "declared web server stack");
    Ok(WebStack { stack, instance })
}

/// Human-facing overview of a synthesized web stack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StackSummary {
    pub stack_name: String,
    pub instance: String,
    pub instance_type: String,
    pub subnet: String,
    pub key_name: String,
    pub ingress_ports: Vec<u16>,
    pub managed_policies: Vec<String>,
    pub tags: BTreeMap<String, String>,
    pub resources: usize,
    pub parameters: usize,
    pub outputs: usize,
}

/// Summarize `web` and the template synthesized from it.
///
/// # Errors
///
/// Returns an error if the stack is missing the instance's role or group.
pub fn summarize(web: &WebStack, template: &Template) -> Result<StackSummary> {
    let construct = |id: &str| {
        web.stack
            .get(id)
            .map(|c| c.resource())
            .ok_or_else(|| anyhow!("construct '{id}' not found in stack"))
    };
    let Resource::Instance(instance) = construct(web.instance.construct_id())? else {
        return Err(anyhow!("'{}' is not an instance", web.instance.construct_id()));
    };
    let Resource::SecurityGroup(group) = construct(&instance.security_group)? else {
        return Err(anyhow!("'{}' is not a security group", instance.security_group));
    };
    let Resource::Role(role) = construct(&instance.role)? else {
        return Err(anyhow!("'{}' is not a role", instance.role));
    };
    Ok(StackSummary {
        stack_name: web.stack.name().to_string(),
        instance: web.instance.logical_id().to_string(),
        instance_type: instance.instance_type.to_string(),
        subnet: instance.subnet.id.clone(),
        key_name: instance.key_name.clone(),
        ingress_ports: group.ingress_ports(),
        managed_policies: role
            .managed_policies()
            .iter()
            .map(|p| p.name().to_string())
            .collect(),
        tags: instance
            .tags
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
        resources: template.resources.len(),
        parameters: template.parameters.len(),
        outputs: template.outputs.len(),
    })
}
