//! CloudFormation synthesis.
//!
//! `synthesize` is a pure function from a [`Stack`] to a [`Template`].
//! Every map in the output is ordered, so the same stack always renders
//! to the same bytes.

use std::collections::BTreeMap;
use std::fmt;

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::{Value, json};

use crate::domain::constants::{
    ALLOW_ALL_OUTBOUND_DESCRIPTION, ANY_IPV4_CIDR, INSTANCE_PROFILE_CHILD, TEMPLATE_FORMAT_VERSION,
};
use crate::domain::iam::AccessIdentity;
use crate::domain::instance::InstanceDescriptor;
use crate::domain::security_group::{AccessGroup, AccessRule, Port};
use crate::domain::stack::{Construct, Resource, Stack, logical_id};

/// Serialization format of a rendered template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TemplateFormat {
    #[default]
    Json,
    Yaml,
}

impl fmt::Display for TemplateFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Json => "json",
            Self::Yaml => "yaml",
        })
    }
}

/// A CloudFormation template document.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Template {
    #[serde(rename = "AWSTemplateFormatVersion")]
    pub format_version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub parameters: BTreeMap<String, TemplateParameter>,
    pub resources: BTreeMap<String, TemplateResource>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub outputs: BTreeMap<String, TemplateOutput>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct TemplateParameter {
    #[serde(rename = "Type")]
    pub kind: String,
    pub default: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct TemplateResource {
    #[serde(rename = "Type")]
    pub kind: String,
    pub properties: Value,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub depends_on: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct TemplateOutput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub value: Value,
}

impl Template {
    /// Resources of the given CloudFormation type, keyed by logical ID.
    pub fn resources_of_type<'a>(
        &'a self,
        kind: &'a str,
    ) -> impl Iterator<Item = (&'a str, &'a TemplateResource)> + 'a {
        self.resources
            .iter()
            .filter(move |(_, r)| r.kind == kind)
            .map(|(id, r)| (id.as_str(), r))
    }

    /// Serialize the template. JSON is pretty-printed with a trailing newline.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render(&self, format: TemplateFormat) -> Result<String> {
        match format {
            TemplateFormat::Json => {
                let mut out =
                    serde_json::to_string_pretty(self).context("serializing template as JSON")?;
                out.push('\n');
                Ok(out)
            }
            TemplateFormat::Yaml => {
                serde_yaml::to_string(self).context("serializing template as YAML")
            }
        }
    }
}

// ── Synthesis ────────────────────────────────────────────────────────────────

/// Render the stack's resource graph as a CloudFormation template.
#[must_use]
pub fn synthesize(stack: &Stack) -> Template {
    let mut template = Template {
        format_version: TEMPLATE_FORMAT_VERSION.to_string(),
        description: stack.description().map(str::to_string),
        parameters: BTreeMap::new(),
        resources: BTreeMap::new(),
        outputs: BTreeMap::new(),
    };

    for construct in stack.constructs() {
        match construct.resource() {
            Resource::Role(role) => {
                template
                    .resources
                    .insert(construct.logical_id().to_string(), role_resource(role));
            }
            Resource::SecurityGroup(group) => {
                template.resources.insert(
                    construct.logical_id().to_string(),
                    security_group_resource(construct, group),
                );
            }
            Resource::Instance(instance) => {
                add_instance(&mut template, stack, construct, instance);
            }
        }
    }

    for output in stack.outputs() {
        template.outputs.insert(
            output.id.clone(),
            TemplateOutput {
                description: output.description.clone(),
                value: output.value.to_value(),
            },
        );
    }

    tracing::debug!(
        stack = %stack.name(),
        resources = template.resources.len(),
        parameters = template.parameters.len(),
        outputs = template.outputs.len(),
        "synthesized template"
    );
    template
}

fn partition_arn(suffix: &str) -> Value {
    json!({ "Fn::Join": ["", ["arn:", { "Ref": "AWS::Partition" }, suffix]] })
}

fn role_resource(role: &AccessIdentity) -> TemplateResource {
    let policy_arns: Vec<Value> = role
        .managed_policies()
        .iter()
        .map(|p| partition_arn(&p.arn_suffix()))
        .collect();
    TemplateResource {
        kind: "AWS::IAM::Role".to_string(),
        properties: json!({
            "AssumeRolePolicyDocument": {
                "Statement": [{
                    "Action": "sts:AssumeRole",
                    "Effect": "Allow",
                    "Principal": { "Service": role.assumed_by().as_str() },
                }],
                "Version": "2012-10-17",
            },
            "ManagedPolicyArns": policy_arns,
        }),
        depends_on: Vec::new(),
    }
}

fn rule_value(rule: &AccessRule) -> Value {
    port_value(rule.peer.cidr(), rule.port, &rule.description)
}

fn port_value(cidr: &str, port: Port, description: &str) -> Value {
    let mut value = json!({
        "CidrIp": cidr,
        "Description": description,
        "IpProtocol": port.protocol.as_str(),
    });
    if let (Some(from), Some(to)) = (port.from, port.to) {
        value["FromPort"] = json!(from);
        value["ToPort"] = json!(to);
    }
    value
}

fn security_group_resource(construct: &Construct, group: &AccessGroup) -> TemplateResource {
    let egress = if group.allow_all_outbound {
        vec![port_value(
            ANY_IPV4_CIDR,
            Port::all_traffic(),
            ALLOW_ALL_OUTBOUND_DESCRIPTION,
        )]
    } else {
        Vec::new()
    };
    let ingress: Vec<Value> = group.ingress_rules().iter().map(rule_value).collect();
    TemplateResource {
        kind: construct.resource().type_name().to_string(),
        properties: json!({
            "GroupDescription": group.description,
            "GroupName": group.name,
            "SecurityGroupEgress": egress,
            "SecurityGroupIngress": ingress,
            "VpcId": group.vpc_id,
        }),
        depends_on: Vec::new(),
    }
}

fn add_instance(
    template: &mut Template,
    stack: &Stack,
    construct: &Construct,
    instance: &InstanceDescriptor,
) {
    let role_id = stack.logical_id_of(&instance.role).unwrap_or(&instance.role).to_string();
    let sg_id = stack
        .logical_id_of(&instance.security_group)
        .unwrap_or(&instance.security_group)
        .to_string();

    let profile_id = logical_id(&[construct.id(), INSTANCE_PROFILE_CHILD]);
    template.resources.insert(
        profile_id.clone(),
        TemplateResource {
            kind: "AWS::IAM::InstanceProfile".to_string(),
            properties: json!({ "Roles": [{ "Ref": role_id }] }),
            depends_on: Vec::new(),
        },
    );

    let ssm_name = instance.image.ssm_parameter_name();
    let param_id = format!("{}Parameter", logical_id(&["SsmParameterValue", &ssm_name]));
    template.parameters.insert(
        param_id.clone(),
        TemplateParameter {
            kind: "AWS::SSM::Parameter::Value<AWS::EC2::Image::Id>".to_string(),
            default: ssm_name,
        },
    );

    let tags: Vec<Value> = instance
        .tags
        .iter()
        .map(|(k, v)| json!({ "Key": k, "Value": v }))
        .collect();

    template.resources.insert(
        construct.logical_id().to_string(),
        TemplateResource {
            kind: construct.resource().type_name().to_string(),
            properties: json!({
                "AvailabilityZone": instance.subnet.availability_zone,
                "IamInstanceProfile": { "Ref": profile_id },
                "ImageId": { "Ref": param_id },
                "InstanceType": instance.instance_type.to_string(),
                "KeyName": instance.key_name,
                "SecurityGroupIds": [{ "Fn::GetAtt": [sg_id, "GroupId"] }],
                "SubnetId": instance.subnet.id,
                "Tags": tags,
                "UserData": { "Fn::Base64": instance.user_data.render() },
            }),
            depends_on: vec![role_id],
        },
    );
}
