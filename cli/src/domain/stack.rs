//! Composition context: the resource graph constructs are registered into.
//!
//! A `Stack` is an ordinary value owned by the caller and passed by `&mut`
//! to every construction call. It enforces unique construct IDs and derives
//! stable CloudFormation logical IDs. Nothing here touches AWS.

use std::collections::HashSet;

use anyhow::Result;
use serde_json::{Value, json};
use sha2::{Digest, Sha256};

use crate::domain::error::ProvisionError;
use crate::domain::iam::AccessIdentity;
use crate::domain::instance::InstanceDescriptor;
use crate::domain::security_group::AccessGroup;

/// CloudFormation caps logical IDs at 255 characters; 8 are taken by the hash.
const MAX_HUMAN_PART: usize = 247;

// ── Resources ────────────────────────────────────────────────────────────────

/// A declared resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resource {
    Role(AccessIdentity),
    SecurityGroup(AccessGroup),
    Instance(Box<InstanceDescriptor>),
}

impl Resource {
    /// CloudFormation type of the primary resource.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Role(_) => "AWS::IAM::Role",
            Self::SecurityGroup(_) => "AWS::EC2::SecurityGroup",
            Self::Instance(_) => "AWS::EC2::Instance",
        }
    }
}

/// A resource registered under a construct ID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Construct {
    id: String,
    logical_id: String,
    resource: Resource,
}

impl Construct {
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn logical_id(&self) -> &str {
        &self.logical_id
    }

    #[must_use]
    pub fn resource(&self) -> &Resource {
        &self.resource
    }
}

// ── References ───────────────────────────────────────────────────────────────

/// Template-time reference to another resource's attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intrinsic {
    Ref(String),
    GetAtt(String, String),
}

impl Intrinsic {
    #[must_use]
    pub fn to_value(&self) -> Value {
        match self {
            Self::Ref(logical_id) => json!({ "Ref": logical_id }),
            Self::GetAtt(logical_id, attr) => json!({ "Fn::GetAtt": [logical_id, attr] }),
        }
    }
}

/// Handle to a declared instance, usable for outputs or further wiring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceHandle {
    construct_id: String,
    logical_id: String,
}

impl InstanceHandle {
    #[must_use]
    pub fn construct_id(&self) -> &str {
        &self.construct_id
    }

    #[must_use]
    pub fn logical_id(&self) -> &str {
        &self.logical_id
    }

    /// The EC2 instance ID, resolved at deploy time.
    #[must_use]
    pub fn instance_id(&self) -> Intrinsic {
        Intrinsic::Ref(self.logical_id.clone())
    }

    #[must_use]
    pub fn public_ip(&self) -> Intrinsic {
        Intrinsic::GetAtt(self.logical_id.clone(), "PublicIp".to_string())
    }

    #[must_use]
    pub fn public_dns_name(&self) -> Intrinsic {
        Intrinsic::GetAtt(self.logical_id.clone(), "PublicDnsName".to_string())
    }
}

/// A declared template output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackOutput {
    pub id: String,
    pub value: Intrinsic,
    pub description: Option<String>,
}

// ── Stack ────────────────────────────────────────────────────────────────────

/// Resource graph for one CloudFormation stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stack {
    name: String,
    description: Option<String>,
    constructs: Vec<Construct>,
    outputs: Vec<StackOutput>,
}

impl Stack {
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            description: None,
            constructs: Vec::new(),
            outputs: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Constructs in registration order.
    #[must_use]
    pub fn constructs(&self) -> &[Construct] {
        &self.constructs
    }

    #[must_use]
    pub fn outputs(&self) -> &[StackOutput] {
        &self.outputs
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.constructs.iter().any(|c| c.id == id)
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Construct> {
        self.constructs.iter().find(|c| c.id == id)
    }

    /// Logical ID of a registered construct.
    #[must_use]
    pub fn logical_id_of(&self, id: &str) -> Option<&str> {
        self.get(id).map(Construct::logical_id)
    }

    /// Register several constructs at once.
    ///
    /// Every ID is checked before anything is inserted, so on error the
    /// stack is left exactly as it was.
    ///
    /// # Errors
    ///
    /// Returns [`ProvisionError::DuplicateConstruct`] if an ID is already
    /// registered or appears twice in `declared`.
    pub fn register_all(&mut self, declared: Vec<(String, Resource)>) -> Result<()> {
        let mut pending = HashSet::new();
        for (id, _) in &declared {
            if self.contains(id) || !pending.insert(id.as_str()) {
                return Err(ProvisionError::DuplicateConstruct {
                    id: id.clone(),
                    stack: self.name.clone(),
                }
                .into());
            }
        }
        for (id, resource) in declared {
            tracing::debug!(stack = %self.name, construct = %id, kind = resource.type_name(), "registered construct");
            self.constructs.push(Construct {
                logical_id: logical_id(&[&id]),
                id,
                resource,
            });
        }
        Ok(())
    }

    /// Declare a template output.
    ///
    /// # Errors
    ///
    /// Returns [`ProvisionError::DuplicateOutput`] if `id` is already used.
    pub fn add_output(&mut self, id: &str, value: Intrinsic, description: Option<&str>) -> Result<()> {
        if self.outputs.iter().any(|o| o.id == id) {
            return Err(ProvisionError::DuplicateOutput {
                id: id.to_string(),
                stack: self.name.clone(),
            }
            .into());
        }
        self.outputs.push(StackOutput {
            id: id.to_string(),
            value,
            description: description.map(str::to_string),
        });
        Ok(())
    }

    /// Handle for the instance registered under `id`, if any.
    #[must_use]
    pub fn instance_handle(&self, id: &str) -> Option<InstanceHandle> {
        let construct = self.get(id)?;
        match construct.resource {
            Resource::Instance(_) => Some(InstanceHandle {
                construct_id: construct.id.clone(),
                logical_id: construct.logical_id.clone(),
            }),
            _ => None,
        }
    }
}

/// Derive a CloudFormation logical ID from a construct path.
///
/// Alphanumeric characters of every component are kept, followed by the
/// first 8 upper-case hex digits of the SHA-256 of the `/`-joined path.
#[must_use]
pub fn logical_id(path: &[&str]) -> String {
    let human: String = path
        .iter()
        .flat_map(|component| component.chars())
        .filter(char::is_ascii_alphanumeric)
        .take(MAX_HUMAN_PART)
        .collect();
    let digest = Sha256::digest(path.join("/").as_bytes());
    let hash: String = digest.iter().take(4).map(|b| format!("{b:02X}")).collect();
    format!("{human}{hash}")
}
