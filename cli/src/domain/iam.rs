//! Execution identity assumed by the instance.

/// Principal trusted to assume a role, e.g. `ec2.amazonaws.com`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServicePrincipal(String);

impl ServicePrincipal {
    #[must_use]
    pub fn new(service: &str) -> Self {
        Self(service.to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// An AWS managed policy referenced by name (e.g. `service-role/Foo`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct ManagedPolicy {
    name: String,
}

impl ManagedPolicy {
    #[must_use]
    pub fn from_aws_managed_policy_name(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// ARN resource part, appended to `arn:<partition>:`.
    #[must_use]
    pub fn arn_suffix(&self) -> String {
        format!(":iam::aws:policy/{}", self.name)
    }
}

/// Role definition: who may assume it and which managed policies it carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessIdentity {
    assumed_by: ServicePrincipal,
    managed_policies: Vec<ManagedPolicy>,
}

impl AccessIdentity {
    #[must_use]
    pub fn new(assumed_by: ServicePrincipal) -> Self {
        Self {
            assumed_by,
            managed_policies: Vec::new(),
        }
    }

    /// Attach a managed policy. Attaching the same policy twice is a no-op.
    pub fn add_managed_policy(&mut self, policy: ManagedPolicy) {
        if !self.managed_policies.contains(&policy) {
            self.managed_policies.push(policy);
        }
    }

    #[must_use]
    pub fn assumed_by(&self) -> &ServicePrincipal {
        &self.assumed_by
    }

    #[must_use]
    pub fn managed_policies(&self) -> &[ManagedPolicy] {
        &self.managed_policies
    }
}
