//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application` or `std::fs`. All error types implement
//! `thiserror::Error` and convert to `anyhow::Error` via the `?` operator.

use std::path::PathBuf;

use thiserror::Error;

use crate::domain::network::SubnetType;

// ── Provisioning errors ───────────────────────────────────────────────────────

/// Errors raised while declaring resources into a stack.
#[derive(Debug, Error)]
pub enum ProvisionError {
    #[error("Identifier must not be empty.")]
    EmptyIdentifier,

    #[error("Construct '{id}' is already declared in stack '{stack}'.")]
    DuplicateConstruct { id: String, stack: String },

    #[error("Output '{id}' is already declared in stack '{stack}'.")]
    DuplicateOutput { id: String, stack: String },

    #[error("Cannot read bootstrap script {}: {source}", path.display())]
    BootstrapScript {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

// ── Network errors ────────────────────────────────────────────────────────────

/// Errors raised when a network context cannot host the instance.
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("Invalid VPC ID '{0}': expected vpc- followed by 8 or 17 hex characters.")]
    InvalidVpcId(String),

    #[error("Invalid subnet ID '{0}': expected subnet- followed by 8 or 17 hex characters.")]
    InvalidSubnetId(String),

    #[error("Subnet '{0}' is listed more than once.")]
    DuplicateSubnet(String),

    #[error("Subnet '{0}' has no availability zone.")]
    MissingAvailabilityZone(String),

    #[error("There are no '{kind}' subnets in VPC '{vpc_id}'.")]
    NoSubnets { kind: SubnetType, vpc_id: String },
}

// ── Config errors ─────────────────────────────────────────────────────────────

/// Errors related to resolving configuration values.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("No value for '{key}'. Set it in the config file or pass {flag}.")]
    Missing { key: &'static str, flag: &'static str },

    #[error("No network configured. Add a 'network' section to the config file.")]
    MissingNetwork,
}
