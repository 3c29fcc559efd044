//! Network context the web server is placed into.
//!
//! The VPC itself is owned elsewhere; this module only describes it and
//! checks that it can host a public instance.

use std::collections::HashSet;
use std::fmt;
use std::sync::LazyLock;

use anyhow::Result;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::error::NetworkError;

#[allow(clippy::unwrap_used)] // literal pattern
static VPC_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^vpc-([0-9a-f]{8}|[0-9a-f]{17})$").unwrap());

#[allow(clippy::unwrap_used)] // literal pattern
static SUBNET_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^subnet-([0-9a-f]{8}|[0-9a-f]{17})$").unwrap());

/// Subnet routing class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubnetType {
    /// Routed through an internet gateway.
    Public,
    /// Outbound only, through a NAT.
    Private,
    /// No route out of the VPC.
    Isolated,
}

impl fmt::Display for SubnetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Public => "Public",
            Self::Private => "Private",
            Self::Isolated => "Isolated",
        })
    }
}

/// One subnet of the VPC.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subnet {
    pub id: String,
    pub availability_zone: String,
    #[serde(rename = "type")]
    pub kind: SubnetType,
}

/// Which subnets an instance may be placed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubnetSelection {
    pub subnet_type: SubnetType,
}

impl SubnetSelection {
    pub const PUBLIC: Self = Self {
        subnet_type: SubnetType::Public,
    };
}

/// Externally supplied VPC description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkContext {
    pub vpc_id: String,
    #[serde(default)]
    pub subnets: Vec<Subnet>,
}

impl NetworkContext {
    /// Check identifiers and subnet uniqueness.
    ///
    /// # Errors
    ///
    /// Returns a [`NetworkError`] for a malformed VPC or subnet ID, a subnet
    /// listed twice, or a subnet without an availability zone.
    pub fn validate(&self) -> Result<()> {
        if !VPC_ID.is_match(&self.vpc_id) {
            return Err(NetworkError::InvalidVpcId(self.vpc_id.clone()).into());
        }
        let mut seen = HashSet::new();
        for subnet in &self.subnets {
            if !SUBNET_ID.is_match(&subnet.id) {
                return Err(NetworkError::InvalidSubnetId(subnet.id.clone()).into());
            }
            if !seen.insert(subnet.id.as_str()) {
                return Err(NetworkError::DuplicateSubnet(subnet.id.clone()).into());
            }
            if subnet.availability_zone.trim().is_empty() {
                return Err(NetworkError::MissingAvailabilityZone(subnet.id.clone()).into());
            }
        }
        Ok(())
    }

    /// First subnet matching `selection`, in declaration order.
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError::NoSubnets`] when nothing matches.
    pub fn select_subnet(&self, selection: SubnetSelection) -> Result<&Subnet> {
        self.subnets
            .iter()
            .find(|s| s.kind == selection.subnet_type)
            .ok_or_else(|| {
                NetworkError::NoSubnets {
                    kind: selection.subnet_type,
                    vpc_id: self.vpc_id.clone(),
                }
                .into()
            })
    }
}
