//! Shared fixtures for unit tests.

use std::path::Path;

use anyhow::Result;

use webhost_cli::application::ScriptSource;
use webhost_cli::application::services::provision::InstanceConfig;
use webhost_cli::domain::config::StackSettings;
use webhost_cli::domain::error::ProvisionError;
use webhost_cli::domain::instance::BootstrapScript;
use webhost_cli::domain::{NetworkContext, Subnet, SubnetType};

pub const SCRIPT: &str = "yum update -y\nyum install -y httpd\nsystemctl enable --now httpd\n";

/// Serves the same script text for every path.
pub struct FixedScript(pub &'static str);

impl ScriptSource for FixedScript {
    fn load(&self, relative: &Path) -> Result<BootstrapScript> {
        Ok(BootstrapScript::new(relative, self.0.to_string()))
    }
}

/// Fails every read the way a missing file would.
pub struct MissingScript;

impl ScriptSource for MissingScript {
    fn load(&self, relative: &Path) -> Result<BootstrapScript> {
        Err(ProvisionError::BootstrapScript {
            path: relative.to_path_buf(),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        }
        .into())
    }
}

fn subnet(id: &str, az: &str, kind: SubnetType) -> Subnet {
    Subnet {
        id: id.to_string(),
        availability_zone: az.to_string(),
        kind,
    }
}

pub fn network() -> NetworkContext {
    NetworkContext {
        vpc_id: "vpc-1a2b3c4d".to_string(),
        subnets: vec![
            subnet("subnet-11111111", "us-east-1a", SubnetType::Isolated),
            subnet("subnet-22222222", "us-east-1b", SubnetType::Public),
        ],
    }
}

pub fn instance_config() -> InstanceConfig {
    InstanceConfig {
        network: network(),
        key_name: "web-key".to_string(),
    }
}

pub fn settings(identifier: &str) -> StackSettings {
    StackSettings {
        stack_name: "WebServerStack".to_string(),
        description: None,
        identifier: identifier.to_string(),
        key_name: "web-key".to_string(),
        network: network(),
    }
}
