//! Provider-specific names and fixed instance parameters.
//!
//! Everything tied to AWS naming lives here so that switching a policy,
//! image family or instance size touches one file.

use crate::domain::image::{AmazonLinuxGeneration, CpuType};
use crate::domain::instance::{InstanceClass, InstanceSize};

// ── Identity ─────────────────────────────────────────────────────────────────

/// Service principal allowed to assume the web server role.
pub const EC2_SERVICE_PRINCIPAL: &str = "ec2.amazonaws.com";

/// Lets Systems Manager manage the instance.
pub const SSM_MANAGED_INSTANCE_CORE: &str = "AmazonSSMManagedInstanceCore";

/// Lets the CodeDeploy agent pull revisions.
pub const CODE_DEPLOY_EC2_ROLE: &str = "service-role/AmazonEC2RoleforAWSCodeDeploy";

/// AWS managed policies attached to every web server role.
pub const WEB_SERVER_MANAGED_POLICIES: [&str; 2] =
    [SSM_MANAGED_INSTANCE_CORE, CODE_DEPLOY_EC2_ROLE];

// ── Network access ───────────────────────────────────────────────────────────

pub const WEB_SECURITY_GROUP_NAME: &str = "WebSecurityGroup";
pub const WEB_SECURITY_GROUP_DESCRIPTION: &str = "Allows Inbound HTTP traffic to the web server.";

/// Inbound TCP ports opened to any IPv4 address, in declaration order.
pub const WEB_INGRESS_RULES: [(u16, &str); 3] = [
    (80, "Allow HTTP access"),
    (443, "Allow HTTPS access"),
    (22, "Allow SSH access"),
];

pub const ANY_IPV4_CIDR: &str = "0.0.0.0/0";
pub const ALLOW_ALL_OUTBOUND_DESCRIPTION: &str = "Allow all outbound traffic by default";

// ── Compute ──────────────────────────────────────────────────────────────────

pub const WEB_INSTANCE_CLASS: InstanceClass = InstanceClass::T2;
pub const WEB_INSTANCE_SIZE: InstanceSize = InstanceSize::Micro;
pub const WEB_IMAGE_GENERATION: AmazonLinuxGeneration = AmazonLinuxGeneration::AmazonLinux2;
pub const WEB_IMAGE_CPU: CpuType = CpuType::X86_64;

/// Public SSM namespace that tracks the latest Amazon Linux AMIs.
pub const AMAZON_LINUX_SSM_PREFIX: &str = "/aws/service/ami-amazon-linux-latest";

/// Bootstrap script, relative to the project root.
pub const BOOTSTRAP_SCRIPT_PATH: &str = "./assets/configure_server.sh";

// ── Naming ───────────────────────────────────────────────────────────────────

pub const ROLE_SUFFIX: &str = "-Role";
pub const SECURITY_GROUP_SUFFIX: &str = "-SecurityGroup";
pub const INSTANCE_SUFFIX: &str = "-Instance";
pub const INSTANCE_PROFILE_CHILD: &str = "InstanceProfile";

pub const APPLICATION_NAME_TAG: &str = "application-name";
pub const STAGE_TAG: &str = "stage";
pub const APPLICATION_NAME_SUFFIX: &str = "-App";

pub const TEMPLATE_FORMAT_VERSION: &str = "2010-09-09";
