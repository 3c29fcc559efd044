//! Domain layer — resource model, composition context and synthesis.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `std::fs`, `std::process`, or `std::net`.
//! All functions are synchronous and take data in, returning data out.

pub mod config;
pub mod constants;
pub mod error;
pub mod iam;
pub mod image;
pub mod instance;
pub mod network;
pub mod security_group;
pub mod stack;
pub mod template;

pub use config::{ConfigOverrides, StackSettings, WebhostConfig};
pub use error::{ConfigError, NetworkError, ProvisionError};
pub use network::{NetworkContext, Subnet, SubnetSelection, SubnetType};
pub use stack::{InstanceHandle, Intrinsic, Resource, Stack};
pub use template::{Template, TemplateFormat, synthesize};
