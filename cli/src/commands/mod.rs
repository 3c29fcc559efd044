//! Command implementations

pub mod check;
pub mod config;
pub mod synth;
pub mod version;

use std::path::PathBuf;

use clap::Args;

use crate::domain::config::ConfigOverrides;

/// Inputs shared by every command that declares the stack.
#[derive(Args, Debug, Clone)]
pub struct StackArgs {
    /// Stage identifier used to name resources, e.g. Dev
    #[arg(long = "id", value_name = "ID")]
    pub identifier: Option<String>,

    /// Name of an existing EC2 key pair
    #[arg(long)]
    pub key_name: Option<String>,

    /// CloudFormation stack name
    #[arg(long)]
    pub stack_name: Option<String>,

    /// Project directory containing assets/configure_server.sh
    #[arg(long, default_value = ".")]
    pub project_dir: PathBuf,
}

impl StackArgs {
    /// Flag values that override the config file.
    #[must_use]
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            stack_name: self.stack_name.clone(),
            identifier: self.identifier.clone(),
            key_name: self.key_name.clone(),
        }
    }
}
