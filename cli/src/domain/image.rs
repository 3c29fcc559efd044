//! Machine image selection.
//!
//! The AMI is not pinned. The template reads the latest image ID from the
//! public SSM parameter for the chosen generation and CPU at deploy time.

use crate::domain::constants::AMAZON_LINUX_SSM_PREFIX;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmazonLinuxGeneration {
    AmazonLinux2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(non_camel_case_types)]
pub enum CpuType {
    X86_64,
}

impl CpuType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::X86_64 => "x86_64",
        }
    }
}

/// Amazon Linux image reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MachineImageRef {
    pub generation: AmazonLinuxGeneration,
    pub cpu_type: CpuType,
}

impl MachineImageRef {
    #[must_use]
    pub fn amazon_linux(generation: AmazonLinuxGeneration, cpu_type: CpuType) -> Self {
        Self {
            generation,
            cpu_type,
        }
    }

    /// SSM parameter holding the current AMI ID.
    #[must_use]
    pub fn ssm_parameter_name(&self) -> String {
        let image = match self.generation {
            AmazonLinuxGeneration::AmazonLinux2 => {
                format!("amzn2-ami-hvm-{}-gp2", self.cpu_type.as_str())
            }
        };
        format!("{AMAZON_LINUX_SSM_PREFIX}/{image}")
    }
}
