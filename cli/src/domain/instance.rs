//! Compute instance descriptor and the pieces embedded in it.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::domain::image::MachineImageRef;
use crate::domain::network::Subnet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstanceClass {
    /// Burstable, previous generation.
    T2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstanceSize {
    Micro,
}

/// Instance type such as `t2.micro`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstanceType {
    pub class: InstanceClass,
    pub size: InstanceSize,
}

impl InstanceType {
    #[must_use]
    pub fn of(class: InstanceClass, size: InstanceSize) -> Self {
        Self { class, size }
    }
}

impl fmt::Display for InstanceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let class = match self.class {
            InstanceClass::T2 => "t2",
        };
        let size = match self.size {
            InstanceSize::Micro => "micro",
        };
        write!(f, "{class}.{size}")
    }
}

/// Bootstrap script text and where it was read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapScript {
    path: PathBuf,
    text: String,
}

impl BootstrapScript {
    #[must_use]
    pub fn new(path: &Path, text: String) -> Self {
        Self {
            path: path.to_path_buf(),
            text,
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Linux user data: a bash shebang followed by appended command text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserData {
    parts: Vec<String>,
}

impl UserData {
    #[must_use]
    pub fn for_linux() -> Self {
        Self {
            parts: vec!["#!/bin/bash".to_string()],
        }
    }

    /// Append `text` as-is; line endings and trailing newlines are kept.
    pub fn add_commands(&mut self, text: &str) {
        self.parts.push(text.to_string());
    }

    #[must_use]
    pub fn render(&self) -> String {
        self.parts.join("\n")
    }
}

/// Instance tags, kept sorted by key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tags(BTreeMap<String, String>);

impl Tags {
    /// Set a tag, replacing any previous value for `key`.
    pub fn add(&mut self, key: &str, value: &str) {
        self.0.insert(key.to_string(), value.to_string());
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Everything needed to declare the instance.
///
/// `role` and `security_group` are construct IDs in the same stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceDescriptor {
    pub instance_type: InstanceType,
    pub image: MachineImageRef,
    pub subnet: Subnet,
    pub key_name: String,
    pub role: String,
    pub security_group: String,
    pub user_data: UserData,
    pub tags: Tags,
}
