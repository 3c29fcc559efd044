//! Application services: provisioning, stack assembly and configuration.
//!
//! Each module imports only from `crate::domain` and
//! `crate::application::ports`.

pub mod config_service;
pub mod provision;
pub mod web_stack;
