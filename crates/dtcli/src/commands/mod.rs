//! CLI command implementations

pub mod alert;
pub mod env_config;
pub mod extension;
pub mod monitoring;
pub mod schemas;
