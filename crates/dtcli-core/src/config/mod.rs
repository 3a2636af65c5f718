mod model;
mod target;

pub use model::{CONFIG_ENV, Config, HttpConfig, TenantConfig, default_config_path};
pub use target::{Connection, Overrides, TenantTarget};
