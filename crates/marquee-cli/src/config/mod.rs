//! Application configuration module.
//!
//! Manages the TOML config file holding the locale override and catalog
//! connection settings.

#[allow(clippy::module_inception)]
mod config;
mod paths;

#[allow(clippy::module_name_repetitions)]
pub use config::{AppConfig, CatalogConfig};
pub use paths::resolve_config_path;
