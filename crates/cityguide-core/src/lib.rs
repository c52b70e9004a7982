//! Shared domain types for the cityguide workspace: the normalized
//! point-of-interest record and its category taxonomy, the supported-city
//! registry, and env-driven application configuration.

pub mod cities;
pub mod config;
pub mod poi;

pub use cities::City;
pub use config::{load_app_config, load_app_config_from_env, AppConfig, ConfigError};
pub use poi::{CategoryFilter, Poi, PoiCategory, PoiProperties};
