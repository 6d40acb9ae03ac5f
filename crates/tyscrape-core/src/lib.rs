mod app_config;
mod config;
mod error;
mod pages;
mod products;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use error::ConfigError;
pub use pages::PageRange;
pub use products::{ProductRecord, CSV_HEADER};
