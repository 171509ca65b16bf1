pub mod config;
pub mod domain;

pub use config::{AppConfig, ConfigError, ConfigOverrides, LoadOptions};
pub use domain::report::{product_title, BugReport, PRODUCT_CATALOG, REPORT_TTL_DAYS};
