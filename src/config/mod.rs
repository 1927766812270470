pub mod loader;
pub mod types;

pub use loader::ConfigError;
pub use types::{Config, LoggingConfig, StorageConfig, StoreConfig};
