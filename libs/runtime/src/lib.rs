//! Process-level plumbing shared by the Pantry binary: layered
//! configuration, logging initialization, home-directory resolution and
//! shutdown signals. No domain logic lives here.

pub mod config;
pub mod logging;
pub mod paths;
pub mod shutdown;

pub use config::{
    default_logging_config, AppConfig, CliArgs, DatabaseConfig, FileStorageConfig, LoggingConfig,
    Section, ServerConfig, StorageBackend, StorageConfig,
};
pub use shutdown::wait_for_shutdown;
