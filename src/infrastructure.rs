//! Infrastructure layer for configuration, logging and data sources
//!
//! Everything that touches the environment lives here: the layered config
//! loader, the tracing setup, and the in-memory mock data source standing in
//! for the panel's REST API.

pub mod config;
pub mod logging;
pub mod mock_source;

// Re-export commonly used items
pub use config::{
    AppConfig, ConfigError, ConfigManager, ListSettings, LogFileStrategy, LoggingConfig,
    MockDataConfig,
};
pub use logging::{init_logging, init_logging_with_config};
pub use mock_source::{InMemoryEntitySource, MockCatalog};
