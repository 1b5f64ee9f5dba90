//! Configuration infrastructure
//!
//! Settings are layered with the `config` crate:
//! 1. built-in defaults (the `defaults` module)
//! 2. an optional file (`storefront_admin.json` in the user config dir, or any
//!    path handed to [`AppConfig::load`])
//! 3. `STOREFRONT_ADMIN_*` environment variables, `__` separating nested keys
//!    (e.g. `STOREFRONT_ADMIN_LISTS__NEIGHBOR_RADIUS=3`)

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::fs;
use tracing::info;

use crate::infrastructure::logging::parse_level_directives;

pub const ENV_PREFIX: &str = "STOREFRONT_ADMIN";

/// Default configuration values
pub mod defaults {
    use crate::domain::{DEFAULT_NEIGHBOR_RADIUS, DEFAULT_PAGE_SIZE, PAGE_SIZE_OPTIONS};

    pub const LIST_DEFAULT_PAGE_SIZE: u32 = DEFAULT_PAGE_SIZE;
    pub const LIST_PAGE_SIZE_OPTIONS: [u32; 4] = PAGE_SIZE_OPTIONS;
    pub const LIST_NEIGHBOR_RADIUS: u32 = DEFAULT_NEIGHBOR_RADIUS;
    pub const LIST_MAX_NEIGHBOR_RADIUS: u32 = 10;
    pub const LIST_STRICT_SORT_KEYS: bool = false;

    pub const LOG_LEVEL: &str = "info";
    pub const LOG_JSON_FORMAT: bool = false;
    pub const LOG_CONSOLE_OUTPUT: bool = true;
    pub const LOG_FILE_OUTPUT: bool = false;
    pub const LOG_FILE_NAME: &str = "storefront-admin.log";
    pub const LOG_MAX_FILES: u32 = 7;
    pub const LOG_AUTO_CLEANUP: bool = true;
    pub const LOG_UTC_OFFSET_HOURS: i32 = 0;

    pub const MOCK_SEED: u64 = 7;
    pub const MOCK_PRODUCTS: usize = 120;
    pub const MOCK_SELLERS: usize = 24;
    pub const MOCK_USERS: usize = 40;
    pub const MOCK_WEBSITES: usize = 12;
    pub const MOCK_CUSTOMERS: usize = 80;
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load config: {source}")]
    FileLoad {
        #[from]
        source: config::ConfigError,
    },

    #[error("Configuration validation failed: {message}")]
    Validation { message: String },
}

impl ConfigError {
    fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub lists: ListSettings,
    pub logging: LoggingConfig,
    pub mock_data: MockDataConfig,
}

/// Behaviour shared by every list screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListSettings {
    /// Page size of a freshly opened list
    pub default_page_size: u32,

    /// Sizes offered by the page-size selector
    pub page_size_options: Vec<u32>,

    /// Page links shown on each side of the current page
    pub neighbor_radius: u32,

    /// Reject sort keys the entity profile does not list as sortable, and
    /// filter events on columns it does not list as filterable
    pub strict_sort_keys: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFileStrategy {
    /// One file, never rolled
    #[default]
    Unified,
    /// A new file per day
    Daily,
}

/// Logging configuration settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: "error", "warn", "info", "debug", "trace"
    pub level: String,

    /// Enable JSON formatted logs
    pub json_format: bool,

    /// Enable console output
    pub console_output: bool,

    /// Enable file output
    pub file_output: bool,

    pub file_strategy: LogFileStrategy,

    /// Directory for log files; next to the executable when unset
    pub log_dir: Option<PathBuf>,

    pub file_name: String,

    /// Number of log files to keep (older files will be deleted)
    pub max_files: u32,

    /// Enable automatic log cleanup on startup
    pub auto_cleanup_logs: bool,

    /// Offset from UTC used for timestamps
    pub utc_offset_hours: i32,

    /// Module-specific log level filters (e.g., "tokio": "warn")
    pub module_filters: HashMap<String, String>,
}

/// Size and seed of the generated mock catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MockDataConfig {
    pub seed: u64,
    pub products: usize,
    pub sellers: usize,
    pub users: usize,
    pub websites: usize,
    pub customers: usize,
}

impl Default for ListSettings {
    fn default() -> Self {
        Self {
            default_page_size: defaults::LIST_DEFAULT_PAGE_SIZE,
            page_size_options: defaults::LIST_PAGE_SIZE_OPTIONS.to_vec(),
            neighbor_radius: defaults::LIST_NEIGHBOR_RADIUS,
            strict_sort_keys: defaults::LIST_STRICT_SORT_KEYS,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::LOG_LEVEL.to_string(),
            json_format: defaults::LOG_JSON_FORMAT,
            console_output: defaults::LOG_CONSOLE_OUTPUT,
            file_output: defaults::LOG_FILE_OUTPUT,
            file_strategy: LogFileStrategy::default(),
            log_dir: None,
            file_name: defaults::LOG_FILE_NAME.to_string(),
            max_files: defaults::LOG_MAX_FILES,
            auto_cleanup_logs: defaults::LOG_AUTO_CLEANUP,
            utc_offset_hours: defaults::LOG_UTC_OFFSET_HOURS,
            module_filters: {
                let mut filters = HashMap::new();
                filters.insert("tokio".to_string(), "info".to_string());
                filters.insert("storefront_admin".to_string(), "info".to_string());
                filters
            },
        }
    }
}

impl Default for MockDataConfig {
    fn default() -> Self {
        Self {
            seed: defaults::MOCK_SEED,
            products: defaults::MOCK_PRODUCTS,
            sellers: defaults::MOCK_SELLERS,
            users: defaults::MOCK_USERS,
            websites: defaults::MOCK_WEBSITES,
            customers: defaults::MOCK_CUSTOMERS,
        }
    }
}

impl AppConfig {
    /// Builds the layered configuration: defaults, then `path` (if given),
    /// then environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with_env(path, None)
    }

    /// Like [`AppConfig::load`], reading overrides from `env` instead of the
    /// process environment when given.
    pub fn load_with_env(
        path: Option<&Path>,
        env: Option<HashMap<String, String>>,
    ) -> Result<Self, ConfigError> {
        let mut builder =
            config::Config::builder().add_source(config::Config::try_from(&Self::default())?);

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        let settings = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("lists.page_size_options")
                    .source(env),
            )
            .build()?;

        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::load(Some(path.as_ref()))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let lists = &self.lists;
        if lists.page_size_options.is_empty() {
            return Err(ConfigError::validation("page_size_options cannot be empty"));
        }
        if lists.page_size_options.contains(&0) {
            return Err(ConfigError::validation("page_size_options must all be greater than 0"));
        }
        if !lists.page_size_options.contains(&lists.default_page_size) {
            return Err(ConfigError::validation(format!(
                "default_page_size {} is not one of {:?}",
                lists.default_page_size, lists.page_size_options
            )));
        }
        if lists.neighbor_radius > defaults::LIST_MAX_NEIGHBOR_RADIUS {
            return Err(ConfigError::validation(format!(
                "neighbor_radius cannot exceed {}",
                defaults::LIST_MAX_NEIGHBOR_RADIUS
            )));
        }

        let logging = &self.logging;
        if logging.level.trim().is_empty() {
            return Err(ConfigError::validation("logging.level cannot be empty"));
        }
        if let Err(e) = parse_level_directives(&logging.level) {
            return Err(ConfigError::validation(format!("logging.level: {e}")));
        }
        if !(-14..=14).contains(&logging.utc_offset_hours) {
            return Err(ConfigError::validation("utc_offset_hours must be within -14..=14"));
        }
        if logging.file_output && logging.file_name.trim().is_empty() {
            return Err(ConfigError::validation("file_name is required when file_output is on"));
        }

        Ok(())
    }
}

/// Configuration manager for locating, seeding and loading the config file
pub struct ConfigManager {
    pub config_path: PathBuf,
}

impl ConfigManager {
    /// Get the application configuration directory
    pub fn get_config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to get user config directory")?
            .join("storefront-admin");

        Ok(config_dir)
    }

    /// Manager for the config file in the user's config directory
    pub fn new() -> Result<Self> {
        let config_path = Self::get_config_dir()?.join("storefront_admin.json");
        Ok(Self { config_path })
    }

    pub fn with_path(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
        }
    }

    /// Writes the defaults on first run, then loads the layered configuration
    pub async fn initialize_on_first_run(&self) -> Result<AppConfig> {
        if !self.config_path.exists() {
            info!("🎉 First run detected - writing default configuration");
            self.save_config(&AppConfig::default()).await?;
        }
        self.load_config()
    }

    pub fn load_config(&self) -> Result<AppConfig> {
        let config = AppConfig::from_file(&self.config_path)
            .with_context(|| format!("Failed to load {}", self.config_path.display()))?;
        info!("✅ Configuration loaded from {}", self.config_path.display());
        Ok(config)
    }

    pub async fn save_config(&self, config: &AppConfig) -> Result<()> {
        config.validate().context("Refusing to save invalid configuration")?;

        if let Some(dir) = self.config_path.parent() {
            fs::create_dir_all(dir)
                .await
                .with_context(|| format!("Failed to create config directory {}", dir.display()))?;
        }

        let content = serde_json::to_string_pretty(config).context("Failed to serialize config")?;
        fs::write(&self.config_path, content)
            .await
            .with_context(|| format!("Failed to write {}", self.config_path.display()))?;

        info!("✅ Configuration saved to {}", self.config_path.display());
        Ok(())
    }
}
