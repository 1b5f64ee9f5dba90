//! Logging system configuration and initialization
//!
//! - console and/or file output, plain or JSON
//! - a single rotated-on-startup file, or one file per day
//! - timestamps rendered in the configured UTC offset
//! - `RUST_LOG` overrides the configured level and module filters

use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::SystemTime;

use anyhow::{Result, anyhow};
use chrono::{DateTime, FixedOffset, Offset, Utc};
use lazy_static::lazy_static;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::{
    EnvFilter, Layer, Registry,
    filter::{Directive, LevelFilter},
    fmt::{self, time::FormatTime},
    layer::{Layered, SubscriberExt},
    util::SubscriberInitExt,
};

pub use crate::infrastructure::config::{LogFileStrategy, LoggingConfig};

// Keeps the non-blocking file writers alive for the life of the process
lazy_static! {
    static ref LOG_GUARDS: Mutex<Vec<WorkerGuard>> = Mutex::new(Vec::new());
}

type FilteredRegistry = Layered<EnvFilter, Registry>;
type BoxedLayer = Box<dyn Layer<FilteredRegistry> + Send + Sync>;

/// Renders timestamps in a fixed UTC offset
#[derive(Debug, Clone, Copy)]
struct OffsetTimeFormatter {
    offset: FixedOffset,
}

impl OffsetTimeFormatter {
    fn new(utc_offset_hours: i32) -> Self {
        Self {
            offset: fixed_offset(utc_offset_hours),
        }
    }
}

impl FormatTime for OffsetTimeFormatter {
    fn format_time(&self, w: &mut fmt::format::Writer<'_>) -> std::fmt::Result {
        let now = Utc::now().with_timezone(&self.offset);
        write!(w, "{}", now.format("%Y-%m-%d %H:%M:%S%.3f %:z"))
    }
}

fn fixed_offset(hours: i32) -> FixedOffset {
    hours
        .checked_mul(3600)
        .and_then(FixedOffset::east_opt)
        .unwrap_or_else(|| Utc.fix())
}

/// Log directory: the configured one, else `logs/` next to the executable
pub fn get_log_directory(config: &LoggingConfig) -> PathBuf {
    if let Some(dir) = &config.log_dir {
        return dir.clone();
    }

    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_default());

    exe_dir.join("logs")
}

/// Initialize the logging system with default configuration
pub fn init_logging() -> Result<()> {
    init_logging_with_config(&LoggingConfig::default())
}

/// Initialize logging with custom configuration
///
/// `RUST_LOG`, when set, replaces the configured level and module filters:
/// ```bash
/// RUST_LOG="debug,storefront_admin::domain::list_engine=trace" ts_export
/// ```
pub fn init_logging_with_config(config: &LoggingConfig) -> Result<()> {
    if !config.file_output && !config.console_output {
        return Err(anyhow!("No logging output configured"));
    }

    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => build_env_filter(config)?,
    };
    let timer = OffsetTimeFormatter::new(config.utc_offset_hours);
    let mut layers: Vec<BoxedLayer> = Vec::new();

    let log_dir = get_log_directory(config);
    if config.file_output {
        std::fs::create_dir_all(&log_dir)
            .map_err(|e| anyhow!("Failed to create log directory {}: {e}", log_dir.display()))?;

        if config.auto_cleanup_logs {
            cleanup_old_logs(&log_dir, config.max_files)?;
        }

        let file_appender = match config.file_strategy {
            LogFileStrategy::Unified => {
                rotate_existing_log_file(&log_dir, &config.file_name, config.utc_offset_hours)?;
                rolling::never(&log_dir, &config.file_name)
            }
            LogFileStrategy::Daily => rolling::daily(&log_dir, &config.file_name),
        };
        let (file_writer, file_guard) = non_blocking(file_appender);
        LOG_GUARDS
            .lock()
            .map_err(|_| anyhow!("Log guard registry is poisoned"))?
            .push(file_guard);

        let file_layer = if config.json_format {
            fmt::Layer::new()
                .json()
                .with_writer(file_writer)
                .with_timer(timer)
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true)
                .with_ansi(false)
                .boxed()
        } else {
            fmt::Layer::new()
                .with_writer(file_writer)
                .with_timer(timer)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .with_ansi(false)
                .boxed()
        };
        layers.push(file_layer);
    }

    if config.console_output {
        layers.push(
            fmt::Layer::new()
                .with_writer(std::io::stdout)
                .with_timer(timer)
                .with_target(false)
                .boxed(),
        );
    }

    Registry::default()
        .with(env_filter)
        .with(layers)
        .try_init()
        .map_err(|e| anyhow!("Failed to install tracing subscriber: {e}"))?;

    info!("Logging system initialized");
    info!("Log level: {}", config.level);
    info!("JSON format: {}", config.json_format);
    info!("Console output: {}", config.console_output);
    info!("File output: {}", config.file_output);
    if config.file_output {
        info!("Log directory: {}", log_dir.display());
        info!("File strategy: {:?}", config.file_strategy);
    }

    Ok(())
}

/// Filter built from the configured level plus per-module overrides
pub fn build_env_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    parse_level_directives(&config.level)?;
    let mut filter = EnvFilter::try_new(&config.level)
        .map_err(|e| anyhow!("Invalid log level '{}': {e}", config.level))?;

    let mut modules: Vec<_> = config.module_filters.iter().collect();
    modules.sort();
    for (module, level) in modules {
        let directive: Directive = format!("{module}={level}")
            .parse()
            .map_err(|e| anyhow!("Invalid log filter '{module}={level}': {e}"))?;
        filter = filter.add_directive(directive);
    }

    Ok(filter)
}

/// Directives of a level string such as `info,storefront_admin=debug`
///
/// A bare word must be a level name. `EnvFilter` would read it as a target and
/// silently log nothing for it.
pub fn parse_level_directives(spec: &str) -> Result<Vec<Directive>> {
    spec.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            if !part.contains('=') {
                part.parse::<LevelFilter>()
                    .map_err(|e| anyhow!("Invalid log level '{part}': {e}"))?;
            }
            part.parse::<Directive>()
                .map_err(|e| anyhow!("Invalid log filter '{part}': {e}"))
        })
        .collect()
}

/// Rename the previous run's log file with its timestamp so every run starts
/// a fresh file
fn rotate_existing_log_file(
    log_dir: &Path,
    log_file_name: &str,
    utc_offset_hours: i32,
) -> Result<Option<PathBuf>> {
    let log_file_path = log_dir.join(log_file_name);
    if !log_file_path.exists() {
        return Ok(None);
    }

    let metadata = std::fs::metadata(&log_file_path)
        .map_err(|e| anyhow!("Failed to get log file metadata: {e}"))?;
    let file_time = metadata
        .created()
        .or_else(|_| metadata.modified())
        .unwrap_or_else(|_| SystemTime::now());
    let stamped: DateTime<Utc> = file_time.into();
    let stamped = stamped.with_timezone(&fixed_offset(utc_offset_hours));

    let file_stem = log_file_name.trim_end_matches(".log");
    let timestamped_name = format!("{file_stem}.{}.log", stamped.format("%Y%m%dT%H%M%S"));
    let timestamped_path = log_dir.join(&timestamped_name);

    std::fs::rename(&log_file_path, &timestamped_path).map_err(|e| {
        anyhow!(
            "Failed to rotate log file {} to {}: {e}",
            log_file_path.display(),
            timestamped_path.display()
        )
    })?;

    info!("Rotated existing log file to: {timestamped_name}");
    Ok(Some(timestamped_path))
}

/// Delete all but the `max_files` newest `.log` files; returns how many went
pub fn cleanup_old_logs(log_dir: &Path, max_files: u32) -> Result<usize> {
    if !log_dir.exists() {
        return Ok(0);
    }

    let mut log_files = Vec::new();
    for entry in std::fs::read_dir(log_dir)? {
        let entry = entry?;
        let path = entry.path();
        let is_log = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|name| name.ends_with(".log"));
        if !path.is_file() || !is_log {
            continue;
        }
        if let Ok(modified) = entry.metadata().and_then(|m| m.modified()) {
            log_files.push((path, modified));
        }
    }

    // Newest first
    log_files.sort_by(|a, b| b.1.cmp(&a.1));

    let keep = max_files as usize;
    let mut removed = 0;
    for (path, _) in log_files.iter().skip(keep) {
        match std::fs::remove_file(path) {
            Ok(()) => {
                info!("Removed old log file: {}", path.display());
                removed += 1;
            }
            Err(e) => warn!("Failed to remove old log file {}: {e}", path.display()),
        }
    }

    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn configured_log_dir_wins() {
        let config = LoggingConfig {
            log_dir: Some(PathBuf::from("/var/log/storefront")),
            ..LoggingConfig::default()
        };
        assert_eq!(get_log_directory(&config), PathBuf::from("/var/log/storefront"));

        let fallback = get_log_directory(&LoggingConfig::default());
        assert!(fallback.ends_with("logs"));
    }

    #[test]
    fn module_filters_must_name_a_level() {
        let mut config = LoggingConfig::default();
        assert!(build_env_filter(&config).is_ok());

        config.module_filters =
            HashMap::from([("storefront_admin".to_string(), "loud".to_string())]);
        assert!(build_env_filter(&config).is_err());

        let config = LoggingConfig {
            level: "loud".to_string(),
            ..LoggingConfig::default()
        };
        assert!(build_env_filter(&config).is_err());
    }

    #[test]
    fn level_strings_need_level_names() {
        assert_eq!(parse_level_directives("info").unwrap().len(), 1);
        assert_eq!(parse_level_directives("warn, storefront_admin=trace").unwrap().len(), 2);
        assert!(parse_level_directives("loud").is_err());
        assert!(parse_level_directives("storefront_admin=loud").is_err());
    }

    #[test]
    fn out_of_range_offset_falls_back_to_utc() {
        assert_eq!(fixed_offset(3).local_minus_utc(), 3 * 3600);
        assert_eq!(fixed_offset(48).local_minus_utc(), 0);
    }

    #[test]
    fn rotation_renames_previous_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("app.log"), "previous run").unwrap();

        let rotated = rotate_existing_log_file(dir.path(), "app.log", 0).unwrap().unwrap();
        assert!(!dir.path().join("app.log").exists());
        assert_eq!(std::fs::read_to_string(rotated).unwrap(), "previous run");

        assert!(rotate_existing_log_file(dir.path(), "app.log", 0).unwrap().is_none());
    }

    #[test]
    fn cleanup_keeps_newest_logs_only() {
        let dir = tempfile::tempdir().unwrap();
        for i in 0..5 {
            std::fs::write(dir.path().join(format!("run-{i}.log")), "x").unwrap();
        }
        std::fs::write(dir.path().join("notes.txt"), "not a log").unwrap();

        assert_eq!(cleanup_old_logs(dir.path(), 2).unwrap(), 3);

        let remaining: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(remaining.len(), 3);
        assert!(dir.path().join("notes.txt").exists());
    }

    #[test]
    fn cleanup_of_missing_dir_is_a_no_op() {
        assert_eq!(cleanup_old_logs(Path::new("/no/such/log/dir"), 1).unwrap(), 0);
    }

    #[test]
    fn refuses_config_without_outputs() {
        let config = LoggingConfig {
            console_output: false,
            file_output: false,
            ..LoggingConfig::default()
        };
        assert!(init_logging_with_config(&config).is_err());
    }
}
